//! Spatial pin index for snap and pick queries
//!
//! Every live pin sits in an R-tree keyed by its coordinate. Queries only
//! ever ask for "the closest pin, if it is close enough", so the index
//! exposes exactly that plus bulk insert/remove by owning tag.

use super::types::{PinPoint, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Pin wrapper for R-tree indexing
///
/// `seq` is the insertion order; it breaks distance ties so the earliest
/// inserted pin wins, the same answer a front-to-back scan would give.
#[derive(Clone, Debug, PartialEq)]
struct IndexedPin {
    pin: PinPoint,
    seq: u64,
}

impl RTreeObject for IndexedPin {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.pin.position.x, self.pin.position.y])
    }
}

impl PointDistance for IndexedPin {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.pin.position.x - point[0];
        let dy = self.pin.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// All live pins with their owning component type and tag
#[derive(Debug, Default)]
pub struct PinIndex {
    tree: RTree<IndexedPin>,
    next_seq: u64,
}

impl PinIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn insert_all(&mut self, pins: Vec<PinPoint>) {
        for pin in pins {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.tree.insert(IndexedPin { pin, seq });
        }
    }

    /// Remove every pin owned by `tag`, returning them in insertion order
    pub fn remove_tag(&mut self, tag: &str) -> Vec<PinPoint> {
        let mut doomed: Vec<IndexedPin> = self
            .tree
            .iter()
            .filter(|p| p.pin.tag == tag)
            .cloned()
            .collect();
        doomed.sort_by_key(|p| p.seq);

        for entry in &doomed {
            self.tree.remove(entry);
        }
        doomed.into_iter().map(|p| p.pin).collect()
    }

    /// Closest pin to `point`, only if strictly nearer than `max_distance`
    pub fn nearest(&self, point: Point, max_distance: f64) -> Option<&PinPoint> {
        let query = [point.x, point.y];
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best_d2) = candidates.next()?;

        let mut winner = first;
        for (other, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            if other.seq < winner.seq {
                winner = other;
            }
        }

        if best_d2.sqrt() < max_distance {
            Some(&winner.pin)
        } else {
            None
        }
    }

    pub fn pins_for_tag(&self, tag: &str) -> Vec<&PinPoint> {
        let mut owned: Vec<&IndexedPin> = self.tree.iter().filter(|p| p.pin.tag == tag).collect();
        owned.sort_by_key(|p| p.seq);
        owned.into_iter().map(|p| &p.pin).collect()
    }

    /// Every live pin in insertion order
    pub fn pins(&self) -> Vec<&PinPoint> {
        let mut all: Vec<&IndexedPin> = self.tree.iter().collect();
        all.sort_by_key(|p| p.seq);
        all.into_iter().map(|p| &p.pin).collect()
    }
}
