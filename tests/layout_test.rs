// Placement, rotation, snapping and deletion through the public session API
use trace_layout::layout::geometry::PlacedComponent;
use trace_layout::{
    ClickOutcome, ComponentCatalog, Deleted, DrawEvent, EventCanvas, LayoutConfig, LayoutSession, MemoryDesignStore,
    NullCanvas, Point, Rotation,
};

const LIBRARY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/components.csv");

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session() -> LayoutSession {
        let catalog = ComponentCatalog::from_path(LIBRARY).expect("Failed to load fixture library");
        let mut session = LayoutSession::new(LayoutConfig::default(), catalog);
        session
            .create_design(MemoryDesignStore::new("layout"), &mut NullCanvas)
            .expect("Failed to create design");
        session
    }

    fn place(session: &mut LayoutSession, component: &str, x: f64, y: f64) -> String {
        session.select_component(component).unwrap();
        match session.click(Point::new(x, y), &mut NullCanvas).unwrap() {
            ClickOutcome::Placed { tag, .. } => tag,
            other => panic!("expected a placement, got {:?}", other),
        }
    }

    fn extent(component: &PlacedComponent) -> (f64, f64) {
        let [min_x, min_y, max_x, max_y] = component.perimeter.bounds();
        (max_x - min_x, max_y - min_y)
    }

    #[test]
    fn test_fixture_library() {
        let catalog = ComponentCatalog::from_path(LIBRARY).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Via", "R10k", "LED", "USB"]);
        assert_eq!(catalog.lookup("USB").unwrap().pin_count(), 4);
        assert_eq!(catalog.lookup("LED").unwrap().lead_length, 0.25);
    }

    #[test]
    fn test_identical_placements_get_sequential_tags() {
        let mut session = new_session();
        let tags: Vec<String> = (0..5)
            .map(|i| place(&mut session, "Via", 20.0 + 25.0 * i as f64, 40.0))
            .collect();

        assert_eq!(tags, vec!["Via_0_0", "Via_1_0", "Via_2_0", "Via_3_0", "Via_4_0"]);
        assert_eq!(session.pins().len(), 5);
        println!("Placed tags: {:?}", tags);
    }

    #[test]
    fn test_via_example() {
        let mut session = new_session();
        let tag = place(&mut session, "Via", 100.0, 100.0);
        assert_eq!(tag, "Via_0_0");
        assert_eq!(session.components()[0].pins.len(), 1);

        let rotated = session.rotate(&mut NullCanvas).unwrap();
        assert_eq!(rotated, "Via_0_90");
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.components()[0].rotation, Rotation::QUARTER);
        assert!(session.pins().pins_for_tag("Via_0_0").is_empty());
        assert_eq!(session.pins().pins_for_tag("Via_0_90").len(), 1);
    }

    #[test]
    fn test_unrotated_perimeter_rectangle() {
        let mut session = new_session();
        place(&mut session, "LED", 60.0, 80.0);
        let led = &session.components()[0];

        // LED is 2 x 3 at scale 5
        let half_w = 2.0 * 5.0 / 2.0;
        let half_l = 3.0 * 5.0 / 2.0;
        assert_eq!(led.perimeter.bounds(), [60.0 - half_w, 80.0 - half_l, 60.0 + half_w, 80.0 + half_l]);
        assert!(led.perimeter.left.iter().all(|p| p.x == 60.0 - half_w));
        assert!(led.perimeter.right.iter().all(|p| p.x == 60.0 + half_w));

        // Both pins sit on the long edges and are pulled in by the lead
        assert_eq!(led.pins, vec![Point::new(60.0, 86.25), Point::new(60.0, 73.75)]);
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        let (w0, h0) = extent(&session.components()[0]);

        session.rotate(&mut NullCanvas).unwrap();
        let (w1, h1) = extent(&session.components()[0]);
        assert!((w1 - h0).abs() < 1e-9, "width {} vs {}", w1, h0);
        assert!((h1 - w0).abs() < 1e-9, "height {} vs {}", h1, w0);
    }

    #[test]
    fn test_four_rotations_restore_geometry() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        let initial = session.components()[0].clone();

        let tags: Vec<String> = (0..4).map(|_| session.rotate(&mut NullCanvas).unwrap()).collect();
        assert_eq!(tags, vec!["R10k_0_90", "R10k_0_180", "R10k_0_270", "R10k_0_0"]);
        assert_eq!(session.components()[0], initial);
        assert_eq!(session.pins().len(), 2);
    }

    #[test]
    fn test_rotation_resets_after_new_selection() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        session.rotate(&mut NullCanvas).unwrap();
        session.rotate(&mut NullCanvas).unwrap();
        assert_eq!(session.components()[0].rotation.degrees(), 180);

        place(&mut session, "LED", 40.0, 40.0);
        assert_eq!(session.rotate(&mut NullCanvas).unwrap(), "LED_0_90");
        assert_eq!(session.components()[0].rotation.degrees(), 180);
    }

    #[test]
    fn test_rotate_emits_erase_before_redraw() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        let mut canvas = EventCanvas::new();
        session.rotate(&mut canvas).unwrap();

        let events = canvas.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DrawEvent::Erase { tag: "R10k_0_0".to_string() });
        assert!(matches!(&events[1], DrawEvent::Component { tag, rotation_degrees: 90, .. } if tag == "R10k_0_90"));
    }

    #[test]
    fn test_trace_endpoint_snaps_onto_pin() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        let pin = session.components()[0].pins[1];

        session.click(Point::new(150.0, 100.0), &mut NullCanvas).unwrap();
        let outcome = session
            .click(Point::new(pin.x + 2.0, pin.y - 1.5), &mut NullCanvas)
            .unwrap();

        match outcome {
            ClickOutcome::Vertex { point, snapped_to, segment } => {
                assert_eq!(point, pin);
                assert_eq!(snapped_to.as_deref(), Some("R10k_0_0"));
                assert_eq!(segment.as_deref(), Some("line_1"));
            }
            other => panic!("expected a vertex, got {:?}", other),
        }
        assert_eq!(session.pending_vertices()[1], pin);
    }

    #[test]
    fn test_placement_snaps_center_to_pin() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        place(&mut session, "Via", 108.0, 101.0);
        assert_eq!(session.components()[1].center, Point::new(107.5, 100.0));
        // Placement does not log a connection
        assert!(session.connections().is_empty());
    }

    #[test]
    fn test_delete_near_component_keeps_traces() {
        let mut session = new_session();
        place(&mut session, "R10k", 100.0, 100.0);
        place(&mut session, "Via", 40.0, 40.0);

        // A trace passing right by the resistor center
        session.click(Point::new(60.0, 104.0), &mut NullCanvas).unwrap();
        session.click(Point::new(140.0, 104.0), &mut NullCanvas).unwrap();
        session.save().unwrap();

        session.click(Point::new(103.0, 103.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 20.0), &mut NullCanvas).unwrap();
        let deleted = session.delete(&mut NullCanvas).unwrap();

        assert_eq!(deleted, Some(Deleted::Component { tag: "R10k_0_0".to_string(), pins_removed: 2 }));
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.pins().len(), 1);
        assert_eq!(session.traces().len(), 1);
    }

    #[test]
    fn test_delete_far_from_everything_is_noop() {
        let mut session = new_session();
        place(&mut session, "Via", 40.0, 40.0);

        session.click(Point::new(150.0, 150.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 20.0), &mut NullCanvas).unwrap();
        assert_eq!(session.delete(&mut NullCanvas).unwrap(), None);
        assert_eq!(session.components().len(), 1);
        assert!(session.pending_vertices().is_empty());
    }

    #[test]
    fn test_deleted_tag_is_reused() {
        let mut session = new_session();
        place(&mut session, "Via", 40.0, 40.0);
        place(&mut session, "Via", 80.0, 40.0);

        session.click(Point::new(41.0, 41.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 20.0), &mut NullCanvas).unwrap();
        session.delete(&mut NullCanvas).unwrap();

        // One persisted Via remains, so the probe starts at ordinal 1 and
        // steps past the live Via_1_0
        assert_eq!(place(&mut session, "Via", 120.0, 40.0), "Via_2_0");
        place(&mut session, "LED", 160.0, 160.0);
        assert_eq!(session.components().len(), 3);
    }
}
