//! Placement engine: component transforms, perimeter sampling, pin derivation
//!
//! Given a definition, a center and a rotation, builds the full
//! [`PlacedComponent`]: rotated world-space pins and a sampled perimeter
//! polygon. Everything here is a pure function of its inputs; tag
//! allocation and index bookkeeping belong to the session.
//!
//! Two frames meet here. Pin offsets in the library are y-up, so a pin
//! lands at `center + scale * (R(θ)·p)` with the y component mirrored onto
//! the y-down workspace. The perimeter is built directly in workspace
//! coordinates and rotated there.

use crate::layout::catalog::ComponentDefinition;
use crate::layout::config::{LayoutConfig, USB_COMPONENT, USB_PIN_OFFSET_Y};
use crate::layout::geometry::{Perimeter, PlacedComponent, Point, Rotation};

/// Build a placed component. The caller has already validated the type and
/// allocated `tag`.
pub fn place(
    def: &ComponentDefinition,
    config: &LayoutConfig,
    center: Point,
    rotation: Rotation,
    tag: String,
) -> PlacedComponent {
    let theta = rotation.radians();
    let perimeter = sample_perimeter(def, center, theta, config.scale, config.perimeter_samples);

    let mut pins = rotated_pins(def, center, theta, config.scale);
    adjust_pins_to_border(&mut pins, &perimeter, def.lead_length * config.scale);

    log::debug!(
        "Placed {} '{}' at ({:.2}, {:.2}) rot={} with {} pins",
        def.name, tag, center.x, center.y, rotation.degrees(), pins.len()
    );

    PlacedComponent {
        tag,
        component: def.name.clone(),
        center,
        rotation,
        perimeter,
        pins,
    }
}

/// Rotated, scaled pin positions before any border adjustment
pub fn rotated_pins(def: &ComponentDefinition, center: Point, theta: f64, scale: f64) -> Vec<Point> {
    let (sin, cos) = theta.sin_cos();
    let mut pins: Vec<Point> = def
        .pin_offsets
        .iter()
        .map(|p| Point {
            x: center.x + scale * (p.x * cos - p.y * sin),
            y: center.y - scale * (p.x * sin + p.y * cos),
        })
        .collect();

    if def.name == USB_COMPONENT {
        for pin in &mut pins {
            pin.y += USB_PIN_OFFSET_Y;
        }
    }
    pins
}

/// Sample the four sides of the unrotated body, then rotate every sample
/// about `center`.
pub fn sample_perimeter(
    def: &ComponentDefinition,
    center: Point,
    theta: f64,
    scale: f64,
    samples: usize,
) -> Perimeter {
    let half_w = scale * def.width / 2.0;
    let half_l = scale * def.length / 2.0;

    let across = linspace(center.x - half_w, center.x + half_w, samples);
    let down = linspace(center.y - half_l, center.y + half_l, samples);

    let top = rotate_side(across.clone(), vec![center.y + half_l; samples], center, theta);
    let bottom = rotate_side(across, vec![center.y - half_l; samples], center, theta);
    let right = rotate_side(vec![center.x + half_w; samples], down.clone(), center, theta);
    let left = rotate_side(vec![center.x - half_w; samples], down, center, theta);

    Perimeter { top, bottom, left, right }
}

/// Shift each pin sitting on or beyond a body edge by `lead` along that
/// edge's axis. Edges are tried right, left, top, bottom; the first match
/// is the only adjustment a pin receives.
pub fn adjust_pins_to_border(pins: &mut [Point], perimeter: &Perimeter, lead: f64) {
    let firsts: Vec<Point> = [&perimeter.top, &perimeter.bottom, &perimeter.right, &perimeter.left]
        .iter()
        .filter_map(|side| side.first().copied())
        .collect();
    if firsts.is_empty() {
        return;
    }

    let right = firsts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
    let left = firsts.iter().map(|p| p.x).fold(f64::MAX, f64::min);
    let top = firsts.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    let bottom = firsts.iter().map(|p| p.y).fold(f64::MAX, f64::min);

    for pin in pins.iter_mut() {
        if pin.x >= right {
            pin.x -= lead;
        } else if pin.x <= left {
            pin.x += lead;
        } else if pin.y >= top {
            pin.y -= lead;
        } else if pin.y <= bottom {
            pin.y += lead;
        }
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Match the coordinate runs of one side. When the runs differ by exactly
/// one element, the longer run loses its last element.
fn equalize_runs(mut xs: Vec<f64>, mut ys: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
    if xs.len() == ys.len() + 1 {
        xs.pop();
    } else if ys.len() == xs.len() + 1 {
        ys.pop();
    }
    (xs, ys)
}

fn rotate_side(xs: Vec<f64>, ys: Vec<f64>, center: Point, theta: f64) -> Vec<Point> {
    let (xs, ys) = equalize_runs(xs, ys);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y).rotated_about(center, theta))
        .collect()
}
