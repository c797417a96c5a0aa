//! AABB overlap testing and collision support types
//!
//! Boxes are centered on a body's position and described by full extents;
//! all tests work on half-extents so they are symmetric around the center.

use serde::{Deserialize, Serialize};

use crate::math::Vector2;

/// Full width/height of a box. Halved wherever a test or response needs
/// half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Per-side contact flags.
///
/// Recomputed from scratch at the start of every collision pass for a body;
/// they never carry stale state across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitSides {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl HitSides {
    pub fn clear(&mut self) {
        *self = HitSides::default();
    }

    pub fn any(&self) -> bool {
        self.up || self.right || self.down || self.left
    }
}

/// Snapshot of a collidable candidate taken before a body's resolution
/// sweep. Candidates do not move while one body resolves, so the sweep can
/// run against copies while the body itself mutates.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub position: Vector2,
    pub collider: Size,
}

/// Separating-axis test for two center/half-extent boxes.
///
/// Touching edges count as overlap (`>=`/`<=` at the boundary).
pub fn overlaps(a_pos: &Vector2, a: &Size, b_pos: &Vector2, b: &Size) -> bool {
    a_pos.x + a.half_width() >= b_pos.x - b.half_width()
        && a_pos.x - a.half_width() <= b_pos.x + b.half_width()
        && a_pos.y + a.half_height() >= b_pos.y - b.half_height()
        && a_pos.y - a.half_height() <= b_pos.y + b.half_height()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boxes_with_half_extent_two_overlap_at_separation_three() {
        let size = Size::new(4.0, 4.0);
        let a = Vector2::new(0.0, 0.0);
        assert!(overlaps(&a, &size, &Vector2::new(3.0, 0.0), &size));
        assert!(!overlaps(&a, &size, &Vector2::new(5.0, 0.0), &size));
    }

    #[test]
    fn touching_edges_count_as_overlap() {
        let size = Size::new(4.0, 4.0);
        // separation exactly equals the sum of half-widths
        assert!(overlaps(
            &Vector2::new(0.0, 0.0),
            &size,
            &Vector2::new(4.0, 0.0),
            &size
        ));
    }

    #[test]
    fn separated_on_one_axis_is_enough_to_miss() {
        let size = Size::new(4.0, 4.0);
        assert!(!overlaps(
            &Vector2::new(0.0, 0.0),
            &size,
            &Vector2::new(1.0, 10.0),
            &size
        ));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a_pos = Vector2::new(ax, ay);
            let b_pos = Vector2::new(bx, by);
            let a = Size::new(aw, ah);
            let b = Size::new(bw, bh);
            prop_assert_eq!(
                overlaps(&a_pos, &a, &b_pos, &b),
                overlaps(&b_pos, &b, &a_pos, &a)
            );
        }
    }
}
