//! Physics bodies
//!
//! A body is one simulated, optionally renderable entity: a position, a
//! velocity, a visual box, a collision box, and the per-side contact flags
//! the collision pass rebuilds every frame.

use serde::{Deserialize, Serialize};

use crate::consts::{CONTACT_GAP, GRAVITY_DRAG, GRAVITY_PULL};
use crate::math::Vector2;
use crate::sim::collision::{self, HitSides, Obstacle, Size};
use crate::surface::{Color, PixelBuffer, TextureId, Visual};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Visual box (what gets drawn)
    pub extent: Size,
    /// Collision box; defaults to `extent`
    pub collider: Size,
    /// Whether the gravity pass touches this body
    pub gravity: bool,
    /// Whether other bodies collide against this one
    pub collide: bool,
    /// Sides currently in contact, rebuilt each collision pass
    pub hit: HitSides,
    pub visual: Visual,
}

impl Body {
    pub fn new(visual: Visual, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            extent: Size::new(width, height),
            collider: Size::new(width, height),
            gravity: false,
            collide: false,
            hit: HitSides::default(),
            visual,
        }
    }

    /// A solid colored rectangle.
    pub fn rect(width: f32, height: f32, color: Color) -> Self {
        Self::new(Visual::Rect { color }, width, height)
    }

    /// An externally loaded image.
    pub fn image(texture: TextureId, width: f32, height: f32) -> Self {
        Self::new(Visual::Image { texture }, width, height)
    }

    /// A raw pixel blit; the extent mirrors the buffer dimensions.
    pub fn pixels(buffer: PixelBuffer) -> Self {
        let (w, h) = (buffer.width as f32, buffer.height as f32);
        Self::new(Visual::Pixels { buffer }, w, h)
    }

    /// A simulated body that never draws.
    pub fn invisible(width: f32, height: f32) -> Self {
        Self::new(Visual::None, width, height)
    }

    /// Integrate velocity into position over `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
    }

    /// One gravity step: `velocity.y += (|velocity.y * 0.06| + 10) * multiplier`.
    ///
    /// The pull grows with the vertical speed already reached - a
    /// self-reinforcing accumulation, not a constant acceleration. The
    /// formula is part of the engine's contract; tuning happens through
    /// `multiplier`.
    pub fn apply_gravity(&mut self, multiplier: f32) {
        if !self.gravity {
            return;
        }
        self.velocity.y += ((self.velocity.y * GRAVITY_DRAG).abs() + GRAVITY_PULL) * multiplier;
    }

    /// Inclusive AABB overlap against another body's collision box.
    pub fn overlaps(&self, other: &Body) -> bool {
        collision::overlaps(&self.position, &self.collider, &other.position, &other.collider)
    }

    /// Resolve one contact: pick the dominant penetration axis from the
    /// signed center deltas and push this body out along it.
    ///
    /// The horizontal branch always zeroes `velocity.x`; the vertical
    /// branch leaves `velocity.y` alone and relies on
    /// [`Body::update_movement`] to clamp it against the flag it set.
    pub fn respond(&mut self, obstacle: &Obstacle) {
        let dx = self.position.x - obstacle.position.x;
        let dy = self.position.y - obstacle.position.y;

        if dx.abs() > dy.abs() {
            if self.velocity.x > 0.0 {
                self.position.x = obstacle.position.x
                    - obstacle.collider.half_width()
                    - self.collider.half_width()
                    - CONTACT_GAP;
                self.hit.right = true;
            } else if self.velocity.x < 0.0 {
                self.position.x = obstacle.position.x
                    + obstacle.collider.half_width()
                    + self.collider.half_width()
                    + CONTACT_GAP;
                self.hit.left = true;
            }
            self.velocity.x = 0.0;
        } else {
            if self.velocity.y > 0.0 {
                self.position.y = obstacle.position.y
                    - obstacle.collider.half_height()
                    - self.collider.half_height()
                    - CONTACT_GAP;
                self.hit.down = true;
            } else if self.velocity.y < 0.0 {
                self.position.y = obstacle.position.y
                    + obstacle.collider.half_height()
                    + self.collider.half_height()
                    + CONTACT_GAP;
                self.hit.up = true;
            }
        }
    }

    /// Resolve this body against a candidate snapshot.
    ///
    /// Clears all four hit flags, then sweeps the candidates in reverse
    /// order, testing overlap against the body's position *at that moment*.
    /// There is no re-test loop: a response can move the body out of
    /// overlap with an earlier-indexed candidate without that pair ever
    /// being checked, so results are order-dependent. Cheap by design.
    pub fn apply_collision(&mut self, obstacles: &[Obstacle]) {
        self.hit.clear();

        for obstacle in obstacles.iter().rev() {
            if collision::overlaps(
                &self.position,
                &self.collider,
                &obstacle.position,
                &obstacle.collider,
            ) {
                self.respond(obstacle);
            }
        }
    }

    /// Zero each velocity component that points into a flagged contact
    /// side. Runs every frame after collision resolution; this is what
    /// actually stops vertical motion on a floor hit.
    pub fn update_movement(&mut self) {
        if self.velocity.x > 0.0 && self.hit.right {
            self.velocity.x = 0.0;
        }
        if self.velocity.x < 0.0 && self.hit.left {
            self.velocity.x = 0.0;
        }
        if self.velocity.y > 0.0 && self.hit.down {
            self.velocity.y = 0.0;
        }
        if self.velocity.y < 0.0 && self.hit.up {
            self.velocity.y = 0.0;
        }
    }
}
