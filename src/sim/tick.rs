//! Frame orchestration
//!
//! One `tick` is one ordered sweep: gravity, integration, collision
//! resolution, movement clamp, camera. Rendering is the caller's step,
//! fed by body state plus the camera offset. The order is load-bearing -
//! the movement clamp in particular must run after collision resolution,
//! because it is what finally stops vertical motion against a flagged
//! contact.

use std::time::Instant;

use crate::camera::Camera;
use crate::stage::{NodeId, Stage};

/// Per-frame parameters, assembled by the host loop.
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Elapsed seconds for the integration pass; `None` is the unit step
    pub dt: Option<f32>,
    /// Gravity multiplier for this frame
    pub gravity: f32,
    /// Candidate set every collidable body resolves against
    pub colliders: Vec<NodeId>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: None,
            gravity: 1.0,
            colliders: Vec::new(),
        }
    }
}

/// Advance the whole scene by one frame.
pub fn tick(stage: &mut Stage, camera: &mut Camera, input: &TickInput) {
    stage.apply_gravity(input.gravity);
    stage.update_positions(input.dt);
    if let Err(e) = stage.resolve_collisions(stage.root(), &input.colliders) {
        // unreachable with a live root; surfaced rather than propagated
        // because the collision pass itself never raises
        log::warn!("collision pass skipped: {e}");
    }
    stage.update_movement();
    camera.run(stage);
}

/// Wall-clock frame delta, for hosts that do not bring their own timing.
#[derive(Debug)]
pub struct Clock {
    last: Instant,
    /// Seconds between the two most recent ticks
    pub delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            delta: 0.0,
        }
    }

    /// Advance the clock and return the elapsed seconds since the previous
    /// tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
