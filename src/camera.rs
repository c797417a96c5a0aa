//! Viewport tracking
//!
//! The camera derives a translation offset that render calls subtract from
//! entity-space coordinates. It either pins itself to a followed body or
//! eases toward a stored goal point; the `going` flag decides which mode is
//! authoritative, never both.

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_ARRIVAL_EPSILON, DEFAULT_CAMERA_ANCHOR, DEFAULT_CAMERA_SPEED};
use crate::math::Vector2;
use crate::stage::{NodeId, Stage};

/// Construction options, all defaulted to the stock camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Easing divisor for goal-point travel (higher is slower)
    pub speed: f32,
    /// Fractional viewport bias per axis, in `[0, 1]`; `(0.5, 0.5)`
    /// centers the target
    pub anchor: Vector2,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_CAMERA_SPEED,
            anchor: Vector2::new(DEFAULT_CAMERA_ANCHOR, DEFAULT_CAMERA_ANCHOR),
            width: 640.0,
            height: 480.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current viewport offset, subtracted from entity coordinates when
    /// rendering
    pub position: Vector2,
    pub speed: f32,
    pub anchor: Vector2,
    pub width: f32,
    pub height: f32,
    target: Option<NodeId>,
    goal: Vector2,
    going: bool,
}

impl Camera {
    pub fn new(options: CameraOptions) -> Self {
        Self {
            position: Vector2::zero(),
            speed: options.speed,
            anchor: options.anchor,
            width: options.width,
            height: options.height,
            target: None,
            goal: Vector2::zero(),
            going: false,
        }
    }

    /// Follow a body. Takes effect on the next [`Camera::run`] unless a
    /// goal point is currently authoritative; does not touch `going`.
    pub fn follow(&mut self, body: NodeId) {
        self.target = Some(body);
    }

    /// The followed body, if any.
    pub fn followed(&self) -> Option<NodeId> {
        self.target
    }

    /// Store a goal point and make it authoritative over following.
    pub fn go_to_point(&mut self, x: f32, y: f32) {
        self.goal.set(x, y);
        self.going = true;
    }

    /// Whether a goal point currently overrides following.
    pub fn is_going(&self) -> bool {
        self.going
    }

    /// Recompute the viewport offset.
    ///
    /// Following pins the offset to the body's position biased by the
    /// anchor. Goal travel eases toward the anchored goal by `1/speed` of
    /// the remaining distance per call and hands authority back to
    /// following on arrival.
    pub fn run(&mut self, stage: &Stage) {
        if self.going {
            let desired_x = self.goal.x - self.width * self.anchor.x;
            let desired_y = self.goal.y - self.height * self.anchor.y;
            let dx = desired_x - self.position.x;
            let dy = desired_y - self.position.y;

            if (dx * dx + dy * dy).sqrt() < CAMERA_ARRIVAL_EPSILON {
                self.position.set(desired_x, desired_y);
                self.going = false;
                log::debug!("camera arrived at goal ({}, {})", self.goal.x, self.goal.y);
            } else {
                self.position.x += dx / self.speed;
                self.position.y += dy / self.speed;
            }
        } else if let Some(id) = self.target {
            if let Some(body) = stage.body(id) {
                self.position.x = body.position.x - self.width * self.anchor.x;
                self.position.y = body.position.y - self.height * self.anchor.y;
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}
