//! stage2d - a 2D scene-graph and AABB physics core
//!
//! The simulation core of a canvas-style game, with rendering and asset
//! loading kept behind boundary traits:
//! - `math`: chainable 2D vector
//! - `children`: the ordered child-list capability shared by all containers
//! - `stage`: node arena, tree mutation, per-frame passes
//! - `sim`: physics bodies, collision resolution, frame orchestration
//! - `pool`: fixed-capacity FIFO body reservoir
//! - `camera`: follow/goal viewport tracking
//! - `surface`: the drawing-surface contract consumed by render calls

pub mod camera;
pub mod children;
pub mod error;
pub mod math;
pub mod pool;
pub mod sim;
pub mod stage;
pub mod surface;

pub use camera::{Camera, CameraOptions};
pub use children::ChildList;
pub use error::StageError;
pub use math::Vector2;
pub use pool::Pool;
pub use sim::{Body, Clock, HitSides, Size, TickInput, tick};
pub use stage::{Group, Node, NodeId, NodeKind, Stage};
pub use surface::{Color, DrawSurface, PixelBuffer, TextureId, Visual};

/// Engine tuning constants
pub mod consts {
    /// Base downward pull added to vertical velocity each gravity pass
    pub const GRAVITY_PULL: f32 = 10.0;
    /// Fraction of current vertical speed added on top of the base pull.
    /// Gravity therefore accumulates nonlinearly - it is proportional to
    /// the speed already reached, not a constant acceleration.
    pub const GRAVITY_DRAG: f32 = 0.06;

    /// Gap left between boxes when a collision response clamps a body
    /// against an obstacle edge
    pub const CONTACT_GAP: f32 = 1.0;

    /// Default pool capacity
    pub const DEFAULT_POOL_CAPACITY: usize = 500;

    /// Default camera easing divisor (higher is slower)
    pub const DEFAULT_CAMERA_SPEED: f32 = 25.0;
    /// Default camera anchor (centered viewport)
    pub const DEFAULT_CAMERA_ANCHOR: f32 = 0.5;
    /// Distance at which a moving camera counts as arrived at its goal
    pub const CAMERA_ARRIVAL_EPSILON: f32 = 0.5;
}
