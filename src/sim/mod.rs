//! Physics simulation module
//!
//! Everything here is pure and synchronous: bodies mutate in place, passes
//! run in a fixed order, and there is no platform or rendering dependency.
//! Correctness rests on pass ordering (gravity before integration before
//! collision before the movement clamp), not on locking - there is no
//! concurrent access to lock against.

pub mod body;
pub mod collision;
pub mod tick;

pub use body::Body;
pub use collision::{HitSides, Obstacle, Size, overlaps};
pub use tick::{Clock, TickInput, tick};
