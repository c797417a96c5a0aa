//! 2D vector math
//!
//! `Vector2` is the value type behind every position and velocity in the
//! engine. Unlike the usual copy-by-value vector, its mutators operate in
//! place and return `&mut Self` so calls chain:
//!
//! ```
//! use stage2d::Vector2;
//!
//! let mut v = Vector2::new(3.0, 4.0);
//! v.normalize().multiply(10.0);
//! assert!((v.length() - 10.0).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};

/// A 2D vector with in-place, chainable mutators.
///
/// Deliberately not `Copy`: positions and velocities are shared mutable
/// state, and the distinction between [`Vector2::clone`] (new instance) and
/// [`Vector2::copy`] (the same instance) must stay visible at call sites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns the *same* instance.
    ///
    /// This is an identity alias, not a duplicate; use [`Clone::clone`] for
    /// an independent vector. Both exist because callers rely on either
    /// semantics.
    pub fn copy(&mut self) -> &mut Self {
        self
    }

    /// Set both components.
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Add another vector component-wise.
    pub fn add(&mut self, v: &Vector2) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    /// Subtract another vector component-wise.
    pub fn sub(&mut self, v: &Vector2) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    /// Scale by `s`.
    pub fn multiply(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    /// Divide by `s`.
    ///
    /// A zero or NaN divisor resets the vector to `(0, 0)` instead of
    /// producing infinities or NaN components.
    pub fn divide(&mut self, s: f32) -> &mut Self {
        if s == 0.0 || s.is_nan() {
            self.set(0.0, 0.0)
        } else {
            self.x /= s;
            self.y /= s;
            self
        }
    }

    /// Flip both components.
    pub fn invert(&mut self) -> &mut Self {
        self.multiply(-1.0)
    }

    /// Euclidean norm.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scale to unit length. A zero vector stays `(0, 0)` (via the
    /// [`Vector2::divide`] guard).
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        self.divide(len)
    }

    /// Scale to length `l`, preserving direction.
    pub fn set_length(&mut self, l: f32) -> &mut Self {
        self.normalize().multiply(l)
    }
}
