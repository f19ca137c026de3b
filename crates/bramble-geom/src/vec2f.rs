use std::ops::{Add, Mul, Neg, Sub};

/// A 2D float vector, used on the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2F {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2F {
    /// Construct a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// Truncate both components towards zero.
    pub fn trunc(self) -> super::Vec2 {
        super::Vec2::new(self.x as i32, self.y as i32)
    }
}

impl Add for Vec2F {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2F {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2F {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2F {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl From<(f32, f32)> for Vec2F {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}
