use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::Vec2F;

/// A signed 2D integer vector, used for positions and sizes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
}

impl Vec2 {
    /// Construct a new vector.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// A vector with both components set to `v`.
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v }
    }

    /// Return true when both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Convert to a float vector.
    pub fn as_f32(self) -> Vec2F {
        Vec2F::new(self.x as f32, self.y as f32)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<i32> for Vec2 {
    type Output = Self;

    fn mul(self, k: i32) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
        }
    }
}

impl Div<i32> for Vec2 {
    type Output = Self;

    fn div(self, k: i32) -> Self {
        Self {
            x: self.x / k,
            y: self.y / k,
        }
    }
}

impl From<(i32, i32)> for Vec2 {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(3, 4);
        let b = Vec2::new(1, 6);
        assert_eq!(a + b, Vec2::new(4, 10));
        assert_eq!(a - b, Vec2::new(2, -2));
        assert_eq!(-a, Vec2::new(-3, -4));
        assert_eq!(a * 2, Vec2::new(6, 8));
        assert_eq!(Vec2::new(9, 5) / 2, Vec2::new(4, 2));
    }

    #[test]
    fn cwise() {
        let a = Vec2::new(3, 8);
        let b = Vec2::new(5, 2);
        assert_eq!(a.min(b), Vec2::new(3, 2));
        assert_eq!(a.max(b), Vec2::new(5, 8));
    }

    proptest! {
        #[test]
        fn clamp_stays_inside(
            x in -1000i32..1000, y in -1000i32..1000,
            w in 0i32..500, h in 0i32..500,
        ) {
            let hi = Vec2::new(w, h);
            let c = Vec2::new(x, y).max(Vec2::zero()).min(hi);
            prop_assert!(c.x >= 0 && c.x <= w);
            prop_assert!(c.y >= 0 && c.y <= h);
        }
    }
}
