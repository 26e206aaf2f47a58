use crate::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Default> Rect<T> {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn contains_point(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < max.x
            && point.y < max.y
    }

    pub fn intersects(&self, other: Rect<T>) -> bool {
        let self_max = self.max();
        let other_max = other.max();
        self.origin.x < other_max.x
            && other.origin.x < self_max.x
            && self.origin.y < other_max.y
            && other.origin.y < self_max.y
    }
}

impl<T: std::ops::Add<Output = T> + std::ops::Sub<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn intersection(&self, other: Rect<T>) -> Option<Rect<T>> {
        if !self.intersects(other) {
            return None;
        }
        let self_max = self.max();
        let other_max = other.max();

        let pick_max = |a: T, b: T| if a > b { a } else { b };
        let pick_min = |a: T, b: T| if a < b { a } else { b };

        let min = Vec2::new(
            pick_max(self.origin.x, other.origin.x),
            pick_max(self.origin.y, other.origin.y),
        );
        let max = Vec2::new(
            pick_min(self_max.x, other_max.x),
            pick_min(self_max.y, other_max.y),
        );

        Some(Rect::from_min_max(min, max))
    }
}

impl Rect<f32> {
    pub fn center(&self) -> Vec2<f32> {
        self.origin + self.size * 0.5
    }

    /// True when either side is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
            || !self.size.x.is_finite()
            || !self.size.y.is_finite()
            || !self.origin.x.is_finite()
            || !self.origin.y.is_finite()
    }
}
