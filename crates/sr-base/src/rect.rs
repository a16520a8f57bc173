use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn contains_rect(&self, other: Rect<T>) -> bool {
        let self_max = self.max();
        let other_max = other.max();
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other_max.x <= self_max.x
            && other_max.y <= self_max.y
    }
}

impl Rect<usize> {
    /// Rectangle covering a whole `width` x `height` surface.
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(Vec2::zero(), Vec2::new(width, height))
    }

    /// Slide the rectangle inside `bounds`, keeping its size.
    ///
    /// Each axis follows `max(lo, min(hi - size - 1, pos))`, so the rectangle
    /// always keeps one pixel clear of the far edge. Returns `None` when the
    /// rectangle is too large to fit.
    pub fn clamp_within(&self, bounds: Rect<usize>) -> Option<Rect<usize>> {
        let max = bounds.max();
        let last_x = max.x.checked_sub(self.size.x + 1)?;
        let last_y = max.y.checked_sub(self.size.y + 1)?;
        if last_x < bounds.origin.x || last_y < bounds.origin.y {
            return None;
        }
        let x = self.origin.x.min(last_x).max(bounds.origin.x);
        let y = self.origin.y.min(last_y).max(bounds.origin.y);
        Some(Rect::new(Vec2::new(x, y), self.size))
    }
}
