//! Engine-independent 2D geometry.
//!
//! Every entity owns an explicit position and size; collision and proximity
//! are computed arithmetically from these values, never from a rendered scene.
//! Coordinates are screen-style: `x` grows rightward, `y` grows downward.

/// Continuous 2D coordinate or displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the unit vector in the same direction, or zero when stationary.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl core::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rectangle of `size` whose top-left corner sits at `origin`.
    pub fn at(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Midpoint of the top edge; used as the anchor for interaction hints.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y)
    }

    /// Midpoint of the bottom edge (the "feet" of a standing sprite).
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    pub fn with_origin(&self, origin: Vec2) -> Self {
        Self::new(origin.x, origin.y, self.w, self.h)
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Grown by `amount` on every side.
    pub fn inflated(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.w + amount * 2.0,
            self.h + amount * 2.0,
        )
    }
}

/// Minimal axis-aligned gap between two rectangles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeGap {
    pub dx: f32,
    pub dy: f32,
    pub max: f32,
}

/// Strict overlap test: rectangles that merely touch do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.left()
        || a.left() >= b.right()
        || a.bottom() <= b.top()
        || a.top() >= b.bottom())
}

/// Standard range clamp. When `max < min` (a box larger than its bounds),
/// `min` wins so the result stays anchored at the origin.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Edge-to-edge gap; each component is zero when the rectangles touch or
/// overlap on that axis.
pub fn edge_gap(a: &Rect, b: &Rect) -> EdgeGap {
    let dx = (b.left() - a.right()).max(a.left() - b.right()).max(0.0);
    let dy = (b.top() - a.bottom()).max(a.top() - b.bottom()).max(0.0);
    EdgeGap {
        dx,
        dy,
        max: dx.max(dy),
    }
}

/// Distance between the centres of two rectangles.
pub fn center_distance(a: &Rect, b: &Rect) -> f32 {
    (a.center() - b.center()).length()
}
