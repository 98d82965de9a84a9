//! Per-frame context handed to effects by the host

use chaos_core::Vec3;

/// Axis-aligned bounds of the LED model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or None for an empty set
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the box diagonal
    pub fn diameter(&self) -> f32 {
        (self.max - self.min).length()
    }

    /// Euclidean distance from `p` to the box; zero when inside
    pub fn distance_outside(&self, p: Vec3) -> f32 {
        let dx = (self.min.x - p.x).max(p.x - self.max.x).max(0.0);
        let dy = (self.min.y - p.y).max(p.y - self.max.y).max(0.0);
        let dz = (self.min.z - p.z).max(p.z - self.max.z).max(0.0);
        Vec3::new(dx, dy, dz).length()
    }
}

/// Timing and geometry for one host frame
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
    /// Seconds since the previous frame
    pub time_delta: f32,
    /// Model scale used to size particle radii
    pub model_diameter: f32,
    pub bounds: BoundingBox,
}

impl FrameInfo {
    pub fn new(bounds: BoundingBox, time_delta: f32) -> Self {
        Self {
            time_delta,
            model_diameter: bounds.diameter(),
            bounds,
        }
    }

    pub fn distance_outside_bounding_box(&self, p: Vec3) -> f32 {
        self.bounds.distance_outside(p)
    }
}
