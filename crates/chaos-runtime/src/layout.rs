//! LED model layouts in Open Pixel Control JSON form

use crate::frame::BoundingBox;
use chaos_core::{ChaosError, Result, Vec3};
use serde::Deserialize;
use std::path::Path;

/// One layout entry. Layout generators attach extra per-LED fields
/// (grid coordinates, block angles) which are ignored here.
#[derive(Deserialize)]
struct LayoutEntry {
    point: [f32; 3],
}

/// Positions of every LED in the model
#[derive(Clone, Debug)]
pub struct ModelLayout {
    points: Vec<Vec3>,
}

impl ModelLayout {
    /// Build a layout from raw points. Fails on an empty set.
    pub fn from_points(points: Vec<Vec3>) -> Result<Self> {
        if points.is_empty() {
            return Err(ChaosError::LayoutError("layout has no points".into()));
        }
        Ok(Self { points })
    }

    /// Parse a JSON array of `{ "point": [x, y, z] }` objects.
    /// `null` entries mark unused channels and are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Option<LayoutEntry>> = serde_json::from_str(json)
            .map_err(|e| ChaosError::LayoutError(format!("invalid layout JSON: {e}")))?;
        let points = entries
            .into_iter()
            .flatten()
            .map(|entry| Vec3::from_array(entry.point))
            .collect();
        Self::from_points(points)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let layout = Self::from_json(&json).map_err(|e| match e {
            ChaosError::LayoutError(msg) => {
                ChaosError::LayoutError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::info!(
            "Loaded layout {} ({} points)",
            path.display(),
            layout.points.len()
        );
        Ok(layout)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        // Never empty, guaranteed by the constructors
        BoundingBox::from_points(&self.points)
            .unwrap_or_else(|| BoundingBox::new(Vec3::ZERO, Vec3::ZERO))
    }
}
