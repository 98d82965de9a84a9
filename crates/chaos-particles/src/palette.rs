//! Color palettes sampled by particle generation and color cycle

use chaos_core::{ChaosError, Color, Result};
use image::RgbImage;
use std::path::Path;

/// Anything that maps palette coordinates to a color
pub trait PaletteSampler {
    /// Sample at (`u`, `v`). `u` wraps horizontally; `v` clamps.
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// An RGB image with bilinear sampling
#[derive(Clone, Debug)]
pub struct Palette {
    /// Row-major pixels
    pixels: Vec<Color>,
    pub width: u32,
    pub height: u32,
}

impl Palette {
    /// Load a palette from any image format the `image` crate decodes
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            ChaosError::PaletteError(format!(
                "Failed to load palette '{}': {}",
                path.display(),
                e
            ))
        })?;
        let palette = Self::from_image(&img.to_rgb8())?;
        log::info!(
            "Loaded palette {} ({}x{})",
            path.display(),
            palette.width,
            palette.height
        );
        Ok(palette)
    }

    pub fn from_image(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ChaosError::PaletteError("palette image is empty".into()));
        }
        let pixels = img.pixels().map(|p| Color::from_rgb8(p.0)).collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// A single-row palette interpolating evenly between `stops`
    pub fn gradient(stops: &[Color], width: u32) -> Result<Self> {
        if stops.is_empty() || width == 0 {
            return Err(ChaosError::PaletteError(
                "gradient needs at least one stop and a nonzero width".into(),
            ));
        }
        let pixels = ramp(stops, width, false);
        Ok(Self {
            pixels,
            width,
            height: 1,
        })
    }

    /// Built-in fiery palette used when no image is supplied
    pub fn ember() -> Self {
        let stops = [
            Color::from_hex(0x1a0433),
            Color::from_hex(0x8c1a6a),
            Color::from_hex(0xf2542d),
            Color::from_hex(0xf5b82e),
            Color::from_hex(0xfff4d6),
            Color::from_hex(0x3fa7d6),
            Color::from_hex(0x1a0433),
        ];
        let pixels = ramp(&stops, 256, true);
        Self {
            pixels,
            width: 256,
            height: 1,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self {
            pixels: vec![color],
            width: 1,
            height: 1,
        }
    }

    fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Evenly spaced interpolation through `stops`. A `closed` ramp leaves
/// the last stop for the wrap back to texel 0.
fn ramp(stops: &[Color], width: u32, closed: bool) -> Vec<Color> {
    let segments = (stops.len() - 1) as f32;
    let span = if closed { width } else { width.saturating_sub(1).max(1) };
    (0..width)
        .map(|x| {
            let pos = x as f32 / span as f32 * segments;
            let i = (pos as usize).min(stops.len() - 1);
            let next = (i + 1).min(stops.len() - 1);
            stops[i].lerp(&stops[next], pos - i as f32)
        })
        .collect()
}

impl PaletteSampler for Palette {
    fn sample(&self, u: f32, v: f32) -> Color {
        // Texel centers sit at half-integer coordinates
        let fx = (u * self.width as f32 - 0.5).rem_euclid(self.width as f32);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);

        let x0 = (fx as u32).min(self.width - 1);
        let y0 = (fy as u32).min(self.height - 1);
        let x1 = (x0 + 1) % self.width;
        let y1 = (y0 + 1).min(self.height - 1);

        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let top = self.get(x0, y0).lerp(&self.get(x1, y0), tx);
        let bottom = self.get(x0, y1).lerp(&self.get(x1, y1), tx);
        top.lerp(&bottom, ty)
    }
}
