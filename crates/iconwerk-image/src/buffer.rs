// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory RGBA pixel buffer shared by every pipeline stage.

use iconwerk_core::error::{IconwerkError, Result};
use image::{DynamicImage, Rgba, RgbaImage};

/// Dense row-major RGBA8 image, origin top-left.
///
/// Stages take the buffer by value and hand back a new one, so exactly one
/// stage owns the pixels at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    // -- Construction ---------------------------------------------------------

    /// A fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// A buffer filled with a single RGBA value.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    /// Wrap raw RGBA8 samples. `samples.len()` must be `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let len = samples.len();
        let image = RgbaImage::from_raw(width, height, samples).ok_or_else(|| {
            IconwerkError::decode(format!(
                "{len} samples do not form a {width}x{height} RGBA image"
            ))
        })?;
        Ok(Self { image })
    }

    /// Wrap an already-decoded image, promoting it to RGBA8.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Number of pixels (not samples).
    pub fn pixel_count(&self) -> usize {
        self.image.as_raw().len() / 4
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.image.put_pixel(x, y, Rgba(rgba));
    }

    /// All samples, four per pixel, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Mutable pixel slices of length 4, row-major.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.image.chunks_exact_mut(4)
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }
}
