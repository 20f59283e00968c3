// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Aspect-aware resizing with Lanczos3 resampling.

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::types::ResizeSpec;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, Rgba32FImage, RgbaImage};
use tracing::{debug, info, instrument};

use crate::buffer::PixelBuffer;

/// Resampling filter for every resize. Icon downscaling needs a windowed
/// sinc; nearest and box filters are not acceptable here.
const FILTER: FilterType = FilterType::Lanczos3;

/// Largest accepted output edge. Anything bigger is a bad size hint, not an icon.
pub const MAX_DIMENSION: u32 = 16_384;

/// Resolves a [`ResizeSpec`] against a source size and resamples.
///
/// Stateless: the spec is passed per call, so one resizer serves every image
/// in a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResizer;

impl ImageResizer {
    pub fn new() -> Self {
        Self
    }

    /// Output dimensions for a `width` x `height` source.
    ///
    /// Resolution order:
    /// 1. aspect ratio off and both axes set: use them as given;
    /// 2. only width set: height follows the source aspect ratio;
    /// 3. only height set: width follows the source aspect ratio;
    /// 4. otherwise each axis is the requested value or the source value.
    ///    Step 4 does not enforce the aspect ratio even when both axes are set
    ///    with `keep_aspect_ratio`.
    ///
    /// Derived values are rounded half away from zero. Any non-positive
    /// result, or one above [`MAX_DIMENSION`], is an `InvalidDimension` error.
    pub fn target_dimensions(spec: &ResizeSpec, width: u32, height: u32) -> Result<(u32, u32)> {
        let (src_w, src_h) = (i64::from(width), i64::from(height));
        let (new_w, new_h) = match (spec.width, spec.height) {
            (Some(w), Some(h)) if !spec.keep_aspect_ratio => (i64::from(w), i64::from(h)),
            (Some(w), None) => (i64::from(w), scale(w, src_h, src_w)?),
            (None, Some(h)) => (scale(h, src_w, src_h)?, i64::from(h)),
            (w, h) => (
                w.map_or(src_w, i64::from),
                h.map_or(src_h, i64::from),
            ),
        };

        let in_range = |v: i64| (1..=i64::from(MAX_DIMENSION)).contains(&v);
        match (u32::try_from(new_w), u32::try_from(new_h)) {
            (Ok(w), Ok(h)) if in_range(new_w) && in_range(new_h) => Ok((w, h)),
            _ => Err(IconwerkError::InvalidDimension {
                width: new_w,
                height: new_h,
            }),
        }
    }

    /// Resample `buffer` to the dimensions `spec` resolves to.
    ///
    /// When those equal the current dimensions the buffer is returned as-is.
    #[instrument(skip(self, buffer), fields(from_w = buffer.width(), from_h = buffer.height()))]
    pub fn resize(&self, buffer: PixelBuffer, spec: &ResizeSpec) -> Result<PixelBuffer> {
        let (width, height) = buffer.dimensions();
        let (new_w, new_h) = Self::target_dimensions(spec, width, height)?;

        if (new_w, new_h) == (width, height) {
            debug!("Target matches source; skipping resample");
            return Ok(buffer);
        }

        info!(new_w, new_h, "Resizing image");
        let resized = resample_premultiplied(buffer.as_rgba_image(), new_w, new_h);
        Ok(PixelBuffer::from_rgba_image(resized))
    }
}

/// Lanczos3 resample with color weighted by alpha.
///
/// Colors are premultiplied before filtering and divided back out after, so
/// the RGB of fully transparent pixels never reaches visible ones. Output
/// pixels with zero alpha get zero RGB.
fn resample_premultiplied(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied: Rgba32FImage = ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b, a] = src.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });

    let resized = imageops::resize(&premultiplied, width, height, FILTER);

    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let alpha = to_u8(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
    })
}

fn to_u8(unit: f32) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `round(value * numerator / denominator)`, refusing a zero-sized source.
fn scale(value: u32, numerator: i64, denominator: i64) -> Result<i64> {
    if denominator == 0 {
        return Err(IconwerkError::InvalidDimension {
            width: numerator,
            height: denominator,
        });
    }
    let scaled = f64::from(value) * numerator as f64 / denominator as f64;
    Ok(scaled.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(spec: ResizeSpec, w: u32, h: u32) -> (u32, u32) {
        ImageResizer::target_dimensions(&spec, w, h).expect("valid dimensions")
    }

    #[test]
    fn width_only_keeps_aspect_ratio() {
        assert_eq!(dims(ResizeSpec::to_width(32), 100, 50), (32, 16));
    }

    #[test]
    fn height_only_keeps_aspect_ratio() {
        assert_eq!(dims(ResizeSpec::to_height(25), 100, 50), (50, 25));
    }

    #[test]
    fn derived_axis_is_rounded() {
        // 16 * 30 / 64 = 7.5
        assert_eq!(dims(ResizeSpec::to_width(16), 64, 30), (16, 8));
        // 16 * 29 / 64 = 7.25
        assert_eq!(dims(ResizeSpec::to_width(16), 64, 29), (16, 7));
    }

    #[test]
    fn unset_axes_are_identity() {
        assert_eq!(dims(ResizeSpec::default(), 100, 50), (100, 50));
        assert_eq!(dims(ResizeSpec::new(None, None, false), 7, 9), (7, 9));
    }

    #[test]
    fn exact_resize_distorts() {
        assert_eq!(dims(ResizeSpec::exact(50, 50), 100, 200), (50, 50));
    }

    #[test]
    fn both_axes_with_aspect_ratio_are_taken_literally() {
        assert_eq!(dims(ResizeSpec::new(Some(50), Some(50), true), 100, 200), (50, 50));
    }

    #[test]
    fn width_only_without_aspect_flag_still_derives_height() {
        assert_eq!(dims(ResizeSpec::new(Some(32), None, false), 100, 50), (32, 16));
    }

    #[test]
    fn zero_width_is_invalid() {
        let err = ImageResizer::target_dimensions(&ResizeSpec::exact(0, 10), 10, 10).unwrap_err();
        assert!(matches!(
            err,
            IconwerkError::InvalidDimension { width: 0, height: 10 }
        ));
    }

    #[test]
    fn derived_axis_rounding_to_zero_is_invalid() {
        // 1 * 1 / 100 rounds to 0.
        let err = ImageResizer::target_dimensions(&ResizeSpec::to_width(1), 100, 1).unwrap_err();
        assert!(matches!(err, IconwerkError::InvalidDimension { height: 0, .. }));
    }

    #[test]
    fn oversized_target_is_invalid() {
        let err = ImageResizer::target_dimensions(&ResizeSpec::to_width(100_000), 32, 32)
            .unwrap_err();
        assert!(matches!(
            err,
            IconwerkError::InvalidDimension { width: 100_000, height: 100_000 }
        ));
        assert_eq!(
            dims(ResizeSpec::to_width(MAX_DIMENSION), 32, 32),
            (MAX_DIMENSION, MAX_DIMENSION)
        );
    }

    #[test]
    fn empty_source_is_invalid() {
        assert!(ImageResizer::target_dimensions(&ResizeSpec::to_width(8), 0, 0).is_err());
        assert!(ImageResizer::target_dimensions(&ResizeSpec::default(), 0, 0).is_err());
    }

    #[test]
    fn resize_produces_target_buffer() {
        let buffer = PixelBuffer::from_pixel(100, 50, [10, 200, 30, 255]);
        let out = ImageResizer::new()
            .resize(buffer, &ResizeSpec::to_width(32))
            .expect("resize");
        assert_eq!(out.dimensions(), (32, 16));
        // A flat color survives Lanczos resampling unchanged.
        assert_eq!(out.pixel(15, 8), [10, 200, 30, 255]);
    }

    /// Transparent neighbours must not tint the edge of an opaque region.
    #[test]
    fn transparent_color_does_not_bleed_into_edges() {
        let mut buffer = PixelBuffer::new(64, 8);
        for y in 0..8 {
            for x in 0..64 {
                let px = if x < 32 { [117, 117, 117, 255] } else { [255, 255, 255, 0] };
                buffer.put_pixel(x, y, px);
            }
        }

        let out = ImageResizer::new()
            .resize(buffer, &ResizeSpec::to_width(16))
            .expect("resize");
        assert_eq!(out.dimensions(), (16, 2));

        let edge = out.pixel(7, 1);
        assert!(edge[3] > 0 && edge[3] < 255, "edge alpha {edge:?}");
        assert!(
            edge[..3].iter().all(|c| c.abs_diff(117) <= 1),
            "edge picked up transparent color: {edge:?}"
        );
        assert_eq!(out.pixel(2, 0), [117, 117, 117, 255]);
        assert_eq!(out.pixel(14, 0)[3], 0);
    }

    #[test]
    fn identity_resize_returns_same_pixels() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.put_pixel(1, 2, [9, 8, 7, 6]);
        let out = ImageResizer::new()
            .resize(buffer.clone(), &ResizeSpec::default())
            .expect("resize");
        assert_eq!(out, buffer);
    }
}
