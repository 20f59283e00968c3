// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Threshold recoloring — swaps near-white pixels for a dark fill and
// near-black pixels for a light fill, leaving alpha and mid-tones alone.

use iconwerk_core::types::ColorRule;
use tracing::{debug, instrument, warn};

use crate::buffer::PixelBuffer;

/// Per-pixel classification computed from the untouched source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdMasks {
    pub near_white: Vec<bool>,
    pub near_black: Vec<bool>,
}

impl ThresholdMasks {
    pub fn near_white_count(&self) -> usize {
        self.near_white.iter().filter(|hit| **hit).count()
    }

    pub fn near_black_count(&self) -> usize {
        self.near_black.iter().filter(|hit| **hit).count()
    }
}

/// Applies a [`ColorRule`] to whole buffers.
///
/// Both masks are built from the source before any pixel is written, so a
/// substituted pixel is never classified a second time. Near-white fills are
/// applied first and near-black fills second: with overlapping thresholds a
/// pixel in both masks ends up with the near-black fill.
#[derive(Debug, Clone, Copy)]
pub struct ColorTransformer {
    rule: ColorRule,
}

impl ColorTransformer {
    pub fn new(rule: ColorRule) -> Self {
        if rule.thresholds_overlap() {
            warn!(
                white_threshold = rule.white_threshold,
                black_threshold = rule.black_threshold,
                "Color thresholds overlap; near-black fill wins for pixels in both bands"
            );
        }
        Self { rule }
    }

    fn is_near_white(&self, rgba: &[u8; 4]) -> bool {
        let t = self.rule.white_threshold;
        rgba[0] >= t && rgba[1] >= t && rgba[2] >= t
    }

    fn is_near_black(&self, rgba: &[u8; 4]) -> bool {
        let t = self.rule.black_threshold;
        rgba[0] <= t && rgba[1] <= t && rgba[2] <= t
    }

    /// Classify every pixel of `buffer` without modifying it.
    pub fn masks(&self, buffer: &PixelBuffer) -> ThresholdMasks {
        let pixels = buffer.as_rgba_image().pixels();
        let (near_white, near_black): (Vec<bool>, Vec<bool>) = pixels
            .map(|px| (self.is_near_white(&px.0), self.is_near_black(&px.0)))
            .unzip();
        ThresholdMasks {
            near_white,
            near_black,
        }
    }

    /// Recolor `buffer`, returning it with R, G, B substituted where the masks
    /// hit. Alpha is never touched.
    #[instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
    pub fn transform(&self, mut buffer: PixelBuffer) -> PixelBuffer {
        let masks = self.masks(&buffer);
        debug!(
            near_white = masks.near_white_count(),
            near_black = masks.near_black_count(),
            "Threshold masks computed"
        );

        let dark = self.rule.near_white_fill.0;
        let light = self.rule.near_black_fill.0;
        for (px, (white, black)) in buffer
            .pixels_mut()
            .zip(masks.near_white.iter().zip(&masks.near_black))
        {
            if *white {
                px[..3].copy_from_slice(&dark);
            }
            if *black {
                px[..3].copy_from_slice(&light);
            }
        }
        buffer
    }
}
