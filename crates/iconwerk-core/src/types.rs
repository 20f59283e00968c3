// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Iconwerk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{IconwerkError, Result};

/// An opaque 8-bit RGB color used as a replacement fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// A neutral gray with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self([level, level, level])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Threshold-based recoloring rule.
///
/// A pixel whose R, G and B are all `>= white_threshold` is "near-white" and
/// takes `near_white_fill`. A pixel whose R, G and B are all
/// `<= black_threshold` is "near-black" and takes `near_black_fill`. Alpha
/// never participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    pub white_threshold: u8,
    pub black_threshold: u8,
    /// Replacement for near-white pixels (the dark substitute).
    pub near_white_fill: Rgb,
    /// Replacement for near-black pixels (the light substitute).
    pub near_black_fill: Rgb,
}

impl ColorRule {
    /// Whether the two threshold bands share at least one channel value.
    pub fn thresholds_overlap(&self) -> bool {
        self.black_threshold >= self.white_threshold
    }
}

/// Library default: near-white becomes gray 40. `AppConfig::default` uses
/// gray 117 instead, so batch runs differ from `ColorRule::default()`.
impl Default for ColorRule {
    fn default() -> Self {
        Self {
            white_threshold: 240,
            black_threshold: 15,
            near_white_fill: Rgb::gray(40),
            near_black_fill: Rgb::WHITE,
        }
    }
}

/// Target dimensions for a resize.
///
/// `None` means "not specified" for that axis. See
/// `ImageResizer::target_dimensions` for how the pair is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub keep_aspect_ratio: bool,
}

impl ResizeSpec {
    pub fn new(width: Option<u32>, height: Option<u32>, keep_aspect_ratio: bool) -> Self {
        Self {
            width,
            height,
            keep_aspect_ratio,
        }
    }

    /// Fix the width and derive the height from the source aspect ratio.
    pub fn to_width(width: u32) -> Self {
        Self::new(Some(width), None, true)
    }

    /// Fix the height and derive the width from the source aspect ratio.
    pub fn to_height(height: u32) -> Self {
        Self::new(None, Some(height), true)
    }

    /// Force both dimensions, distorting if needed.
    pub fn exact(width: u32, height: u32) -> Self {
        Self::new(Some(width), Some(height), false)
    }
}

impl Default for ResizeSpec {
    fn default() -> Self {
        Self::new(None, None, true)
    }
}

/// Print resolution written to the output's `pHYs` chunk.
///
/// Purely metadata: never affects pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpiTag {
    x: u32,
    y: u32,
}

impl DpiTag {
    /// Build a tag; both values must be positive.
    pub fn new(x: u32, y: u32) -> Result<Self> {
        if x == 0 || y == 0 {
            return Err(IconwerkError::InvalidDpi { x, y });
        }
        Ok(Self { x, y })
    }

    /// Same resolution on both axes.
    pub fn square(dpi: u32) -> Result<Self> {
        Self::new(dpi, dpi)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

impl std::fmt::Display for DpiTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} dpi", self.x, self.y)
    }
}

/// One image's worth of work, handed from the batch driver to the pipeline.
///
/// A stage set to `None` is skipped. With both stages skipped the source
/// bytes are copied to `output` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub color: Option<ColorRule>,
    pub resize: Option<ResizeSpec>,
    pub dpi: Option<DpiTag>,
}

impl ImageJob {
    /// A job with both stages disabled and no DPI tag.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            color: None,
            resize: None,
            dpi: None,
        }
    }

    pub fn with_color(mut self, rule: ColorRule) -> Self {
        self.color = Some(rule);
        self
    }

    pub fn with_resize(mut self, spec: ResizeSpec) -> Self {
        self.resize = Some(spec);
        self
    }

    pub fn with_dpi(mut self, dpi: DpiTag) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Whether any pixel stage runs for this job.
    pub fn has_stages(&self) -> bool {
        self.color.is_some() || self.resize.is_some()
    }
}

/// What the pipeline did with a successful job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// No stage configured; the source was copied byte-for-byte.
    Copied { bytes: u64 },
    /// A processed image of the given dimensions was encoded.
    Written { width: u32, height: u32 },
}
