// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IconwerkError, Result};
use crate::types::{ColorRule, DpiTag, ResizeSpec, Rgb};

/// Batch run settings.
///
/// Read-only: built from defaults, an optional JSON file, and CLI
/// overrides. Never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Folder walked recursively for `.png` files.
    pub input_folder: PathBuf,
    /// Flat folder every result is written into.
    pub output_folder: PathBuf,
    /// Run the color stage.
    pub recolor: bool,
    pub white_threshold: u8,
    pub black_threshold: u8,
    /// Fill for near-white pixels.
    pub near_white_fill: Rgb,
    /// Fill for near-black pixels.
    pub near_black_fill: Rgb,
    /// Run the resize stage.
    pub resize: bool,
    /// Width used when an image's folder name is not a number.
    pub fallback_width: u32,
    /// Fixed target height; usually left unset so it follows the width.
    pub height: Option<u32>,
    pub keep_aspect_ratio: bool,
    /// Output DPI, applied to both axes. `None` writes no `pHYs` chunk.
    pub dpi: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("input"),
            output_folder: PathBuf::from("output"),
            recolor: true,
            white_threshold: 240,
            black_threshold: 15,
            near_white_fill: Rgb::gray(117),
            near_black_fill: Rgb::WHITE,
            resize: true,
            fallback_width: 32,
            height: None,
            keep_aspect_ratio: true,
            dpi: Some(96),
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            IconwerkError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_json_str(&text)
    }

    /// Reject settings that would fail every image.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == Some(0) {
            return Err(IconwerkError::Config("dpi must be positive".into()));
        }
        if self.resize && self.fallback_width == 0 {
            return Err(IconwerkError::Config(
                "fallback width must be positive".into(),
            ));
        }
        if self.height == Some(0) {
            return Err(IconwerkError::Config("height must be positive".into()));
        }
        Ok(())
    }

    /// The color rule, or `None` when the color stage is disabled.
    pub fn color_rule(&self) -> Option<ColorRule> {
        self.recolor.then(|| ColorRule {
            white_threshold: self.white_threshold,
            black_threshold: self.black_threshold,
            near_white_fill: self.near_white_fill,
            near_black_fill: self.near_black_fill,
        })
    }

    /// Resize spec for one image, or `None` when the resize stage is disabled.
    ///
    /// `size_hint` is the width derived from the image's folder name; without
    /// one the fallback width applies.
    pub fn resize_spec(&self, size_hint: Option<u32>) -> Option<ResizeSpec> {
        self.resize.then(|| {
            ResizeSpec::new(
                Some(size_hint.unwrap_or(self.fallback_width)),
                self.height,
                self.keep_aspect_ratio,
            )
        })
    }

    pub fn dpi_tag(&self) -> Result<Option<DpiTag>> {
        self.dpi.map(DpiTag::square).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_icon_workflow() {
        let config = AppConfig::default();
        let rule = config.color_rule().expect("recolor enabled");
        assert_eq!(rule.white_threshold, 240);
        assert_eq!(rule.black_threshold, 15);
        assert_eq!(rule.near_white_fill, Rgb::gray(117));
        assert_eq!(rule.near_black_fill, Rgb::WHITE);
        assert_eq!(config.dpi_tag().expect("dpi"), Some(DpiTag::square(96).expect("dpi")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn driver_fill_differs_from_library_default() {
        let rule = AppConfig::default().color_rule().expect("recolor enabled");
        assert_eq!(ColorRule::default().near_white_fill, Rgb::gray(40));
        assert_ne!(rule, ColorRule::default());
    }

    #[test]
    fn resize_spec_uses_hint_then_fallback() {
        let config = AppConfig::default();
        assert_eq!(config.resize_spec(Some(16)), Some(ResizeSpec::to_width(16)));
        assert_eq!(config.resize_spec(None), Some(ResizeSpec::to_width(32)));
    }

    #[test]
    fn disabled_stages_yield_none() {
        let config = AppConfig {
            recolor: false,
            resize: false,
            ..AppConfig::default()
        };
        assert!(config.color_rule().is_none());
        assert!(config.resize_spec(Some(16)).is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json_str(r#"{ "white_threshold": 200, "dpi": null }"#)
            .expect("parse");
        assert_eq!(config.white_threshold, 200);
        assert_eq!(config.black_threshold, 15);
        assert_eq!(config.dpi, None);
    }

    #[test]
    fn fill_colors_parse_as_arrays() {
        let config = AppConfig::from_json_str(r#"{ "near_white_fill": [10, 20, 30] }"#)
            .expect("parse");
        assert_eq!(config.near_white_fill, Rgb([10, 20, 30]));
    }

    #[test]
    fn validate_rejects_zero_dpi() {
        let config = AppConfig {
            dpi: Some(0),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(IconwerkError::Config(_))));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = AppConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, IconwerkError::Serialization(_)));
    }
}
