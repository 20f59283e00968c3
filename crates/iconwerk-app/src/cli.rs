// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface. Flags override the JSON config file, which
// overrides the built-in defaults.

use std::path::PathBuf;

use clap::Parser;
use iconwerk_core::error::Result;
use iconwerk_core::{AppConfig, Rgb};

#[derive(Debug, Parser)]
#[command(name = "iconwerk")]
#[command(version, about = "Recolor and resize PNG icons in bulk, tagging the output DPI")]
pub struct Cli {
    /// JSON config file (missing keys keep their defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Folder walked recursively for .png files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Folder every result is written into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Channel value at or above which a pixel counts as near-white
    #[arg(long)]
    pub white_threshold: Option<u8>,

    /// Channel value at or below which a pixel counts as near-black
    #[arg(long)]
    pub black_threshold: Option<u8>,

    /// Fill for near-white pixels: "#rrggbb", "r,g,b", or a gray level
    #[arg(long, value_parser = parse_rgb)]
    pub near_white_fill: Option<Rgb>,

    /// Fill for near-black pixels: "#rrggbb", "r,g,b", or a gray level
    #[arg(long, value_parser = parse_rgb)]
    pub near_black_fill: Option<Rgb>,

    /// Skip the color stage
    #[arg(long)]
    pub no_recolor: bool,

    /// Skip the resize stage
    #[arg(long)]
    pub no_resize: bool,

    /// Width for images whose folder name is not a number
    #[arg(long)]
    pub fallback_width: Option<u32>,

    /// Fixed output height
    #[arg(long)]
    pub height: Option<u32>,

    /// Use width and height exactly, even if that distorts the image
    #[arg(long)]
    pub ignore_aspect_ratio: bool,

    /// Output DPI written to the PNG metadata
    #[arg(long, conflicts_with = "no_dpi")]
    pub dpi: Option<u32>,

    /// Write no DPI metadata
    #[arg(long)]
    pub no_dpi: bool,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_folder = input;
        }
        if let Some(output) = self.output {
            config.output_folder = output;
        }
        if let Some(t) = self.white_threshold {
            config.white_threshold = t;
        }
        if let Some(t) = self.black_threshold {
            config.black_threshold = t;
        }
        if let Some(fill) = self.near_white_fill {
            config.near_white_fill = fill;
        }
        if let Some(fill) = self.near_black_fill {
            config.near_black_fill = fill;
        }
        if self.no_recolor {
            config.recolor = false;
        }
        if self.no_resize {
            config.resize = false;
        }
        if let Some(width) = self.fallback_width {
            config.fallback_width = width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if self.ignore_aspect_ratio {
            config.keep_aspect_ratio = false;
        }
        if self.dpi.is_some() {
            config.dpi = self.dpi;
        }
        if self.no_dpi {
            config.dpi = None;
        }
        Ok(config)
    }
}

fn parse_rgb(text: &str) -> std::result::Result<Rgb, String> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb, got {text}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|err| format!("{text}: {err}"))
        };
        return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
    }

    let parts = text
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|err| format!("{text}: {err}")))
        .collect::<std::result::Result<Vec<u8>, String>>()?;
    match parts.as_slice() {
        [level] => Ok(Rgb::gray(*level)),
        [r, g, b] => Ok(Rgb([*r, *g, *b])),
        _ => Err(format!("expected one or three channels, got {text}")),
    }
}
