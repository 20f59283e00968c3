// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Icon processor — recolor then resize a single in-memory PNG. Stages hand
// the pixel buffer along by value; nothing touches disk between them.

use std::path::Path;

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::types::{ColorRule, DpiTag, ResizeSpec};
use tracing::{debug, info, instrument};

use crate::buffer::PixelBuffer;
use crate::codec::{png, staging};
use crate::transform::color::ColorTransformer;
use crate::transform::resize::ImageResizer;

/// Processing chain over one decoded image.
///
/// Each stage consumes `self` and returns the next state, enabling method
/// chaining:
///
/// ```ignore
/// IconProcessor::open("input/16/save.png")?
///     .recolor(&ColorRule::default())
///     .resize(&ResizeSpec::to_width(16))?
///     .save("output/save.png", Some(DpiTag::square(96)?))?;
/// ```
#[derive(Debug, Clone)]
pub struct IconProcessor {
    /// The current working buffer.
    buffer: PixelBuffer,
}

impl IconProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load and decode a PNG file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| IconwerkError::Decode {
            path: path.to_path_buf(),
            reason: format!("cannot read source: {}", err),
        })?;
        let processor = Self::from_png_bytes(&data).map_err(|err| err.at_path(path))?;
        info!(
            width = processor.width(),
            height = processor.height(),
            "Image loaded"
        );
        Ok(processor)
    }

    /// Decode PNG bytes held in memory.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            buffer: png::decode_png(data)?,
        })
    }

    /// Wrap an already-decoded buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    // -- Stages ---------------------------------------------------------------

    /// Substitute near-white and near-black pixels according to `rule`.
    pub fn recolor(self, rule: &ColorRule) -> Self {
        Self {
            buffer: ColorTransformer::new(*rule).transform(self.buffer),
        }
    }

    /// Resample to the dimensions `spec` resolves to.
    pub fn resize(self, spec: &ResizeSpec) -> Result<Self> {
        Ok(Self {
            buffer: ImageResizer::new().resize(self.buffer, spec)?,
        })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current buffer as PNG bytes.
    pub fn to_png_bytes(&self, dpi: Option<DpiTag>) -> Result<Vec<u8>> {
        png::encode_png(&self.buffer, dpi)
    }

    /// Encode and atomically write the result to `path`.
    pub fn save(&self, path: impl AsRef<Path>, dpi: Option<DpiTag>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_png_bytes(dpi).map_err(|err| err.at_path(path))?;
        staging::write_atomic(path, &data)?;
        debug!(path = %path.display(), bytes = data.len(), "Image saved");
        Ok(())
    }
}
