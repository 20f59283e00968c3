// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PNG codec — decode any PNG to RGBA8, encode RGBA8 with an optional `pHYs`
// (physical pixel dimensions) chunk carrying the output DPI.

use std::io::Cursor;

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::types::DpiTag;
use image::ImageFormat;
use tracing::{debug, instrument};

use crate::buffer::PixelBuffer;

/// `pHYs` stores pixels per meter; DPI is pixels per inch.
const METERS_PER_INCH: f64 = 0.0254;

fn dpi_to_ppm(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

fn ppm_to_dpi(ppm: u32) -> u32 {
    (f64::from(ppm) * METERS_PER_INCH).round() as u32
}

/// Decode PNG bytes into an RGBA8 buffer.
///
/// Grayscale, RGB, palette and 16-bit images are promoted to RGBA8.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_png(data: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory_with_format(data, ImageFormat::Png)
        .map_err(|err| IconwerkError::decode(format!("invalid PNG: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "PNG decoded"
    );
    Ok(PixelBuffer::from_dynamic(img))
}

/// Encode `buffer` as an 8-bit RGBA PNG, tagging it with `dpi` when given.
#[instrument(skip(buffer), fields(width = buffer.width(), height = buffer.height()))]
pub fn encode_png(buffer: &PixelBuffer, dpi: Option<DpiTag>) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(dpi) = dpi {
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: dpi_to_ppm(dpi.x()),
                yppu: dpi_to_ppm(dpi.y()),
                unit: png::Unit::Meter,
            }));
        }
        let mut writer = encoder
            .write_header()
            .map_err(|err| IconwerkError::encode(format!("PNG header: {}", err)))?;
        writer
            .write_image_data(buffer.as_raw())
            .map_err(|err| IconwerkError::encode(format!("PNG image data: {}", err)))?;
    }
    Ok(out.into_inner())
}

/// Read the DPI recorded in a PNG's `pHYs` chunk.
///
/// Returns `None` when the chunk is absent, uses the unitless aspect-ratio
/// form, or rounds to zero DPI.
pub fn read_dpi(data: &[u8]) -> Result<Option<DpiTag>> {
    let decoder = png::Decoder::new(Cursor::new(data));
    let reader = decoder
        .read_info()
        .map_err(|err| IconwerkError::decode(format!("invalid PNG: {}", err)))?;

    let dpi = match reader.info().pixel_dims {
        Some(png::PixelDimensions {
            xppu,
            yppu,
            unit: png::Unit::Meter,
        }) => DpiTag::new(ppm_to_dpi(xppu), ppm_to_dpi(yppu)).ok(),
        _ => None,
    };
    Ok(dpi)
}
