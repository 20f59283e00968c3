// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iconwerk-image — Pixel processing for Iconwerk.
//
// Provides the RGBA pixel buffer, threshold recoloring, aspect-aware Lanczos
// resizing, PNG encode/decode with DPI metadata, atomic output staging, and
// the per-image pipeline the batch driver calls.

pub mod buffer;
pub mod codec;
pub mod pipeline;
pub mod processor;
pub mod transform;

// Re-export the primary types so callers can use `iconwerk_image::ImageResizer` etc.
pub use buffer::PixelBuffer;
pub use codec::png::{decode_png, encode_png, read_dpi};
pub use codec::staging::{copy_atomic, write_atomic};
pub use pipeline::process_job;
pub use processor::IconProcessor;
pub use transform::color::ColorTransformer;
pub use transform::resize::ImageResizer;
