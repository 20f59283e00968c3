// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel transformations — threshold recoloring and aspect-aware resizing.

pub mod color;
pub mod resize;

pub use color::ColorTransformer;
pub use resize::ImageResizer;
