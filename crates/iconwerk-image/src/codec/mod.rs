// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec module — PNG decode/encode with DPI metadata and atomic file output.

pub mod png;
pub mod staging;
