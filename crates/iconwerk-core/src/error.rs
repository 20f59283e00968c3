// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Iconwerk.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Iconwerk operations.
///
/// `Decode`, `Encode`, and `InvalidDimension` are terminal for the single
/// image being processed. The batch runner reports them and moves on.
#[derive(Debug, Error)]
pub enum IconwerkError {
    // -- Per-image errors --
    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to encode {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    #[error("invalid DPI {x}x{y}: both values must be positive")]
    InvalidDpi { x: u32, y: u32 },

    // -- Driver / configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IconwerkError {
    /// Decode failure for an in-memory source with no path attached.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            path: PathBuf::new(),
            reason: reason.into(),
        }
    }

    /// Encode failure for an in-memory destination with no path attached.
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            path: PathBuf::new(),
            reason: reason.into(),
        }
    }

    /// Attach a path to a `Decode`/`Encode` error that was raised without one.
    ///
    /// Other variants, and errors that already carry a path, pass through.
    pub fn at_path(self, at: impl Into<PathBuf>) -> Self {
        match self {
            Self::Decode { path, reason } if path.as_os_str().is_empty() => Self::Decode {
                path: at.into(),
                reason,
            },
            Self::Encode { path, reason } if path.as_os_str().is_empty() => Self::Encode {
                path: at.into(),
                reason,
            },
            other => other,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IconwerkError>;
