// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for loading gallery items.

use thiserror::Error;

/// Errors that can occur while loading gallery items.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The item source could not be decoded.
    #[error("failed to parse gallery items: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share an id.
    #[error("duplicate gallery item id: {0}")]
    DuplicateId(String),
}

/// Result type for gallery operations.
pub type Result<T> = core::result::Result<T, GalleryError>;
