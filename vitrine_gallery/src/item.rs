// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// One artwork in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Issuing institution, also the filter key.
    pub institution: String,
    /// Year; newer items are shown first.
    pub year: i32,
    /// Image reference.
    pub image: String,
    /// Pixel width of the image, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height of the image, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Framing of an item's image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Wider than tall, framed 4:3.
    Landscape,
    /// Framed 3:4. Also used while the dimensions are unknown.
    #[default]
    Portrait,
}

impl Orientation {
    /// Height over width of the frame.
    pub fn aspect(self) -> f64 {
        match self {
            Self::Landscape => 3.0 / 4.0,
            Self::Portrait => 4.0 / 3.0,
        }
    }
}

impl Item {
    /// Framing for this item's image.
    pub fn orientation(&self) -> Orientation {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > h => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }
}
