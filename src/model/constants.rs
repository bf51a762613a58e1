//! Module defining constants relevant to the data model.

use super::types::{Color, Dimensions, HAlign};


/// Name of the font used for caption text.
pub const DEFAULT_FONT: &'static str = "DejaVuSans-Bold";

/// Horizontal alignment of captions.
pub const DEFAULT_HALIGN: HAlign = HAlign::Center;


/// Smallest image the service will caption.
pub const MIN_IMAGE_SIZE: Dimensions = Dimensions{width: 640, height: 480};
/// Largest image the service will caption.
pub const MAX_IMAGE_SIZE: Dimensions = Dimensions{width: 6000, height: 6000};

/// Box that bigger (but still acceptable) images are scaled down to fit in.
pub const FIT_SIZE: Dimensions = Dimensions{width: 1024, height: 768};


/// Size of the caption text, in pixels.
pub const TEXT_SIZE: f32 = 64.0;
/// Margin between the caption text and the image edges, in pixels.
pub const TEXT_MARGIN: f32 = 10.0;

/// Offset between the two text layers of a caption, applied to both axes.
pub const SHADOW_OFFSET: f32 = 3.0;

/// Color of the text layer drawn on top (at the offset position).
pub const TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the text layer drawn underneath.
/// This should be the inversion of TEXT_COLOR.
pub const TEXT_SHADOW_COLOR: Color = Color(0x0, 0x0, 0x0);
