//! Module with captioning configuration.

use model::{Color, Dimensions,
            DEFAULT_FONT, FIT_SIZE, MAX_IMAGE_SIZE, MIN_IMAGE_SIZE,
            SHADOW_OFFSET, TEXT_COLOR, TEXT_MARGIN, TEXT_SHADOW_COLOR, TEXT_SIZE};


/// Structure holding configuration for the captioning pipeline.
///
/// This is owned by the `Captioner` and copied into every `CaptionTask`,
/// so that tests can exercise the pipeline with alternate bounds.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Smallest image that will be accepted for captioning.
    pub min_size: Dimensions,
    /// Largest image that will be accepted for captioning.
    pub max_size: Dimensions,
    /// Box that oversized images are scaled down to fit in.
    pub fit_size: Dimensions,

    /// Name of the font used for caption text.
    pub font: &'static str,
    /// Size of the caption text, in pixels.
    pub text_size: f32,
    /// Margin between the caption text and the image edges, in pixels.
    pub text_margin: f32,

    /// Offset between the two text layers of a caption, applied to both axes.
    pub shadow_offset: f32,
    /// Color of the text layer drawn on top (at the offset position).
    pub text_color: Color,
    /// Color of the text layer drawn underneath.
    pub shadow_color: Color,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            min_size: MIN_IMAGE_SIZE,
            max_size: MAX_IMAGE_SIZE,
            fit_size: FIT_SIZE,
            font: DEFAULT_FONT,
            text_size: TEXT_SIZE,
            text_margin: TEXT_MARGIN,
            shadow_offset: SHADOW_OFFSET,
            text_color: TEXT_COLOR,
            shadow_color: TEXT_SHADOW_COLOR,
        }
    }
}
