//! Module defining the model types.

use std::fmt;

use image::{GenericImage, Rgba};

use super::constants::DEFAULT_HALIGN;


/// Describes a meme request. Used as an input structure.
#[derive(Clone, PartialEq)]
pub struct MemeRequest {
    pub top_text: String,
    pub bottom_text: String,
    pub image: Vec<u8>,
}

impl MemeRequest {
    /// The captions to render on the image, in drawing order.
    pub fn captions(&self) -> Vec<Caption> {
        vec![
            Caption{text: self.top_text.clone(), ..Caption::at(VAlign::Top)},
            Caption{text: self.bottom_text.clone(), ..Caption::at(VAlign::Bottom)},
        ]
    }
}
impl fmt::Debug for MemeRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("MemeRequest")
            .field("top_text", &self.top_text)
            .field("bottom_text", &self.bottom_text)
            .field("image", &format!("<{} bytes>", self.image.len()))
            .finish()
    }
}


/// Describes a single piece of text rendered on the image.
#[derive(Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub halign: HAlign,
    pub valign: VAlign,
}

impl Caption {
    /// Create an empty Caption at the particular vertical alignment.
    #[inline]
    pub fn at(valign: VAlign) -> Self {
        Caption{
            text: String::new(),
            halign: DEFAULT_HALIGN,
            valign: valign,
        }
    }
}
impl fmt::Debug for Caption {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{:?}{:?}({:?})", self.valign, self.halign, self.text)
    }
}

/// Horizontal alignment of text within a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a caption on the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VAlign {
    Top,
    Bottom,
}


/// Width and height of an image, in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of given image.
    #[inline]
    pub fn of<I: GenericImage>(img: &I) -> Self {
        let (width, height) = img.dimensions();
        Dimensions{width, height}
    }
}
impl From<(u32, u32)> for Dimensions {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Dimensions{width, height}
    }
}
impl fmt::Debug for Dimensions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{}", self.width, self.height)
    }
}
impl fmt::Display for Dimensions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{}", self.width, self.height)
    }
}


/// RGB color of a text layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    #[inline]
    pub fn invert(self) -> Self {
        let Color(r, g, b) = self;
        Color(0xff - r, 0xff - g, 0xff - b)
    }

    #[inline]
    pub fn to_rgba(&self, alpha: u8) -> Rgba<u8> {
        let &Color(r, g, b) = self;
        Rgba{data: [r, g, b, alpha]}
    }
}
impl fmt::Debug for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let &Color(r, g, b) = self;
        write!(fmt, "#{:0>2x}{:0>2x}{:0>2x}", r, g, b)
    }
}


#[cfg(test)]
mod tests {
    use model::{TEXT_COLOR, TEXT_SHADOW_COLOR};
    use super::{Color, Dimensions, MemeRequest, VAlign};

    #[test]
    fn text_colors_are_inversions() {
        assert_eq!(TEXT_SHADOW_COLOR, TEXT_COLOR.invert());
        assert_eq!(TEXT_COLOR, TEXT_SHADOW_COLOR.invert());
    }

    #[test]
    fn dimensions_format_as_width_by_height() {
        let dims = Dimensions{width: 640, height: 480};
        assert_eq!("640x480", format!("{}", dims));
    }

    #[test]
    fn captions_are_top_then_bottom() {
        let request = MemeRequest{
            top_text: "HELLO".into(),
            bottom_text: "WORLD".into(),
            image: vec![],
        };
        let captions = request.captions();
        assert_eq!(2, captions.len());
        assert_eq!(VAlign::Top, captions[0].valign);
        assert_eq!("HELLO", captions[0].text);
        assert_eq!(VAlign::Bottom, captions[1].valign);
        assert_eq!("WORLD", captions[1].text);
    }

    #[test]
    fn request_debug_doesnt_dump_image_bytes() {
        let request = MemeRequest{
            top_text: "A".into(),
            bottom_text: "B".into(),
            image: vec![0u8; 4096],
        };
        let repr = format!("{:?}", request);
        assert!(repr.contains("<4096 bytes>"), "unexpected Debug output: {}", repr);
    }
}
