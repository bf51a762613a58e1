//! Module responsible for rendering text.

use std::fmt;
use std::ops::{Add, Div, Sub};

use image::{DynamicImage, GenericImage};
use num::One;
use rusttype::{Font, point, Point, Rect, Scale};

use model::{Color, HAlign, VAlign};


/// Alignment of text within a rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl Alignment {
    #[inline]
    pub fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Alignment{vertical: vertical, horizontal: horizontal}
    }
}

impl From<(VAlign, HAlign)> for Alignment {
    fn from((v, h): (VAlign, HAlign)) -> Self {
        Alignment::new(v, h)
    }
}
impl From<(HAlign, VAlign)> for Alignment {
    fn from((h, v): (HAlign, VAlign)) -> Self {
        Alignment::new(v, h)
    }
}

impl fmt::Debug for Alignment {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Alignment::{:?}{:?}", self.vertical, self.horizontal)
    }
}

impl Alignment {
    /// The origin point for this alignment within given rectangle.
    /// Returns one of six possible points at the edges of the rectangle.
    pub fn origin_within<N>(&self, rect: Rect<N>) -> Point<N>
        where N: Copy + One + Add<Output=N> + Sub<Output=N> + Div<Output=N>
    {
        let two = N::one() + N::one();
        let x = match self.horizontal {
            HAlign::Left => rect.min.x,
            HAlign::Center => rect.min.x + rect.width() / two,
            HAlign::Right => rect.max.x,
        };
        let y = match self.vertical {
            VAlign::Top => rect.min.y,
            VAlign::Bottom => rect.max.y,
        };
        point(x, y)
    }
}


/// Style that the text is rendered with.
pub struct Style<'f> {
    font: &'f Font<'f>,
    size: f32,
    color: Color,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font, size: f32, color: Color) -> Self {
        if size <= 0.0 {
            panic!("text::Style got non-positive size ({})", size);
        }
        Style{font, size, color}
    }

    #[inline]
    pub fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &"Font{}")  // we don't have any displayable info here
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}


/// Renders a line of text onto given image.
///
/// Text should be single-line (line breaks are ignored); anything that
/// doesn't fit the rectangle is clipped at the image edges.
pub fn render_line<A: Into<Alignment>>(img: DynamicImage,
                                       s: &str,
                                       align: A, rect: Rect<f32>,
                                       style: &Style) -> DynamicImage {
    let mut img = img;
    let align: Alignment = align.into();
    trace!("render_line(..., {:?}, {:?}, {:?}, {:?})", s, align, rect, style);

    let scale = style.scale();
    let v_metrics = style.font.v_metrics(scale);

    // Figure out where we're drawing.
    //
    // Unless it's a straightforward rendering in the top-left corner,
    // we need to compute the final bounds of the text first,
    // so that we can account for it when computing the start position.
    //
    let mut position = align.origin_within(rect);
    if align.horizontal != HAlign::Left {
        // Compute text width as the final X position of the "caret"
        // after laying out the glyphs starting from X=0.
        let glyphs: Vec<_> = style.font.layout(s, scale, point(0.0, /* unused */ 0.0)).collect();
        let text_width = glyphs.iter()
            .rev()
            .filter_map(|g| g.pixel_bounding_box().map(|bb| {
                bb.min.x as f32 + g.unpositioned().h_metrics().advance_width
            }))
            .next().unwrap_or(0.0);
        match align.horizontal {
            HAlign::Center => position.x -= text_width / 2.0,
            HAlign::Right => position.x -= text_width,
            HAlign::Left => {},
        }
    }
    match align.vertical {
        VAlign::Top => position.y += v_metrics.ascent,
        VAlign::Bottom => position.y -= v_metrics.descent.abs(),  // it's usually negative
    }

    // Now we can draw the text.
    let (width, height) = img.dimensions();
    for glyph in style.font.layout(s, scale, position) {
        if let Some(bbox) = glyph.pixel_bounding_box() {
            glyph.draw(|x, y, v| {
                let x = (bbox.min.x + x as i32) as u32;
                let y = (bbox.min.y + y as i32) as u32;
                let alpha = (v * 255f32) as u8;
                if x < width && y < height {
                    img.blend_pixel(x, y, style.color.to_rgba(alpha));
                }
            });
        }
    }

    img
}


#[cfg(test)]
mod tests {
    use rusttype::{point, Rect};
    use spectral::prelude::*;
    use model::{HAlign, VAlign};
    use super::Alignment;

    fn rect() -> Rect<f32> {
        Rect{min: point(0.0, 0.0), max: point(100.0, 50.0)}
    }

    #[test]
    fn origin_of_top_left_is_the_rect_corner() {
        let origin = Alignment::new(VAlign::Top, HAlign::Left).origin_within(rect());
        assert_that!(origin.x).is_equal_to(0.0);
        assert_that!(origin.y).is_equal_to(0.0);
    }

    #[test]
    fn origin_of_top_center_is_on_the_upper_edge() {
        let origin = Alignment::new(VAlign::Top, HAlign::Center).origin_within(rect());
        assert_that!(origin.x).is_equal_to(50.0);
        assert_that!(origin.y).is_equal_to(0.0);
    }

    #[test]
    fn origin_of_bottom_center_is_on_the_lower_edge() {
        let origin = Alignment::new(VAlign::Bottom, HAlign::Center).origin_within(rect());
        assert_that!(origin.x).is_equal_to(50.0);
        assert_that!(origin.y).is_equal_to(50.0);
    }

    #[test]
    fn origin_of_bottom_right_is_the_rect_corner() {
        let origin = Alignment::new(VAlign::Bottom, HAlign::Right).origin_within(rect());
        assert_that!(origin.x).is_equal_to(100.0);
        assert_that!(origin.y).is_equal_to(50.0);
    }

    #[test]
    fn alignment_works_from_tuples_in_either_order() {
        let a: Alignment = (VAlign::Top, HAlign::Center).into();
        let b: Alignment = (HAlign::Center, VAlign::Top).into();
        assert_that!(a).is_equal_to(b);
    }
}
