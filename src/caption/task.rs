//! Module implementing the actual captioning task.
//! Most if not all captioning logic lives here.

use image::{self, DynamicImage, FilterType, GenericImage};
use rusttype::{Font, point, Rect, vector};

use fonts;
use model::{Caption, Dimensions, MemeRequest};
use super::bounds::{self, Verdict};
use super::config::Config;
use super::error::CaptionError;
use super::text::{self, Style};


/// Represents a single captioning task and contains all the relevant logic.
///
/// This is a separate struct so that the pipeline state (e.g. the config)
/// can be easily carried between its methods.
///
/// All the code here is executed in a background thread,
/// and so it can be synchronous.
pub struct CaptionTask {
    pub request: MemeRequest,
    pub config: Config,
}

impl CaptionTask {
    /// Perform the captioning task.
    pub fn perform(self) -> Result<Vec<u8>, CaptionError> {
        debug!("Rendering {:?}", self.request);

        let img = image::load_from_memory(&self.request.image)?;
        let dims = Dimensions::of(&img);
        trace!("Decoded input image of size {}", dims);

        match bounds::check(dims, &self.config) {
            Verdict::Accept => {},
            Verdict::TooSmall => return Err(CaptionError::TooSmall{
                actual: dims, min: self.config.min_size}),
            Verdict::TooLarge => return Err(CaptionError::TooLarge{
                actual: dims, max: self.config.max_size}),
        }

        let img = self.scale_to_fit(img);
        let img = self.draw_captions(img)?;
        self.encode_image(img)
    }

    /// Scale the image down if it doesn't fit the target box.
    /// Images already within the box are passed through untouched.
    fn scale_to_fit(&self, img: DynamicImage) -> DynamicImage {
        let dims = Dimensions::of(&img);
        let fit = self.config.fit_size;

        if dims.width <= fit.width && dims.height <= fit.height {
            debug!("Image of size {} fits within {}, using it as is", dims, fit);
            return img;
        }

        debug!("Scaling image down from {} to fit within {}", dims, fit);
        // Note that resizing preserves the original aspect,
        // so the result may be smaller than the box in one dimension.
        let img = img.resize(fit.width, fit.height, FilterType::Lanczos3);
        trace!("Final image size: {}", Dimensions::of(&img));
        img
    }

    /// Draw both captions on the image. Returns a new image.
    fn draw_captions(&self, img: DynamicImage) -> Result<DynamicImage, CaptionError> {
        let font = fonts::load(self.config.font).map_err(CaptionError::Font)?;

        // Rendering text requires alpha blending.
        let mut img = img;
        if img.as_rgba8().is_none() {
            trace!("Converting image to RGBA...");
            img = DynamicImage::ImageRgba8(img.to_rgba());
        }

        for caption in self.request.captions() {
            img = self.draw_single_caption(img, &caption, &font);
        }

        Ok(img)
    }

    /// Draws a single caption text as a pair of superimposed renders:
    /// one in the shadow color at the anchor position, then one in the text
    /// color shifted a few pixels towards the lower right.
    fn draw_single_caption(&self, img: DynamicImage,
                           caption: &Caption, font: &Font) -> DynamicImage {
        let mut img = img;

        if caption.text.is_empty() {
            debug!("Empty caption text, skipping.");
            return img;
        }
        debug!("Rendering {v}-{h} text: {text}", text=caption.text,
            v=format!("{:?}", caption.valign).to_lowercase(),
            h=format!("{:?}", caption.halign).to_lowercase());

        let dims = Dimensions::of(&img);
        let (width, height) = (dims.width as f32, dims.height as f32);

        let margin = self.config.text_margin;
        let margin_vector = vector(margin, margin);
        let rect: Rect<f32> = Rect{
            min: point(0.0, 0.0) + margin_vector,
            max: point(width, height) - margin_vector,
        };

        let alignment = (caption.halign, caption.valign);

        let style = Style::new(font, self.config.text_size, self.config.shadow_color);
        img = text::render_line(img, &caption.text, alignment, rect, &style);

        let shadow_vector = vector(self.config.shadow_offset, self.config.shadow_offset);
        let rect = Rect{min: rect.min + shadow_vector, max: rect.max + shadow_vector};
        let style = Style::new(font, self.config.text_size, self.config.text_color);
        img = text::render_line(img, &caption.text, alignment, rect, &style);

        img
    }

    /// Encode final result as PNG bytes.
    fn encode_image(&self, img: DynamicImage) -> Result<Vec<u8>, CaptionError> {
        debug!("Encoding final image as PNG...");

        let (width, height) = img.dimensions();
        let mut image_bytes = vec![];
        image::png::PNGEncoder::new(&mut image_bytes)
            .encode(&*img.raw_pixels(), width, height, img.color())
            .map_err(CaptionError::Encode)?;

        Ok(image_bytes)
    }
}


#[cfg(test)]
mod tests {
    use image::{self, DynamicImage, GenericImage, ImageBuffer, Rgba};
    use spectral::prelude::*;
    use model::{Dimensions, MemeRequest};
    use super::{CaptionError, CaptionTask, Config};

    const WHITE: Rgba<u8> = Rgba{data: [0xff, 0xff, 0xff, 0xff]};

    fn white_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, WHITE))
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = white_image(width, height);
        let mut bytes = vec![];
        image::png::PNGEncoder::new(&mut bytes)
            .encode(&*img.raw_pixels(), width, height, img.color())
            .unwrap();
        bytes
    }

    fn task(top: &str, bottom: &str, image: Vec<u8>) -> CaptionTask {
        CaptionTask{
            request: MemeRequest{
                top_text: top.into(),
                bottom_text: bottom.into(),
                image: image,
            },
            config: Config::default(),
        }
    }

    #[test]
    fn undersized_image_is_rejected() {
        match task("HELLO", "WORLD", png_bytes(320, 240)).perform() {
            Err(CaptionError::TooSmall{actual, ..}) => {
                assert_that!(actual).is_equal_to(Dimensions{width: 320, height: 240});
            },
            r => panic!("expected a TooSmall error, got {:?}", r.map(|b| b.len())),
        }
    }

    #[test]
    fn oversized_image_is_rejected() {
        match task("HELLO", "WORLD", png_bytes(6100, 480)).perform() {
            Err(CaptionError::TooLarge{actual, ..}) => {
                assert_that!(actual).is_equal_to(Dimensions{width: 6100, height: 480});
            },
            r => panic!("expected a TooLarge error, got {:?}", r.map(|b| b.len())),
        }
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        match task("HELLO", "WORLD", b"definitely not an image".to_vec()).perform() {
            Err(CaptionError::Decode(..)) => {},
            r => panic!("expected a Decode error, got {:?}", r.map(|b| b.len())),
        }
    }

    #[test]
    fn scaling_is_a_noop_within_the_fit_box() {
        let img = white_image(800, 600);
        let original_pixels = img.raw_pixels();
        let result = task("A", "B", vec![]).scale_to_fit(img);
        assert_that!(Dimensions::of(&result))
            .is_equal_to(Dimensions{width: 800, height: 600});
        assert_that!(result.raw_pixels()).is_equal_to(original_pixels);
    }

    #[test]
    fn scaling_preserves_aspect_ratio() {
        let result = task("A", "B", vec![]).scale_to_fit(white_image(4000, 900));
        let dims = Dimensions::of(&result);
        // Contain fit: the wider dimension touches the box bound exactly,
        // the other one lands wherever the original aspect puts it.
        assert_that!(dims.width).is_equal_to(1024);
        assert!(dims.height <= 768, "height {} exceeds the fit box", dims.height);
        assert!((dims.height as i64 - 230).abs() <= 1,
            "height {} is off the original 40:9 aspect", dims.height);
    }

    #[test]
    fn small_image_keeps_its_size_end_to_end() {
        let output = task("HELLO", "WORLD", png_bytes(800, 600)).perform().unwrap();
        let img = image::load_from_memory(&output).unwrap();
        assert_that!(Dimensions::of(&img))
            .is_equal_to(Dimensions{width: 800, height: 600});
    }

    #[test]
    fn captioned_image_is_scaled_into_the_fit_box() {
        let output = task("HELLO", "WORLD", png_bytes(1280, 960)).perform().unwrap();
        let img = image::load_from_memory(&output).unwrap();
        assert_that!(Dimensions::of(&img))
            .is_equal_to(Dimensions{width: 1024, height: 768});
    }

    #[test]
    fn captions_are_painted_at_the_top_and_bottom() {
        let output = task("HELLO", "WORLD", png_bytes(1280, 960)).perform().unwrap();
        let img = image::load_from_memory(&output).unwrap();
        let (width, height) = img.dimensions();

        let non_white_within = |y_min: u32, y_max: u32| {
            (y_min..y_max).any(|y| (0..width).any(|x| img.get_pixel(x, y) != WHITE))
        };

        assert!(non_white_within(0, 200), "no caption found in the top band");
        assert!(non_white_within(height - 200, height),
            "no caption found in the bottom band");
        assert!(!non_white_within(height / 2 - 20, height / 2 + 20),
            "something was painted over the middle of the image");
    }
}
