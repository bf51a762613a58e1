//! Module decoding the multipart form of a meme request.

use std::error::Error;
use std::fmt;
use std::io::{self, Read};

use multipart::server::Multipart;

use model::MemeRequest;


/// Names of the expected form fields.
const TOP_TEXT_FIELD: &'static str = "topText";
const BOTTOM_TEXT_FIELD: &'static str = "bottomText";
const IMAGE_FIELD: &'static str = "image";


/// Decode a meme request from the bytes of a multipart/form-data body.
///
/// Unknown fields are ignored. Both text fields and the image file
/// are required; an empty value counts as a missing one.
pub fn parse<R: Read>(body: R, boundary: &str) -> Result<MemeRequest, FormError> {
    let mut multipart = Multipart::with_body(body, boundary);

    let mut top_text = None;
    let mut bottom_text = None;
    let mut image = None;

    while let Some(mut field) = multipart.read_entry()? {
        let name = field.headers.name.to_string();
        match name.as_str() {
            TOP_TEXT_FIELD => top_text = Some(read_text(&mut field.data)?),
            BOTTOM_TEXT_FIELD => bottom_text = Some(read_text(&mut field.data)?),
            IMAGE_FIELD => {
                let mut bytes = Vec::new();
                field.data.read_to_end(&mut bytes)?;
                trace!("Read {} bytes of the image file", bytes.len());
                image = Some(bytes);
            },
            name => debug!("Ignoring unknown form field `{}`", name),
        }
    }

    let top_text = top_text.ok_or(FormError::MissingText)?;
    let bottom_text = bottom_text.ok_or(FormError::MissingText)?;
    if top_text.is_empty() || bottom_text.is_empty() {
        return Err(FormError::MissingText);
    }

    let image = image.ok_or(FormError::MissingImage)?;
    if image.is_empty() {
        return Err(FormError::MissingImage);
    }

    Ok(MemeRequest{top_text, bottom_text, image})
}

/// Read a text field of the form.
fn read_text<R: Read>(data: &mut R) -> Result<String, FormError> {
    let mut text = String::new();
    data.read_to_string(&mut text)?;
    Ok(text)
}


/// Error while decoding the multipart form.
#[derive(Debug)]
pub enum FormError {
    /// One or both caption texts are absent or empty.
    MissingText,
    /// The image file is absent or empty.
    MissingImage,
    /// The multipart body itself couldn't be read.
    Malformed(io::Error),
}
derive_enum_from!(io::Error => FormError::Malformed);

impl Error for FormError {
    fn description(&self) -> &str { "invalid meme request" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            FormError::Malformed(ref e) => Some(e),
            _ => None,
        }
    }
}
impl fmt::Display for FormError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FormError::MissingText =>
                write!(fmt, "must include {} and {}", TOP_TEXT_FIELD, BOTTOM_TEXT_FIELD),
            FormError::MissingImage =>
                write!(fmt, "must include an image file"),
            FormError::Malformed(ref e) =>
                write!(fmt, "malformed multipart body: {}", e),
        }
    }
}
