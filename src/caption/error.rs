//! Captioning error.

use std::error::Error;
use std::fmt;
use std::io;

use hyper::StatusCode;
use image::ImageError;
use tokio_timer::{TimeoutError, TimerError};

use model::Dimensions;


/// Error that may occur during the captioning.
#[derive(Debug)]
pub enum CaptionError {
    // Errors caused by the input image.
    Decode(ImageError),
    TooSmall { actual: Dimensions, min: Dimensions },
    TooLarge { actual: Dimensions, max: Dimensions },

    // Errors from the rendering internals.
    Font(io::Error),
    Encode(io::Error),

    // Other.
    Timeout,
    Unavailable,
}
derive_enum_from!(ImageError => CaptionError::Decode);

unsafe impl Send for CaptionError {}

impl CaptionError {
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        match *self {
            CaptionError::TooSmall{..} => StatusCode::BadRequest,
            CaptionError::TooLarge{..} => StatusCode::BadRequest,
            // TODO: consider reporting decode failures as client errors;
            // a garbage upload is the user's fault, not ours
            CaptionError::Decode(..) => StatusCode::InternalServerError,
            CaptionError::Font(..) => StatusCode::InternalServerError,
            CaptionError::Encode(..) => StatusCode::InternalServerError,
            CaptionError::Timeout => StatusCode::InternalServerError,
            CaptionError::Unavailable => StatusCode::ServiceUnavailable,
        }
    }
}

impl Error for CaptionError {
    fn description(&self) -> &str { "captioning error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            CaptionError::Decode(ref e) => Some(e),
            CaptionError::Font(ref e) => Some(e),
            CaptionError::Encode(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CaptionError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionError::Decode(ref e) => write!(fmt, "cannot decode input image: {}", e),
            CaptionError::TooSmall{ref min, ..} =>
                write!(fmt, "image must be at least {}", min),
            CaptionError::TooLarge{ref max, ..} =>
                write!(fmt, "image cannot exceed {}", max),
            CaptionError::Font(ref e) => write!(fmt, "failed to load the caption font: {}", e),
            CaptionError::Encode(ref e) => write!(fmt, "failed to encode the final image: {}", e),
            CaptionError::Timeout => write!(fmt, "caption task timed out"),
            CaptionError::Unavailable => write!(fmt, "captioning currently unavailable"),
        }
    }
}

// Necessary for imposing a timeout on the CaptionTask.
impl<F> From<TimeoutError<F>> for CaptionError {
    fn from(e: TimeoutError<F>) -> Self {
        match e {
            TimeoutError::Timer(_, TimerError::NoCapacity) => CaptionError::Unavailable,
            _ => CaptionError::Timeout,
        }
    }
}
