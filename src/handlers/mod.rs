//! Module with the server's request handlers.

mod form;
pub mod util;


use futures::{BoxFuture, future, Future};
use hyper::{self, StatusCode};
use hyper::header::{ContentLength, ContentType};
use hyper::server::Response;

use caption::CAPTIONER;
use ext::hyper::ContentTypeExt;
use model::MemeRequest;
pub use self::form::FormError;
use self::util::error_response;


/// Handle the meme captioning HTTP request.
pub fn caption_meme(content_type: Option<ContentType>,
                    body: Vec<u8>) -> BoxFuture<Response, hyper::Error> {
    let boundary = match content_type.as_ref().and_then(|ct| ct.multipart_boundary()) {
        Some(b) => b.to_owned(),
        None => {
            warn!("Meme request without a multipart/form-data content type");
            return future::ok(error_response(
                StatusCode::BadRequest, "request must be multipart/form-data")).boxed();
        },
    };

    debug!("Decoding multipart form from {} bytes of request body", body.len());
    let request: MemeRequest = match form::parse(&body[..], &boundary) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to decode meme request: {}", e);
            return future::ok(error_response(StatusCode::BadRequest, e)).boxed();
        },
    };
    debug!("Decoded {:?}", request);

    CAPTIONER.render(request)
        .map(|image_bytes| {
            Response::new()
                .with_header(ContentType::png())
                .with_header(ContentLength(image_bytes.len() as u64))
                .with_body(image_bytes)
        })
        .or_else(|e| future::ok(error_response(e.status_code(), e)))
        .boxed()
}
