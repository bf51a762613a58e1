//! Module with the service that implements ALL the functionality.

use futures::{BoxFuture, future, Future};
use hyper::{self, Post, StatusCode};
use hyper::header::{ContentLength, ContentType};
use hyper::server::{Service, Request, Response};

use ext::hyper::BodyExt;
use handlers;


/// Hyper async service implementing ALL the functionality.
pub struct Memed;

impl Service for Memed {
    type Request = Request;
    type Response = Response;
    type Error = hyper::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn call(&self, req: Request) -> Self::Future {
        // TODO: log the request after the response is served, in Common Log Format;
        // need to retain the request info first
        self.log(&req);
        self.handle(req).map(|mut resp| {
            Self::fix_headers(&mut resp);
            debug!("HTTP {}, sent {} bytes (ContentType: {})",
                resp.status(),
                if resp.headers().has::<ContentLength>() {
                    format!("{}", **resp.headers().get::<ContentLength>().unwrap())
                } else {
                    "unknown number of".into()
                },
                resp.headers().get::<ContentType>().unwrap());
            resp
        }).boxed()
    }
}

impl Memed {
    fn handle(&self, req: Request) -> <Memed as Service>::Future {
        match (req.method(), req.path()) {
            (&Post, "/meme") => self.handle_meme(req),
            (_, "/meme") => self.handle_405(req),
            _ => self.handle_404(req),
        }
    }

    /// Handle the meme captioning request.
    fn handle_meme(&self, request: Request) -> <Memed as Service>::Future {
        let content_type = request.headers().get::<ContentType>().cloned();
        let (_, _, _, _, body) = request.deconstruct();
        body.into_bytes()
            .and_then(move |bytes| handlers::caption_meme(content_type, bytes))
            .boxed()
    }

    fn handle_405(&self, req: Request) -> <Memed as Service>::Future {
        warn!("Unsupported HTTP method for {}: {}", req.path(), req.method());
        let response = Response::new().with_status(StatusCode::MethodNotAllowed)
            .with_header(ContentType::plaintext())
            .with_header(ContentLength(0));
        future::ok(response).boxed()
    }

    fn handle_404(&self, req: Request) -> <Memed as Service>::Future {
        debug!("Path {} doesn't match any endpoint", req.path());
        let response = Response::new().with_status(StatusCode::NotFound)
            .with_header(ContentType::plaintext())
            .with_header(ContentLength(0));
        future::ok(response).boxed()
    }
}

impl Memed {
    #[inline]
    fn log(&self, req: &Request) {
        info!("{} {} {}{} {}",
            req.remote_addr().map(|a| format!("{}", a.ip())).unwrap_or_else(|| "-".to_owned()),
            format!("{}", req.method()).to_uppercase(),
            req.path(),
            req.query().map(|q| format!("?{}", q)).unwrap_or_else(String::new),
            req.version());
    }

    /// Fix headers in the response, providing default values where necessary.
    fn fix_headers(resp: &mut Response) {
        if !resp.headers().has::<ContentType>() {
            resp.headers_mut().set(ContentType::octet_stream());
        }
    }
}
