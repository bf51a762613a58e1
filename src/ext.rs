//! Extension module, gluing together & enhancing the third-party libraries.

pub mod hyper {
    use futures::{BoxFuture, future, Future, Stream};
    use hyper::{Body, Error};
    use hyper::header::ContentType;
    use mime;


    /// Trait with additional methods for the Hyper Body object.
    pub trait BodyExt {
        fn into_bytes(self) -> BoxFuture<Vec<u8>, Error>;
    }

    impl BodyExt for Body {
        fn into_bytes(self) -> BoxFuture<Vec<u8>, Error> {
            self.fold(vec![], |mut buf, chunk| {
                buf.extend_from_slice(&*chunk);
                future::ok::<_, Error>(buf)
            }).boxed()
        }
    }


    /// Trait with additional methods for the ContentType header.
    pub trait ContentTypeExt {
        /// The multipart/form-data boundary, if this is such a content type.
        fn multipart_boundary(&self) -> Option<&str>;
    }

    impl ContentTypeExt for ContentType {
        fn multipart_boundary(&self) -> Option<&str> {
            let mime = &self.0;
            if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA {
                mime.get_param(mime::BOUNDARY).map(|b| b.as_str())
            } else {
                None
            }
        }
    }


    #[cfg(test)]
    mod tests {
        use hyper::header::ContentType;
        use super::ContentTypeExt;

        #[test]
        fn boundary_of_a_form_content_type() {
            let ct = ContentType(
                "multipart/form-data; boundary=deadbeef".parse().unwrap());
            assert_eq!(Some("deadbeef"), ct.multipart_boundary());
        }

        #[test]
        fn no_boundary_outside_multipart() {
            assert_eq!(None, ContentType::json().multipart_boundary());
            assert_eq!(None, ContentType::png().multipart_boundary());
        }

        #[test]
        fn no_boundary_when_the_param_is_missing() {
            let ct = ContentType("multipart/form-data".parse().unwrap());
            assert_eq!(None, ct.multipart_boundary());
        }
    }
}
