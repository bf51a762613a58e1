//! Module validating the dimensions of input images.

use model::Dimensions;

use super::config::Config;


/// Result of checking an image against the configured dimension bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Image is within bounds and can be captioned.
    Accept,
    /// Image is smaller than the minimum bound.
    TooSmall,
    /// Image is larger than the maximum bound.
    TooLarge,
}

/// Check the dimensions of an input image against the bounds from `Config`.
///
/// The too-small check takes priority: an image that somehow violates
/// both bounds (e.g. a 320x7000 sliver) is reported as too small.
pub fn check(dims: Dimensions, config: &Config) -> Verdict {
    if dims.width < config.min_size.width || dims.height < config.min_size.height {
        return Verdict::TooSmall;
    }
    if dims.width > config.max_size.width || dims.height > config.max_size.height {
        return Verdict::TooLarge;
    }
    Verdict::Accept
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use caption::Config;
    use model::Dimensions;
    use super::{check, Verdict};

    fn verdict(width: u32, height: u32) -> Verdict {
        check(Dimensions{width, height}, &Config::default())
    }

    #[test]
    fn accepts_images_within_bounds() {
        for &(w, h) in [(640, 480), (641, 481), (1024, 768),
                        (6000, 6000), (640, 6000), (6000, 480)].iter() {
            asserting(&format!("{}x{}", w, h)).that(&verdict(w, h))
                .is_equal_to(Verdict::Accept);
        }
    }

    #[test]
    fn rejects_undersized_images() {
        for &(w, h) in [(639, 480), (640, 479), (320, 240), (1, 1)].iter() {
            asserting(&format!("{}x{}", w, h)).that(&verdict(w, h))
                .is_equal_to(Verdict::TooSmall);
        }
    }

    #[test]
    fn rejects_oversized_images() {
        for &(w, h) in [(6001, 6000), (6000, 6001), (7000, 5000), (640, 10000)].iter() {
            asserting(&format!("{}x{}", w, h)).that(&verdict(w, h))
                .is_equal_to(Verdict::TooLarge);
        }
    }

    #[test]
    fn too_small_takes_priority() {
        // One dimension below the minimum, the other above the maximum.
        assert_that!(verdict(320, 7000)).is_equal_to(Verdict::TooSmall);
        assert_that!(verdict(7000, 240)).is_equal_to(Verdict::TooSmall);
    }
}
