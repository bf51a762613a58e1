//! Module for loading the font used for captions.

use std::env;
use std::fs;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use rusttype::{Font, FontCollection};


lazy_static! {
    static ref FONT_DIR: PathBuf =
        env::current_dir().unwrap().join("data").join("fonts");
}

const FILE_EXTENSION: &'static str = "ttf";


/// Load the font with given name.
///
/// The font is read from disk anew on every call;
/// captioning tasks are independent and share no state.
pub fn load(name: &str) -> io::Result<Font<'static>> {
    debug!("Loading font `{}`...", name);

    let path = FONT_DIR.join(format!("{}.{}", name, FILE_EXTENSION));
    let file = fs::File::open(&path).map_err(|e| {
        error!("Failed to open font file `{}`: {}", path.display(), e); e
    })?;

    // Read the font file into a byte buffer.
    let mut bytes = match file.metadata() {
        Ok(stat) => Vec::with_capacity(stat.len() as usize),
        Err(e) => {
            warn!("Failed to stat font file `{}` to obtain its size: {}",
                path.display(), e);
            Vec::new()
        },
    };
    let mut reader = BufReader::new(file);
    reader.read_to_end(&mut bytes).map_err(|e| {
        error!("Failed to read content of font file `{}`: {}", path.display(), e); e
    })?;

    let mut fonts: Vec<_> = FontCollection::from_bytes(bytes).into_fonts().collect();
    match fonts.len() {
        1 => {
            debug!("Font `{}` loaded successfully", name);
            Ok(fonts.remove(0))
        },
        0 => Err(invalid_font(
            format!("alleged font file `{}` contains no fonts", path.display()))),
        n => Err(invalid_font(
            format!("font file `{}` contains {} fonts, expected one", path.display(), n))),
    }
}

fn invalid_font(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}


#[cfg(test)]
mod tests {
    use model::DEFAULT_FONT;
    use super::load;

    #[test]
    fn the_default_font_loads() {
        if let Err(e) = load(DEFAULT_FONT) {
            panic!("failed to load the default font `{}`: {}", DEFAULT_FONT, e);
        }
    }

    #[test]
    fn missing_font_is_an_error() {
        assert!(load("NoSuchFont").is_err());
    }
}
