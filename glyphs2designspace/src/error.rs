use thiserror::Error;
use write_fonts::types::InvalidTag;

#[derive(Debug, Error)]
pub enum Error {
    /// Only weight and width have user location conversions
    #[error("no user location conversion for axis '{0}'")]
    UnsupportedAxis(String),
    #[error("{0} is not a usWidthClass, expected 1..=9")]
    InvalidWidthClass(f64),
    #[error("invalid tag '{raw_tag}'")]
    InvalidTag { raw_tag: String, cause: InvalidTag },
    #[error("malformed glyph lib: {0}")]
    Lib(#[from] designspace_ir::Error),
}
