// Central error module. Crate-wide `ProjupError` to avoid `Box<dyn Error>`
// in public APIs.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Required parameter {0} is missing.")]
    RequiredConfigMissing(String),

    #[error("Invalid project file: {0}")]
    InvalidProject(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid override format (expected key=value): {0}")]
    InvalidSetFormat(String),
}

pub type Result<T> = std::result::Result<T, ProjupError>;
