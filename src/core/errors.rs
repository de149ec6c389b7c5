use thiserror::Error;

#[derive(Error, Debug)]
pub enum FudagenError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Zip error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Cache encode error: {0}")]
    CacheEncode(Box<bincode::error::EncodeError>),

    #[error("Cache decode error: {0}")]
    CacheDecode(Box<bincode::error::DecodeError>),

    #[error(
        "{0} not found (download dictionary exports from https://github.com/scriptin/jmdict-simplified/releases/latest)"
    )]
    MissingSource(String),

    #[error("No JSON file found in archive: {0}")]
    EmptyArchive(String),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("Failed to load unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("FudagenError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for FudagenError {
    fn from(error: std::io::Error) -> Self {
        FudagenError::Io(Box::new(error))
    }
}

impl From<zip::result::ZipError> for FudagenError {
    fn from(error: zip::result::ZipError) -> Self {
        FudagenError::Zip(Box::new(error))
    }
}

impl From<csv::Error> for FudagenError {
    fn from(error: csv::Error) -> Self {
        FudagenError::Csv(Box::new(error))
    }
}

impl From<bincode::error::EncodeError> for FudagenError {
    fn from(error: bincode::error::EncodeError) -> Self {
        FudagenError::CacheEncode(Box::new(error))
    }
}

impl From<bincode::error::DecodeError> for FudagenError {
    fn from(error: bincode::error::DecodeError) -> Self {
        FudagenError::CacheDecode(Box::new(error))
    }
}
