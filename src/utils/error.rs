use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RockError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0} bytes, max allowed: {1} bytes")]
    FileTooLarge(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ORT error: {0}")]
    Ort(#[from] ort::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl RockError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RockError::Decode(_) => StatusCode::BAD_REQUEST,
            RockError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RockError::FileTooLarge(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
            RockError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RockError::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RockError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            RockError::Decode(_) => "DECODE_ERROR",
            RockError::Inference(_) => "INFERENCE_ERROR",
            RockError::InvalidInput(_) => "INVALID_INPUT",
            RockError::FileTooLarge(_, _) => "FILE_TOO_LARGE",
            RockError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            RockError::Config(_) => "CONFIG_ERROR",
            RockError::Io(_) => "IO_ERROR",
            RockError::Ort(_) => "ORT_ERROR",
            RockError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否是用户上传导致的错误（可以重新上传解决）
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<image::ImageError> for RockError {
    fn from(err: image::ImageError) -> Self {
        RockError::Decode(err.to_string())
    }
}
