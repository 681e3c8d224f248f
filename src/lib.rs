pub mod config;
pub mod models;
pub mod image;
pub mod classify;
pub mod presentation;
pub mod web;
pub mod utils;

// 重新导出主要类型
pub use classify::{ClassProbabilities, PredictionResult, RockClass, UploadedImage};
pub use config::Config;
pub use models::RockModel;
pub use utils::error::RockError;

pub type Result<T> = std::result::Result<T, RockError>;
