pub mod pipeline;
pub mod rock_info;
pub mod types;

pub use pipeline::ClassificationPipeline;
pub use rock_info::{InfoSection, RockInfo};
pub use types::{ClassProbabilities, PredictionResult, RockClass, UploadedImage};
