pub mod classifier;
pub mod manager;

pub use classifier::{OnnxClassifier, RockModel};
pub use manager::ModelManager;
