use crate::models::OnnxClassifier;
use crate::utils::error::RockError;
use crate::{Config, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// 全局模型单例，只初始化一次，之后只读共享
static CLASSIFIER: OnceCell<Arc<OnnxClassifier>> = OnceCell::new();

pub struct ModelManager;

impl ModelManager {
    /// 初始化全局分类器。重复调用返回同一个实例，不会重新加载
    pub fn init(config: &Config) -> Result<Arc<OnnxClassifier>> {
        let classifier = CLASSIFIER.get_or_try_init(|| {
            tracing::info!("Initializing model manager...");
            let classifier = OnnxClassifier::new(config)?;
            tracing::info!("Classification model loaded successfully");
            Ok::<_, RockError>(Arc::new(classifier))
        })?;

        if classifier.model_path() != config.model_path().as_path() {
            tracing::warn!(
                "Model already loaded from {}, ignoring {}",
                classifier.model_path().display(),
                config.model_path().display()
            );
        }

        Ok(Arc::clone(classifier))
    }
}
