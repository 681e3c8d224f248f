use crate::classify::ClassProbabilities;
use crate::image::preprocessing::{ImageTensor, INPUT_SHAPE};
use crate::utils::error::RockError;
use crate::{Config, Result};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// 分类器接口：一张图像批次 → 三分类概率
///
/// 实现必须是无状态的（除加载好的权重外），同一输入总是得到同一输出。
pub trait RockModel: Send + Sync {
    fn predict(&self, tensor: &ImageTensor) -> Result<ClassProbabilities>;
}

/// 基于ONNX Runtime的岩石分类器
#[derive(Debug)]
pub struct OnnxClassifier {
    // Session::run需要&mut，权重本身只读
    session: Mutex<Session>,
    input_name: String, // 动态发现的输入名称
    model_path: PathBuf,
}

impl OnnxClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = config.model_path();

        if !model_path.exists() {
            return Err(RockError::ModelLoad(format!(
                "Classification model not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading classification model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| Self::load_error(model_path, e))?
            .with_optimization_level(Self::optimization_level(config.onnx_config.optimization_level))
            .map_err(|e| Self::load_error(model_path, e))?
            .with_intra_threads(config.onnx_config.intra_threads)
            .map_err(|e| Self::load_error(model_path, e))?
            .commit_from_file(model_path)
            .map_err(|e| Self::load_error(model_path, e))?;

        let input_name = match session.inputs().first() {
            Some(input) => input.name().to_string(),
            None => {
                return Err(RockError::ModelLoad(
                    "Classification model has no inputs".to_string(),
                ))
            }
        };
        tracing::info!("Classification model input: '{}'", input_name);

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            model_path: model_path.clone(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn load_error(path: &Path, err: impl std::fmt::Display) -> RockError {
        RockError::ModelLoad(format!("{}: {}", path.display(), err))
    }

    fn optimization_level(level: i32) -> GraphOptimizationLevel {
        match level {
            i32::MIN..=0 => GraphOptimizationLevel::Disable,
            1 => GraphOptimizationLevel::Level1,
            2 => GraphOptimizationLevel::Level2,
            _ => GraphOptimizationLevel::Level3,
        }
    }
}

impl RockModel for OnnxClassifier {
    fn predict(&self, tensor: &ImageTensor) -> Result<ClassProbabilities> {
        if tensor.shape() != INPUT_SHAPE {
            return Err(RockError::InvalidInput(format!(
                "Expected tensor shape {:?}, got {:?}",
                INPUT_SHAPE,
                tensor.shape()
            )));
        }

        let input = Tensor::from_array(tensor.view().to_owned())?;

        let values: Vec<f32> = {
            let mut session = self.session.lock();
            let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;

            let output = outputs
                .values()
                .next()
                .ok_or_else(|| RockError::Inference("Model produced no outputs".to_string()))?;

            let (_, data) = output.try_extract_tensor::<f32>()?;
            data.to_vec()
        };

        tracing::debug!("Raw model output: {:?}", values);

        // 模型最后一层已是softmax，这里只做校验
        ClassProbabilities::from_slice(&values)
    }
}
