use crate::utils::error::RockError;
use crate::Result;
use axum::body::Bytes;
use std::fmt;
use std::path::Path;

/// 概率和允许的误差
pub const PROBABILITY_TOLERANCE: f32 = 1e-5;

/// 允许上传的文件扩展名
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 岩石类别，顺序与模型输出一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockClass {
    Coal,
    Limestone,
    Sandstone,
}

impl RockClass {
    pub const ALL: [RockClass; 3] = [RockClass::Coal, RockClass::Limestone, RockClass::Sandstone];

    pub const fn index(self) -> usize {
        match self {
            RockClass::Coal => 0,
            RockClass::Limestone => 1,
            RockClass::Sandstone => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            RockClass::Coal => "Coal",
            RockClass::Limestone => "Limestone",
            RockClass::Sandstone => "Sandstone",
        }
    }

    /// 柱状图颜色，按类别位置固定
    pub const fn color(self) -> &'static str {
        match self {
            RockClass::Coal => "#4B3832",
            RockClass::Limestone => "#D8C292",
            RockClass::Sandstone => "#B59F78",
        }
    }
}

impl fmt::Display for RockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 模型输出的三分类概率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities([f32; 3]);

impl ClassProbabilities {
    /// 校验softmax输出：每个值在[0,1]之间且总和为1
    pub fn new(values: [f32; 3]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0) {
            return Err(RockError::Inference(format!(
                "Probability out of range [0, 1]: {}",
                bad
            )));
        }

        let sum: f32 = values.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(RockError::Inference(format!(
                "Probabilities must sum to 1.0, got {:.6}",
                sum
            )));
        }

        Ok(Self(values))
    }

    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let values: [f32; 3] = values.try_into().map_err(|_| {
            RockError::Inference(format!(
                "Expected {} class probabilities, got {}",
                RockClass::ALL.len(),
                values.len()
            ))
        })?;
        Self::new(values)
    }

    pub fn get(&self, class: RockClass) -> f32 {
        self.0[class.index()]
    }

    pub fn values(&self) -> &[f32; 3] {
        &self.0
    }

    /// 按固定顺序遍历 (类别, 概率)
    pub fn iter(&self) -> impl Iterator<Item = (RockClass, f32)> + '_ {
        RockClass::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// 最大概率对应的类别；并列时取索引最小者
    pub fn argmax(&self) -> RockClass {
        let mut best = RockClass::Coal;
        for (class, prob) in self.iter() {
            if prob > self.get(best) {
                best = class;
            }
        }
        best
    }

    pub fn max(&self) -> f32 {
        self.get(self.argmax())
    }
}

/// 预测结果：类别及置信度（百分比）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: RockClass,
    pub confidence: f32,
}

impl PredictionResult {
    pub fn from_probabilities(probabilities: &ClassProbabilities) -> Self {
        Self {
            label: probabilities.argmax(),
            confidence: probabilities.max() * 100.0,
        }
    }

    /// 置信度文本，保留两位小数
    pub fn confidence_text(&self) -> String {
        format!("{:.2}%", self.confidence)
    }
}

/// 单次上传的图像，请求结束后即丢弃
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// 检查文件扩展名（只在客户端提供了文件名时检查）
    ///
    /// 内容是否为有效图像由解码阶段判断，空文件也在那里以解码错误拒绝。
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.file_name {
            let extension = Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();

            if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
                return Err(RockError::UnsupportedFormat(format!(
                    "'{}' (accepted: {})",
                    name,
                    ACCEPTED_EXTENSIONS.join(", ")
                )));
            }
        }

        Ok(())
    }
}
