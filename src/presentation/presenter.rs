use super::chart::BarChart;
use crate::classify::rock_info::RockInfo;
use crate::classify::{ClassProbabilities, PredictionResult};

/// 没有上传图像时显示的提示
pub const IDLE_PROMPT: &str = "👆 Upload an image to begin classification.";

/// 单次分类的全部展示内容
#[derive(Debug, Clone)]
pub struct Presentation {
    pub probabilities: ClassProbabilities,
    pub prediction: PredictionResult,
    pub chart: BarChart,
    pub info: &'static RockInfo,
}

impl Presentation {
    /// "Predicted Class" 一行
    pub fn label_text(&self) -> &'static str {
        self.prediction.label.label()
    }

    /// "Confidence" 一行
    pub fn confidence_text(&self) -> String {
        self.prediction.confidence_text()
    }
}

/// 页面状态：Idle（等待上传）或 Presenting（展示结果）
#[derive(Debug, Clone)]
pub enum View {
    Idle,
    Presenting(Presentation),
}

impl View {
    pub fn is_idle(&self) -> bool {
        matches!(self, View::Idle)
    }
}

pub struct ResultPresenter;

impl ResultPresenter {
    pub fn present(probabilities: ClassProbabilities) -> Presentation {
        let prediction = PredictionResult::from_probabilities(&probabilities);

        tracing::debug!(
            "Presenting {} at {} ({:?})",
            prediction.label,
            prediction.confidence_text(),
            probabilities.values()
        );

        Presentation {
            chart: BarChart::from_probabilities(&probabilities),
            info: prediction.label.info(),
            prediction,
            probabilities,
        }
    }
}
