use crate::{
    classify::UploadedImage,
    image::ImagePreprocessor,
    models::RockModel,
    presentation::{Presentation, ResultPresenter, View},
    Result,
};
use std::time::Instant;

/// 上传 → 预处理 → 推理 → 展示
pub struct ClassificationPipeline;

impl ClassificationPipeline {
    /// 没有上传时直接返回Idle，不做任何计算
    pub fn run(upload: Option<&UploadedImage>, model: &dyn RockModel) -> Result<View> {
        match upload {
            None => Ok(View::Idle),
            Some(upload) => Self::classify(upload, model).map(View::Presenting),
        }
    }

    pub fn classify(upload: &UploadedImage, model: &dyn RockModel) -> Result<Presentation> {
        let start_time = Instant::now();

        upload.validate()?;

        let tensor = ImagePreprocessor::preprocess_bytes(&upload.bytes)?;
        let preprocessing_time = start_time.elapsed();

        let inference_start = Instant::now();
        let probabilities = model.predict(&tensor)?;
        let inference_time = inference_start.elapsed();

        let presentation = ResultPresenter::present(probabilities);

        tracing::info!(
            "Classification completed: label={}, confidence={}, preprocess={:.3}s, inference={:.3}s",
            presentation.label_text(),
            presentation.confidence_text(),
            preprocessing_time.as_secs_f32(),
            inference_time.as_secs_f32()
        );

        Ok(presentation)
    }
}
