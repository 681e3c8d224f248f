use crate::{
    classify::{ClassificationPipeline, UploadedImage},
    image::ImageLoader,
    presentation::View,
    utils::error::RockError,
    web::{extractors::RequestId, ui, AppState},
    Result,
};
use axum::{
    extract::{Multipart, State},
    response::Html,
};
use std::time::Instant;

/// 首页处理器，初始状态为Idle
pub async fn index_handler() -> Html<String> {
    Html(ui::render_page(&View::Idle, None))
}

/// Multipart文件上传处理器，错误经由RockError渲染为错误页面
pub async fn classify_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    multipart: Multipart,
) -> Result<Html<String>> {
    let start_time = Instant::now();

    tracing::info!("Processing classification request: request_id={}", request_id);

    let (view, preview) = classify_upload(state, multipart).await.inspect_err(|e| {
        tracing::warn!(
            "Classification request failed: request_id={}, code={}, error={}",
            request_id,
            e.error_code(),
            e
        );
    })?;

    tracing::info!(
        "Classification request finished: request_id={}, idle={}, time={:.3}s",
        request_id,
        view.is_idle(),
        start_time.elapsed().as_secs_f32()
    );

    Ok(Html(ui::render_page(&view, preview.as_deref())))
}

async fn classify_upload(
    state: AppState,
    multipart: Multipart,
) -> Result<(View, Option<String>)> {
    let upload = read_upload(multipart).await?;

    let classifier = state.classifier.clone();
    let (view, upload) = tokio::task::spawn_blocking(move || {
        let view = ClassificationPipeline::run(upload.as_ref(), classifier.as_ref());
        (view, upload)
    })
    .await
    .map_err(|e| RockError::Internal(format!("Classification task failed: {}", e)))?;

    let view = view?;
    let preview = match (&view, &upload) {
        (View::Presenting(_), Some(upload)) => ImageLoader::to_data_url(&upload.bytes),
        _ => None,
    };

    Ok((view, preview))
}

/// 读取 "file" 字段；表单里没有选择文件时返回None
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedImage>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        RockError::InvalidInput(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or("unknown").to_string();

        if field_name != "file" {
            tracing::debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let data = field.bytes().await.map_err(|e| {
            RockError::InvalidInput(format!("Failed to read file data: {}", e))
        })?;

        // 浏览器在未选择文件时会提交一个空的file字段
        if data.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
            continue;
        }

        tracing::debug!(
            "Received file: name={:?}, content_type={:?}, {} bytes",
            file_name,
            content_type,
            data.len()
        );

        let mut image = UploadedImage::new(data);
        if let Some(name) = file_name.filter(|n| !n.is_empty()) {
            image = image.with_file_name(name);
        }

        // 新上传替换旧的
        upload = Some(image);
    }

    Ok(upload)
}
