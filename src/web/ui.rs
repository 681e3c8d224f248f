use crate::classify::rock_info::RockInfo;
use crate::classify::types::ACCEPTED_EXTENSIONS;
use crate::presentation::{Presentation, View, IDLE_PROMPT};
use crate::utils::error::RockError;
use std::fmt::Write;

const PAGE_TITLE: &str = "Sedimentary Rock Classifier";

const STYLE: &str = r#"
    * { box-sizing: border-box; }

    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background-color: #F9F7F3;
        color: #2C2C2C;
        display: flex;
        min-height: 100vh;
    }

    .sidebar {
        width: 260px;
        padding: 30px 20px;
        background: #EFE6D2;
        border-right: 1px solid #D8C292;
    }

    .sidebar h2 { color: #4B3832; font-size: 1.2em; }
    .sidebar li { margin-bottom: 8px; }

    .main {
        flex: 1;
        background: linear-gradient(145deg, #F5E6CA 0%, #E9D8A6 100%);
        color: #2E2E2E;
        padding: 20px 40px 40px;
    }

    .title {
        text-align: center;
        font-size: 42px;
        font-weight: 800;
        color: #4B3832;
        margin-bottom: 10px;
    }

    .subtitle {
        text-align: center;
        font-size: 18px;
        color: #5A4632;
        margin-bottom: 30px;
    }

    .upload {
        background: rgba(255,255,255,0.6);
        border: 2px dashed #D8C292;
        border-radius: 15px;
        padding: 20px;
        margin-bottom: 25px;
    }

    .upload label { font-weight: 600; color: #4B3832; margin-right: 10px; }

    .upload button {
        background-color: #AF5B28;
        color: white;
        border-radius: 8px;
        padding: 10px 24px;
        font-size: 16px;
        border: none;
        cursor: pointer;
        transition: 0.3s;
    }

    .upload button:hover {
        background-color: #C27E48;
        transform: scale(1.03);
    }

    .columns { display: flex; gap: 30px; flex-wrap: wrap; }
    .column { flex: 1; min-width: 280px; }
    .column img { width: 100%; border-radius: 10px; }
    .caption { text-align: center; color: #5A4632; font-size: 0.9em; }

    .prediction-box {
        background: rgba(255,255,255,0.8);
        border-radius: 15px;
        padding: 25px;
        margin-top: 15px;
        text-align: center;
        border: 1px solid #D8C292;
        box-shadow: 0 0 10px rgba(0,0,0,0.05);
    }

    .confidence { color: #AF5B28; font-weight: bold; }

    .notice {
        background: #E8F1FA;
        border-left: 4px solid #4A7FB5;
        border-radius: 8px;
        padding: 15px 20px;
    }

    .error {
        background: #FBE9E7;
        border-left: 4px solid #AF5B28;
        border-radius: 8px;
        padding: 15px 20px;
    }

    .rock-info {
        background: rgba(255,255,255,0.7);
        border-radius: 12px;
        padding: 10px 25px;
    }
"#;

/// 渲染完整页面
pub fn render_page(view: &View, preview: Option<&str>) -> String {
    let body = match view {
        View::Idle => format!(r#"<div class="notice">{}</div>"#, escape_html(IDLE_PROMPT)),
        View::Presenting(presentation) => render_presentation(presentation, preview),
    };
    layout(&body)
}

/// 渲染错误页面，保留上传表单以便重新上传
pub fn render_error_page(err: &RockError) -> String {
    let hint = if err.is_client_error() {
        "Please upload a valid JPEG or PNG image of a rock."
    } else {
        "The classifier could not process this image."
    };

    let body = format!(
        r#"<div class="error"><strong>Could not classify this upload.</strong><br>{}<br><small>{}</small></div>"#,
        hint,
        escape_html(&err.to_string())
    );
    layout(&body)
}

fn layout(body: &str) -> String {
    let accept = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🌄</text></svg>">
    <style>{style}</style>
</head>
<body>
    <aside class="sidebar">
        <h2>📘 Instructions</h2>
        <ol>
            <li>Upload a <strong>clear image</strong> of the rock.</li>
            <li>Wait a few seconds for analysis.</li>
            <li>View classification results &amp; rock info.</li>
        </ol>
        <hr>
    </aside>
    <main class="main">
        <h1 class="title">🌄 {title}</h1>
        <p class="subtitle">Upload an image of a rock to classify it as Coal, Limestone, or Sandstone.</p>
        <form class="upload" action="/classify" method="post" enctype="multipart/form-data">
            <label for="file">📤 Upload Rock Image</label>
            <input type="file" id="file" name="file" accept="{accept}" onchange="this.form.submit()">
            <button type="submit">Classify</button>
        </form>
        {body}
    </main>
</body>
</html>"#,
        title = PAGE_TITLE,
        style = STYLE,
        accept = accept,
        body = body,
    )
}

fn render_presentation(presentation: &Presentation, preview: Option<&str>) -> String {
    let mut html = String::new();

    html.push_str(r#"<div class="columns"><div class="column">"#);
    if let Some(src) = preview {
        let _ = write!(
            html,
            r#"<img src="{}" alt="Uploaded rock"><p class="caption">🪨 Uploaded Rock Sample</p>"#,
            escape_html(src)
        );
    }
    html.push_str(r#"</div><div class="column">"#);
    let _ = write!(
        html,
        r#"<div class="prediction-box"><h3>🧭 Predicted Class: <strong>{}</strong></h3><h3>🔹 Confidence: <span class="confidence">{}</span></h3></div>"#,
        presentation.label_text(),
        presentation.confidence_text()
    );
    html.push_str("</div></div>");

    html.push_str("<h3>📊 Class Probabilities</h3>");
    html.push_str(&presentation.chart.to_svg());

    html.push_str("<h3>🪨 Rock Information</h3>");
    html.push_str(&render_info(presentation.info));

    html
}

fn render_info(info: &RockInfo) -> String {
    let mut html = String::from(r#"<div class="rock-info">"#);

    for section in info.sections {
        let heading = match section.icon {
            Some(icon) => format!("{} {}", icon, section.heading),
            None => section.heading.to_string(),
        };
        let _ = write!(
            html,
            "<p><strong>{}:</strong> {}</p>",
            heading,
            escape_html(section.body)
        );
    }

    if !info.uses.is_empty() {
        html.push_str("<p><strong>🔥 Uses:</strong></p><ul>");
        for item in info.uses {
            let _ = write!(html, "<li>{}</li>", escape_html(item));
        }
        html.push_str("</ul>");
    }

    if let Some(fact) = info.fun_fact {
        let _ = write!(
            html,
            "<p><strong>🌍 Fun Fact:</strong> {}</p>",
            escape_html(fact)
        );
    }

    html.push_str("</div>");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassProbabilities;
    use crate::presentation::ResultPresenter;

    #[test]
    fn test_idle_page_shows_prompt_only() {
        let html = render_page(&View::Idle, None);
        assert!(html.contains(IDLE_PROMPT));
        assert!(!html.contains("Predicted Class"));
        assert!(!html.contains("Prediction Probability Distribution"));
        assert!(html.contains(r#"accept=".jpg,.jpeg,.png""#));
    }

    #[test]
    fn test_presenting_page() {
        let presentation =
            ResultPresenter::present(ClassProbabilities::new([0.1, 0.8, 0.1]).unwrap());
        let html = render_page(
            &View::Presenting(presentation),
            Some("data:image/png;base64,AAAA"),
        );

        assert!(html.contains("<strong>Limestone</strong>"));
        assert!(html.contains("80.00%"));
        assert!(html.contains("80.0%"));
        assert!(html.contains("calcium carbonate"));
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
        assert!(!html.contains(IDLE_PROMPT));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let err = RockError::Decode("<script>alert(1)</script>".to_string());
        let html = render_error_page(&err);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_uses_heading_only_for_coal() {
        let coal = render_info(crate::classify::RockClass::Coal.info());
        assert!(coal.contains("🔥 Uses:"));
        assert!(coal.contains("<li>Major fuel source for electricity generation.</li>"));

        let sandstone = render_info(crate::classify::RockClass::Sandstone.info());
        assert!(!sandstone.contains("🔥"));
        assert!(sandstone.contains("<strong>Uses:</strong> Building stone, filters, and artwork material."));
        assert!(sandstone.contains("<strong>Composition:</strong>"));

        let limestone = render_info(crate::classify::RockClass::Limestone.info());
        assert!(limestone.contains("<strong>🧪 Composition:</strong>"));
        assert!(limestone.contains("<strong>Formation:</strong>"));
    }

    #[test]
    fn test_coal_info_has_fun_fact() {
        let html = render_info(crate::classify::RockClass::Coal.info());
        assert!(html.contains("Fun Fact"));
        assert!(html.contains("fossil sunlight"));
    }
}
