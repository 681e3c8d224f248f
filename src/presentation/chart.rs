use crate::classify::ClassProbabilities;
use std::fmt::Write;

/// y轴固定范围上限
pub const Y_MAX: f32 = 1.05;

const WIDTH: f32 = 500.0;
const HEIGHT: f32 = 500.0;
const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 50.0;
const BAR_WIDTH: f32 = 0.5;
const LABEL_OFFSET: f32 = 0.02;

const AXES_BACKGROUND: &str = "#F9F7F3";
const ANNOTATION_COLOR: &str = "#3C2F2F";
const AXIS_COLOR: &str = "#5A4632";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f32,
    pub color: &'static str,
    /// 柱顶标注，概率百分比保留一位小数
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub y_max: f32,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_probabilities(probabilities: &ClassProbabilities) -> Self {
        let bars = probabilities
            .iter()
            .map(|(class, prob)| Bar {
                label: class.label().to_string(),
                value: prob,
                color: class.color(),
                annotation: format!("{:.1}%", prob * 100.0),
            })
            .collect();

        Self {
            title: "Prediction Probability Distribution".to_string(),
            y_label: "Probability".to_string(),
            y_max: Y_MAX,
            bars,
        }
    }

    pub fn annotations(&self) -> Vec<&str> {
        self.bars.iter().map(|bar| bar.annotation.as_str()).collect()
    }

    /// 渲染为内联SVG
    pub fn to_svg(&self) -> String {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let y_to_px = |v: f32| MARGIN_TOP + plot_h * (1.0 - (v / self.y_max).clamp(0.0, 1.0));
        let slot = plot_w / self.bars.len().max(1) as f32;

        let mut svg = String::new();
        // 写入String不会失败
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}">"#,
            w = WIDTH,
            h = HEIGHT,
            title = self.title,
        );
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{pw}" height="{ph}" fill="{bg}"/>"#,
            x = MARGIN_LEFT,
            y = MARGIN_TOP,
            pw = plot_w,
            ph = plot_h,
            bg = AXES_BACKGROUND,
        );

        // y轴刻度
        for tick in [0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let y = y_to_px(tick);
            let _ = write!(
                svg,
                r#"<line x1="{x0}" y1="{y:.1}" x2="{x1}" y2="{y:.1}" stroke="{c}" stroke-width="1"/><text x="{tx}" y="{ty:.1}" font-size="9" text-anchor="end" fill="{c}">{tick:.1}</text>"#,
                x0 = MARGIN_LEFT - 4.0,
                x1 = MARGIN_LEFT,
                tx = MARGIN_LEFT - 8.0,
                ty = y + 3.0,
                c = AXIS_COLOR,
            );
        }

        for (i, bar) in self.bars.iter().enumerate() {
            let center = MARGIN_LEFT + slot * (i as f32 + 0.5);
            let bar_w = slot * BAR_WIDTH;
            let top = y_to_px(bar.value);
            let bottom = y_to_px(0.0);
            let label_y = y_to_px(bar.value + LABEL_OFFSET);

            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_w:.1}" height="{hgt:.1}" fill="{color}"/>"#,
                x = center - bar_w / 2.0,
                hgt = bottom - top,
                color = bar.color,
            );
            let _ = write!(
                svg,
                r#"<text x="{center:.1}" y="{label_y:.1}" font-size="9" font-weight="bold" text-anchor="middle" fill="{c}">{text}</text>"#,
                c = ANNOTATION_COLOR,
                text = bar.annotation,
            );
            let _ = write!(
                svg,
                r#"<text x="{center:.1}" y="{y:.1}" font-size="9" text-anchor="middle" fill="{c}">{label}</text>"#,
                y = bottom + 16.0,
                c = AXIS_COLOR,
                label = bar.label,
            );
        }

        let _ = write!(
            svg,
            r#"<line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}" stroke="{c}"/><line x1="{x}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="{c}"/>"#,
            x = MARGIN_LEFT,
            top = MARGIN_TOP,
            bottom = MARGIN_TOP + plot_h,
            right = MARGIN_LEFT + plot_w,
            c = AXIS_COLOR,
        );
        let _ = write!(
            svg,
            r#"<text x="{x}" y="28" font-size="12" font-weight="bold" text-anchor="middle" fill="{c}">{title}</text>"#,
            x = MARGIN_LEFT + plot_w / 2.0,
            c = AXIS_COLOR,
            title = self.title,
        );
        let _ = write!(
            svg,
            r#"<text x="18" y="{y}" font-size="10" text-anchor="middle" fill="{c}" transform="rotate(-90 18 {y})">{label}</text>"#,
            y = MARGIN_TOP + plot_h / 2.0,
            c = AXIS_COLOR,
            label = self.y_label,
        );
        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> BarChart {
        BarChart::from_probabilities(&ClassProbabilities::new([0.7, 0.2, 0.1]).unwrap())
    }

    #[test]
    fn test_bars_follow_class_order() {
        let chart = chart();
        let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Coal", "Limestone", "Sandstone"]);
        assert_eq!(chart.annotations(), vec!["70.0%", "20.0%", "10.0%"]);
    }

    #[test]
    fn test_fixed_axis_and_palette() {
        let chart = chart();
        assert_eq!(chart.y_max, 1.05);
        let colors: Vec<_> = chart.bars.iter().map(|b| b.color).collect();
        assert_eq!(colors, vec!["#4B3832", "#D8C292", "#B59F78"]);
    }

    #[test]
    fn test_svg_contains_bars_and_labels() {
        let svg = chart().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for text in ["70.0%", "20.0%", "10.0%", "Coal", "Limestone", "Sandstone", "#B59F78"] {
            assert!(svg.contains(text), "missing {}", text);
        }
        assert!(svg.contains("Prediction Probability Distribution"));
    }

    #[test]
    fn test_annotation_rounding() {
        let chart = BarChart::from_probabilities(
            &ClassProbabilities::new([0.33333, 0.33333, 0.33334]).unwrap(),
        );
        assert_eq!(chart.annotations(), vec!["33.3%", "33.3%", "33.3%"]);
    }
}
