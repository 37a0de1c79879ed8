//! Small SVG charts for the dashboards.
//!
//! Values are scaled linearly between the series minimum and maximum onto
//! the chart height. A flat series sits on the middle line.

use dioxus::prelude::*;

/// Map each value onto `0.0..=height`, smallest value at 0.
pub fn scale_to_height(values: &[f64], height: f64) -> Vec<f64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() {
        return vec![0.0; values.len()];
    }
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                0.0
            } else if span == 0.0 {
                height / 2.0
            } else {
                (v - min) / span * height
            }
        })
        .collect()
}

/// SVG `points` attribute for a polyline over `width` x `height`, y flipped
/// so larger values are drawn higher.
pub fn sparkline_points(values: &[f64], width: f64, height: f64) -> String {
    let scaled = scale_to_height(values, height);
    let step = if scaled.len() > 1 {
        width / (scaled.len() - 1) as f64
    } else {
        0.0
    };
    scaled
        .iter()
        .enumerate()
        .map(|(i, y)| format!("{:.1},{:.1}", i as f64 * step, height - y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bar heights for non-negative counts: zero stays at zero and the
/// largest bar fills the height.
pub fn bar_heights(values: &[f64], height: f64) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    values
        .iter()
        .map(|v| {
            if max <= 0.0 || !v.is_finite() || *v <= 0.0 {
                0.0
            } else {
                v / max * height
            }
        })
        .collect()
}

#[component]
pub fn Sparkline(
    values: Vec<f64>,
    #[props(default = 160.0)] width: f64,
    #[props(default = 40.0)] height: f64,
) -> Element {
    if values.is_empty() {
        return rsx! { span { class: "chart-empty", "No data" } };
    }
    let points = sparkline_points(&values, width, height);

    rsx! {
        svg {
            class: "sparkline",
            width: "{width}",
            height: "{height}",
            view_box: "0 0 {width} {height}",
            polyline {
                points: "{points}",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
            }
        }
    }
}

/// One labelled bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[component]
pub fn BarChart(
    bars: Vec<Bar>,
    #[props(default = 120.0)] height: f64,
    #[props(default = 32.0)] bar_width: f64,
) -> Element {
    if bars.is_empty() {
        return rsx! { span { class: "chart-empty", "No data" } };
    }
    let values: Vec<f64> = bars.iter().map(|b| b.value).collect();
    let heights = bar_heights(&values, height);
    let gap = 8.0;
    let label_space = 18.0;
    let width = bars.len() as f64 * (bar_width + gap);
    let total_height = height + label_space;
    let label_y = total_height - 4.0;
    let half = bar_width / 2.0;
    let columns: Vec<(f64, f64, f64, f64, &Bar)> = bars
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (bar, h))| {
            let x = i as f64 * (bar_width + gap);
            (x, height - h, h, x + half, bar)
        })
        .collect();

    rsx! {
        svg {
            class: "bar-chart",
            width: "{width}",
            height: "{total_height}",
            view_box: "0 0 {width} {total_height}",
            for (i, (x, y, h, label_x, bar)) in columns.into_iter().enumerate() {
                g {
                    key: "{i}",
                    rect {
                        x: "{x}",
                        y: "{y}",
                        width: "{bar_width}",
                        height: "{h}",
                        rx: "3",
                        class: "bar",
                    }
                    text {
                        x: "{label_x}",
                        y: "{label_y}",
                        text_anchor: "middle",
                        class: "bar-label",
                        "{bar.label}"
                    }
                    title { "{bar.label}: {bar.value}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_uses_min_and_max() {
        assert_eq!(scale_to_height(&[2.0, 4.0, 6.0], 10.0), vec![0.0, 5.0, 10.0]);
        assert_eq!(scale_to_height(&[3.0, 3.0], 10.0), vec![5.0, 5.0]);
        assert!(scale_to_height(&[], 10.0).is_empty());
    }

    #[test]
    fn test_sparkline_flips_y() {
        assert_eq!(sparkline_points(&[0.0, 1.0], 100.0, 20.0), "0.0,20.0 100.0,0.0");
    }

    #[test]
    fn test_bars_scale_from_zero() {
        assert_eq!(bar_heights(&[0.0, 5.0, 10.0], 100.0), vec![0.0, 50.0, 100.0]);
        assert_eq!(bar_heights(&[0.0, 0.0], 100.0), vec![0.0, 0.0]);
    }
}
