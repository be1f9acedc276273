//! Plotly figure output
//!
//! Produces `{ "data": [traces], "layout": {...} }`, the JSON shape
//! Plotly.js accepts directly.

use super::{ChartRenderer, RenderError};
use crate::data::{ChartData, ChartSpec, ChartStyle, Series};
use crate::types::ChartType;
use serde_json::{Map, Value, json};

/// Renders chart specs as Plotly JSON figures
#[derive(Clone, Copy, Debug, Default)]
pub struct PlotlyRenderer;

impl ChartRenderer for PlotlyRenderer {
    type Artifact = Value;

    fn render(&self, spec: &ChartSpec) -> Result<Value, RenderError> {
        let primary = spec.palette.and_then(|p| p.first().copied());
        let (trace, x_title, y_title) = match &spec.data {
            ChartData::XY { x, y } => {
                let trace = xy_trace(&spec.kind, x, y, primary)?;
                (trace, Some(&x.name), Some(&y.name))
            }
            ChartData::Pie { names, values } => {
                (pie_trace(names, values, spec.palette), None, None)
            }
            ChartData::Histogram { x } => {
                let mut trace = json!({ "type": "histogram", "x": x.values, "name": x.name });
                set_marker_color(&mut trace, primary);
                (trace, Some(&x.name), None)
            }
            ChartData::Box { category, values } => {
                let mut trace = json!({ "type": "box", "y": values.values, "name": values.name });
                if let Some(category) = category {
                    trace["x"] = json!(category.values);
                }
                set_marker_color(&mut trace, primary);
                (trace, category.as_ref().map(|c| &c.name), Some(&values.name))
            }
            ChartData::Heatmap { labels, matrix } => {
                let mut trace = json!({ "type": "heatmap", "z": matrix, "x": labels, "y": labels });
                if let Some(scale) = spec.color_scale {
                    trace["colorscale"] = color_scale(scale);
                }
                (trace, None, None)
            }
        };

        let y_title = match (&spec.data, y_title) {
            (ChartData::Histogram { .. }, _) => Some("count"),
            (_, title) => title.map(String::as_str),
        };

        Ok(json!({
            "data": [trace],
            "layout": layout(spec, x_title.map(String::as_str), y_title),
        }))
    }
}

fn xy_trace(
    kind: &ChartType,
    x: &Series,
    y: &Series,
    color: Option<&str>,
) -> Result<Value, RenderError> {
    let mut trace = json!({ "x": x.values, "y": y.values, "name": y.name });
    match kind {
        ChartType::Bar => {
            trace["type"] = json!("bar");
            set_marker_color(&mut trace, color);
        }
        ChartType::Scatter => {
            trace["type"] = json!("scatter");
            trace["mode"] = json!("markers");
            set_marker_color(&mut trace, color);
        }
        ChartType::Line | ChartType::Area => {
            trace["type"] = json!("scatter");
            trace["mode"] = json!("lines");
            if matches!(kind, ChartType::Area) {
                trace["fill"] = json!("tozeroy");
            }
            if let Some(color) = color {
                trace["line"] = json!({ "color": color });
            }
        }
        other => return Err(RenderError::Unsupported(other.label().to_string())),
    }
    Ok(trace)
}

fn pie_trace(names: &Series, values: &Series, palette: Option<&[&str]>) -> Value {
    let mut trace = json!({
        "type": "pie",
        "labels": names.values,
        "values": values.values,
        "name": values.name,
    });
    if let Some(palette) = palette {
        trace["marker"] = json!({ "colors": palette });
    }
    trace
}

fn set_marker_color(trace: &mut Value, color: Option<&str>) {
    if let Some(color) = color {
        trace["marker"] = json!({ "color": color });
    }
}

/// Spread palette colors evenly over [0, 1]
fn color_scale(colors: &[&str]) -> Value {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    Value::Array(
        colors
            .iter()
            .enumerate()
            .map(|(i, color)| json!([i as f64 / last, color]))
            .collect(),
    )
}

fn axis(style: &ChartStyle, title: Option<&str>) -> Value {
    let mut axis = json!({
        "showgrid": true,
        "gridwidth": style.grid_width,
        "gridcolor": style.grid_color,
        "showline": true,
        "linewidth": style.axis_line_width,
        "linecolor": style.axis_line_color,
    });
    if let Some(title) = title {
        axis["title"] = json!({ "text": title });
    }
    axis
}

fn layout(spec: &ChartSpec, x_title: Option<&str>, y_title: Option<&str>) -> Value {
    let style = &spec.style;
    let (l, r, t, b) = style.margin;

    let mut layout = Map::new();
    layout.insert(
        "title".into(),
        json!({
            "text": spec.title,
            "x": style.title_x,
            "font": { "size": style.title_font_size, "color": style.title_color },
        }),
    );
    layout.insert(
        "font".into(),
        json!({ "family": style.font_family, "size": style.font_size }),
    );
    layout.insert("plot_bgcolor".into(), json!(style.plot_background));
    layout.insert("paper_bgcolor".into(), json!(style.paper_background));
    layout.insert("margin".into(), json!({ "l": l, "r": r, "t": t, "b": b }));
    layout.insert("height".into(), json!(style.height));
    layout.insert("xaxis".into(), axis(style, x_title));
    layout.insert("yaxis".into(), axis(style, y_title));
    if let Some(palette) = spec.palette {
        layout.insert("colorway".into(), json!(palette));
    }
    Value::Object(layout)
}
