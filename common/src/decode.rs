//! Strict decoding of model output into [`Presentation`].
//!
//! Model text is parsed into loosely shaped wire structs first, then
//! validated into the domain types. Nothing is repaired: any structural
//! problem becomes a [`GenerationError::Format`].

use serde::Deserialize;

use crate::error::GenerationError;
use crate::types::{ChartRecord, ChartType, Presentation, Slide};

#[derive(Debug, Deserialize)]
struct WireDeck {
    slides: Vec<WireSlide>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSlide {
    id: Label,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    bullet_points: Vec<String>,
    #[serde(default)]
    image_prompt: Option<String>,
    chart_type: String,
    #[serde(default)]
    chart_data: Option<Vec<WireRecord>>,
    #[serde(default)]
    footer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    name: Label,
    value: Numeric,
    #[serde(default)]
    secondary: Option<Numeric>,
}

/// Category labels and ids: models sometimes emit years as bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
}

impl Label {
    fn into_string(self) -> String {
        match self {
            Label::Text(s) => s,
            Label::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self) -> Option<f64> {
        let v = match self {
            Numeric::Number(v) => *v,
            Numeric::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

/// Decode the JSON text returned by the model.
pub fn decode_presentation(text: &str) -> Result<Presentation, GenerationError> {
    let deck: WireDeck = serde_json::from_str(text)?;
    let slides = deck
        .slides
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| convert_slide(idx, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Presentation::new(slides).ok_or_else(|| GenerationError::format("response contains no slides"))
}

fn convert_slide(idx: usize, raw: WireSlide) -> Result<Slide, GenerationError> {
    let n = idx + 1;
    if raw.title.trim().is_empty() {
        return Err(GenerationError::format(format!("slide {n}: title is empty")));
    }
    if raw.bullet_points.is_empty() {
        return Err(GenerationError::format(format!("slide {n}: bulletPoints is empty")));
    }
    let chart_type = ChartType::parse(&raw.chart_type).ok_or_else(|| {
        GenerationError::format(format!("slide {n}: unknown chartType '{}'", raw.chart_type))
    })?;

    let chart_data = raw
        .chart_data
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(pos, record)| convert_record(n, pos, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Slide {
        id: raw.id.into_string(),
        title: raw.title,
        subtitle: raw.subtitle,
        bullet_points: raw.bullet_points,
        image_prompt: raw.image_prompt,
        chart_type,
        chart_data,
        footer: raw.footer,
    })
}

fn convert_record(slide: usize, pos: usize, raw: WireRecord) -> Result<ChartRecord, GenerationError> {
    let value = raw.value.to_f64().ok_or_else(|| {
        GenerationError::format(format!("slide {slide}: chartData[{pos}].value is not a number"))
    })?;
    let secondary = match raw.secondary {
        Some(s) => Some(s.to_f64().ok_or_else(|| {
            GenerationError::format(format!(
                "slide {slide}: chartData[{pos}].secondary is not a number"
            ))
        })?),
        None => None,
    };
    Ok(ChartRecord { name: raw.name.into_string(), value, secondary })
}
