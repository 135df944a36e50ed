use serde::Serialize;

/// Kind of chart a slide asks for. An absent chart type is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
    #[default]
    None,
}

impl ChartType {
    /// Parse the model's chart type string. Matching ignores case and
    /// surrounding whitespace; an empty string means no chart.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(Self::Bar),
            "pie" => Some(Self::Pie),
            "line" => Some(Self::Line),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Line => "line",
            Self::None => "none",
        }
    }
}

/// One category of chart data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<f64>,
}

impl ChartRecord {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value, secondary: None }
    }

    pub fn with_secondary(mut self, secondary: f64) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

/// A single presentation slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub bullet_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    pub chart_type: ChartType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chart_data: Vec<ChartRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Slide {
    /// Text-only slide; mostly useful for building fixtures.
    pub fn new(id: impl Into<String>, title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            bullet_points: bullets,
            image_prompt: None,
            chart_type: ChartType::None,
            chart_data: Vec::new(),
            footer: None,
        }
    }

    /// True when the slide should be drawn with a chart.
    pub fn has_chart(&self) -> bool {
        self.chart_type != ChartType::None && !self.chart_data.is_empty()
    }
}

/// Ordered, non-empty collection of slides produced by one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    slides: Vec<Slide>,
}

impl Presentation {
    /// Returns `None` for an empty slide list.
    pub fn new(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            None
        } else {
            Some(Self { slides })
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a constructed presentation; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }
}
