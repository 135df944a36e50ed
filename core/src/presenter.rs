//! Slide presenter: decides what a slide shows and shapes chart input.
//!
//! Drawing is left to the surface; this module only selects between a
//! chart, a placeholder image and nothing, and hands over records in the
//! form a charting widget expects.

use deck_common::{ChartType, Slide};

/// Tag rendered next to a slide footer.
pub const FOOTER_TAG: &str = "Public Health Insight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Self((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

/// Cyclic chart palette.
pub const PALETTE: [Rgb; 5] = [
    Rgb::hex(0x3b82f6),
    Rgb::hex(0x10b981),
    Rgb::hex(0xf59e0b),
    Rgb::hex(0xef4444),
    Rgb::hex(0x8b5cf6),
];

pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub values: Vec<f64>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub name: String,
    pub value: f64,
    /// Fraction of the pie, 0.0..=1.0.
    pub share: f64,
    pub color: Rgb,
}

/// Chart input handed to the charting widget.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar { categories: Vec<String>, series: Vec<Series> },
    Line { categories: Vec<String>, series: Series },
    Pie { sectors: Vec<Sector> },
}

impl ChartSpec {
    /// Shape the slide's records for its chart type. `None` when the slide
    /// has no chart type or no data.
    pub fn from_slide(slide: &Slide) -> Option<Self> {
        if !slide.has_chart() {
            return None;
        }
        let records = &slide.chart_data;
        let categories = || records.iter().map(|r| r.name.clone()).collect::<Vec<_>>();
        let primary = || Series {
            label: "value",
            values: records.iter().map(|r| r.value).collect(),
            color: PALETTE[0],
        };

        let spec = match slide.chart_type {
            ChartType::Bar => {
                let mut series = vec![primary()];
                if records.iter().any(|r| r.secondary.is_some()) {
                    series.push(Series {
                        label: "secondary",
                        values: records.iter().map(|r| r.secondary.unwrap_or(0.0)).collect(),
                        color: PALETTE[1],
                    });
                }
                ChartSpec::Bar { categories: categories(), series }
            }
            ChartType::Line => ChartSpec::Line { categories: categories(), series: primary() },
            ChartType::Pie => {
                let total: f64 = records.iter().map(|r| r.value.max(0.0)).sum();
                let sectors = records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Sector {
                        name: r.name.clone(),
                        value: r.value,
                        share: if total > 0.0 { r.value.max(0.0) / total } else { 0.0 },
                        color: palette_color(i),
                    })
                    .collect();
                ChartSpec::Pie { sectors }
            }
            ChartType::None => return None,
        };
        Some(spec)
    }

    pub fn chart_type(&self) -> ChartType {
        match self {
            ChartSpec::Bar { .. } => ChartType::Bar,
            ChartSpec::Line { .. } => ChartType::Line,
            ChartSpec::Pie { .. } => ChartType::Pie,
        }
    }
}

/// Source of placeholder images keyed by an opaque seed.
pub trait ImageProvider {
    fn placeholder_url(&self, seed: &str) -> String;
}

/// Seeded placeholder images from picsum.photos.
#[derive(Debug, Clone, Copy)]
pub struct PicsumImages {
    pub width: u32,
    pub height: u32,
}

impl Default for PicsumImages {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

impl ImageProvider for PicsumImages {
    fn placeholder_url(&self, seed: &str) -> String {
        format!("https://picsum.photos/seed/{seed}/{}/{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub seed: String,
    pub url: String,
    pub prompt: String,
}

/// The one visual a slide carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Chart(ChartSpec),
    Image(ImageRef),
    Nothing,
}

/// Render-ready view of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub bullets: &'a [String],
    pub visual: Visual,
    pub footer: Option<&'a str>,
}

pub fn present<'a>(slide: &'a Slide, images: &dyn ImageProvider) -> SlideView<'a> {
    let visual = match (ChartSpec::from_slide(slide), slide.image_prompt.as_deref()) {
        (Some(chart), _) => Visual::Chart(chart),
        (None, Some(prompt)) => Visual::Image(ImageRef {
            seed: slide.id.clone(),
            url: images.placeholder_url(&slide.id),
            prompt: prompt.to_string(),
        }),
        (None, None) => Visual::Nothing,
    };
    SlideView {
        title: &slide.title,
        subtitle: slide.subtitle.as_deref(),
        bullets: &slide.bullet_points,
        visual,
        footer: slide.footer.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_common::ChartRecord;

    fn slide(chart_type: ChartType, data: Vec<ChartRecord>) -> Slide {
        let mut s = Slide::new("lbp-trend", "Trends", vec!["Rising burden".into()]);
        s.chart_type = chart_type;
        s.chart_data = data;
        s
    }

    #[test]
    fn bar_with_two_records_is_one_series_two_categories() {
        let s = slide(
            ChartType::Bar,
            vec![ChartRecord::new("1990", 450.0), ChartRecord::new("2019", 600.0)],
        );
        let view = present(&s, &PicsumImages::default());
        let Visual::Chart(ChartSpec::Bar { categories, series }) = view.visual else {
            panic!("expected bar chart");
        };
        assert_eq!(categories, vec!["1990", "2019"]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values, vec![450.0, 600.0]);
        assert_eq!(series[0].color, PALETTE[0]);
    }

    #[test]
    fn bar_adds_secondary_series_when_any_record_has_one() {
        let s = slide(
            ChartType::Bar,
            vec![ChartRecord::new("M", 10.0), ChartRecord::new("F", 12.0).with_secondary(3.0)],
        );
        let Some(ChartSpec::Bar { series, .. }) = ChartSpec::from_slide(&s) else {
            panic!("expected bar chart");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].values, vec![0.0, 3.0]);
        assert_eq!(series[1].color, PALETTE[1]);
    }

    #[test]
    fn line_has_single_series() {
        let s = slide(
            ChartType::Line,
            vec![ChartRecord::new("1990", 1.0), ChartRecord::new("2000", 2.0), ChartRecord::new("2010", 3.0)],
        );
        let Some(ChartSpec::Line { categories, series }) = ChartSpec::from_slide(&s) else {
            panic!("expected line chart");
        };
        assert_eq!(categories.len(), 3);
        assert_eq!(series.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn pie_colors_cycle_through_palette() {
        let data = (0..7).map(|i| ChartRecord::new(format!("r{i}"), 1.0)).collect();
        let Some(ChartSpec::Pie { sectors }) = ChartSpec::from_slide(&slide(ChartType::Pie, data)) else {
            panic!("expected pie chart");
        };
        assert_eq!(sectors.len(), 7);
        assert_eq!(sectors[0].color, PALETTE[0]);
        assert_eq!(sectors[5].color, PALETTE[0]);
        assert_eq!(sectors[6].color, PALETTE[1]);
        let total: f64 = sectors.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pie_with_zero_total_has_zero_shares() {
        let data = vec![ChartRecord::new("a", 0.0), ChartRecord::new("b", -2.0)];
        let Some(ChartSpec::Pie { sectors }) = ChartSpec::from_slide(&slide(ChartType::Pie, data)) else {
            panic!("expected pie chart");
        };
        assert!(sectors.iter().all(|s| s.share == 0.0));
    }

    #[test]
    fn none_with_image_prompt_shows_placeholder_keyed_by_id() {
        let mut s = slide(ChartType::None, vec![ChartRecord::new("ignored", 1.0)]);
        s.image_prompt = Some("A person lifting a box".into());
        let view = present(&s, &PicsumImages::default());
        assert_eq!(
            view.visual,
            Visual::Image(ImageRef {
                seed: "lbp-trend".into(),
                url: "https://picsum.photos/seed/lbp-trend/800/600".into(),
                prompt: "A person lifting a box".into(),
            })
        );
    }

    #[test]
    fn chart_type_without_data_falls_back_to_image() {
        let mut s = slide(ChartType::Bar, Vec::new());
        s.image_prompt = Some("spine".into());
        assert!(matches!(present(&s, &PicsumImages::default()).visual, Visual::Image(_)));
    }

    #[test]
    fn plain_slide_has_no_visual() {
        let s = slide(ChartType::None, Vec::new());
        let view = present(&s, &PicsumImages::default());
        assert_eq!(view.visual, Visual::Nothing);
        assert_eq!(view.title, "Trends");
        assert_eq!(view.bullets, ["Rising burden".to_string()]);
    }

    #[test]
    fn custom_image_provider_is_used() {
        struct Fixed;
        impl ImageProvider for Fixed {
            fn placeholder_url(&self, seed: &str) -> String {
                format!("img://{seed}")
            }
        }
        let mut s = slide(ChartType::None, Vec::new());
        s.image_prompt = Some("x".into());
        let Visual::Image(image) = present(&s, &Fixed).visual else {
            panic!("expected image");
        };
        assert_eq!(image.url, "img://lbp-trend");
    }

    #[test]
    fn rgb_hex_splits_channels() {
        assert_eq!(Rgb::hex(0x3b82f6), Rgb(0x3b, 0x82, 0xf6));
    }
}
