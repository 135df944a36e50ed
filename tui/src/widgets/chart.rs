//! Chart drawing on top of ratatui's `BarChart` and `Chart` widgets.
//! Pie charts have no ratatui counterpart and are drawn as a share legend.

use deck_core::presenter::{ChartSpec, Rgb, Sector, Series};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Bar heights are scaled so the tallest bar maps to this value.
const BAR_SCALE: f64 = 1000.0;
const MAX_AXIS_LABELS: usize = 6;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

pub struct ChartWidget<'a> {
    spec: &'a ChartSpec,
}

impl<'a> ChartWidget<'a> {
    pub fn new(spec: &'a ChartSpec) -> Self {
        Self { spec }
    }
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} chart ", self.spec.chart_type().as_str()));
        match self.spec {
            ChartSpec::Bar { categories, series } => render_bar(categories, series, block, area, buf),
            ChartSpec::Line { categories, series } => render_line(categories, series, block, area, buf),
            ChartSpec::Pie { sectors } => render_pie(sectors, block, area, buf),
        }
    }
}

fn render_bar(categories: &[String], series: &[Series], block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { BAR_SCALE / max } else { 0.0 };

    let per_group = usize::from(area.width.saturating_sub(2)) / categories.len().max(1);
    let per_bar = per_group.saturating_sub(2) / series.len().max(1);
    let bar_width = u16::try_from(per_bar.clamp(1, 9)).unwrap_or(1);

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2)
        .max(BAR_SCALE as u64);

    for (i, category) in categories.iter().enumerate() {
        let bars: Vec<Bar> = series
            .iter()
            .map(|s| {
                let v = s.values.get(i).copied().unwrap_or(0.0);
                Bar::default()
                    .value((v.max(0.0) * scale).round() as u64)
                    .text_value(format_value(v))
                    .style(Style::default().fg(color(s.color)))
                    .value_style(Style::default().fg(Color::Black).bg(color(s.color)))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(category.clone())).bars(&bars));
    }
    chart.render(area, buf);
}

fn render_line(categories: &[String], series: &Series, block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let lo = series.values.iter().copied().fold(0.0_f64, f64::min);
    let hi = series.values.iter().copied().fold(f64::MIN, f64::max);
    let hi = if hi <= lo { lo + 1.0 } else { hi + (hi - lo) * 0.1 };
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = if categories.len() <= MAX_AXIS_LABELS {
        categories.iter().map(|c| Span::raw(c.clone())).collect()
    } else {
        let first = categories.first().cloned().unwrap_or_default();
        let last = categories.last().cloned().unwrap_or_default();
        vec![Span::raw(first), Span::raw(last)]
    };

    let dataset = Dataset::default()
        .name(series.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color(series.color)))
        .data(&points);

    Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([lo, hi])
                .labels(vec![Span::raw(format_value(lo)), Span::raw(format_value(hi))]),
        )
        .render(area, buf);
}

fn render_pie(sectors: &[Sector], block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let name_width = sectors.iter().map(|s| s.name.chars().count()).max().unwrap_or(0).min(24);
    // name, share and value columns plus separators
    let bar_space = (area.width as usize).saturating_sub(name_width + 24);

    let lines: Vec<Line> = sectors
        .iter()
        .map(|s| {
            let fill = (s.share * bar_space as f64).round() as usize;
            let name: String = s.name.chars().take(name_width).collect();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color(s.color))),
                Span::raw(format!("{name:<name_width$} ")),
                Span::styled(
                    format!("{:>5.1}% ", s.share * 100.0),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:>8} ", format_value(s.value)), Style::default().fg(Color::Gray)),
                Span::styled("█".repeat(fill), Style::default().fg(color(s.color))),
            ])
        })
        .collect();

    Paragraph::new(lines).block(block).render(area, buf);
}
