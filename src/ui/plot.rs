use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::export::{KEYWORDS_TITLE, MOST_CITED_TITLE, PUBLICATIONS_TITLE};
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 320.0;

fn chart_title(ui: &mut Ui, state: &AppState, title: &str) {
    let style = &state.config().style;
    ui.label(
        RichText::new(title)
            .size(style.font_size * 1.5)
            .color(style.font_color32()),
    );
}

/// Tick label for categorical axes: only integral positions carry a label.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Publications per year (line chart)
// ---------------------------------------------------------------------------

pub fn publications_per_year(ui: &mut Ui, state: &AppState) {
    chart_title(ui, state, PUBLICATIONS_TITLE);
    let style = &state.config().style;
    let color = style.line_color32();

    let series: Vec<[f64; 2]> = state
        .views
        .per_year
        .iter()
        .map(|c| [f64::from(c.year), c.count as f64])
        .collect();

    Plot::new("publications_per_year")
        .height(PLOT_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Publications")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .label_formatter(|_name, value| format!("{:.0}: {:.0}", value.x, value.y))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(series.clone()))
                .color(color)
                .width(style.line_width);
            plot_ui.line(line);
            plot_ui.points(Points::new(PlotPoints::from(series)).color(color).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Most cited papers (bar chart)
// ---------------------------------------------------------------------------

pub fn most_cited(ui: &mut Ui, state: &AppState) {
    chart_title(ui, state, MOST_CITED_TITLE);
    let papers = state.views.top_papers(state.top_papers);
    let fill = state.config().style.bar_color32();

    let labels: Vec<String> = papers.iter().map(|p| p.label.clone()).collect();
    let titles: Vec<String> = papers.iter().map(|p| p.title.clone()).collect();

    let bars: Vec<Bar> = papers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(i as f64, p.cited_by as f64)
                .name(&p.label)
                .fill(fill)
                .width(0.8)
        })
        .collect();

    let chart = BarChart::new(bars)
        .color(fill)
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            let title = titles
                .get(bar.argument as usize)
                .map(String::as_str)
                .unwrap_or("");
            format!("{}\n{:.0} citations\n{title}", bar.name, bar.value)
        }));

    Plot::new("most_cited")
        .height(PLOT_HEIGHT)
        .x_axis_label("Publication")
        .y_axis_label("Cited by")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Most popular keywords (bar chart)
// ---------------------------------------------------------------------------

pub fn top_keywords(ui: &mut Ui, state: &AppState) {
    chart_title(ui, state, KEYWORDS_TITLE);
    let keywords = state.views.top_keywords(state.top_keywords);
    let colors = generate_palette(keywords.len());
    let labels: Vec<String> = keywords.iter().map(|k| k.keyword.clone()).collect();

    let bars: Vec<Bar> = keywords
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (k, color))| {
            Bar::new(i as f64, k.count as f64)
                .name(&k.keyword)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let chart = BarChart::new(bars).element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
        format!("{}: {:.0}", bar.name, bar.value)
    }));

    Plot::new("top_keywords")
        .height(PLOT_HEIGHT)
        .x_axis_label("Index Keyword")
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}
