//! SVG export of the three dashboard charts.
//!
//! Files are named `<prefix><from>-<to>.svg` and written into an existing
//! directory; a missing directory is reported, never created.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::{generate_palette, to_rgb};
use crate::config::StyleConfig;
use crate::data::aggregate::Views;
use crate::data::model::{CitationRank, KeywordFrequency, YearCount, YearRange};
use crate::error::DashboardError;

pub const PUBLICATIONS_PREFIX: &str = "publications_";
pub const MOST_CITED_PREFIX: &str = "mostcited_";
pub const KEYWORDS_PREFIX: &str = "topkeywords_";

pub const PUBLICATIONS_TITLE: &str = "Publications Per Year";
pub const MOST_CITED_TITLE: &str = "Most Cited Papers";
pub const KEYWORDS_TITLE: &str = "Most Popular Keywords";

const SIZE: (u32, u32) = (900, 560);

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// Write the three charts for `views` into `dir`, returning the written paths.
///
/// `top_papers` / `top_keywords` limit the bar charts the same way the
/// on-screen sliders do.
pub fn export_charts(
    dir: &Path,
    views: &Views,
    range: YearRange,
    top_papers: usize,
    top_keywords: usize,
    style: &StyleConfig,
) -> Result<Vec<PathBuf>, DashboardError> {
    if !dir.is_dir() {
        return Err(DashboardError::ExportDirMissing(dir.to_path_buf()));
    }

    let charts = [
        (PUBLICATIONS_PREFIX, publications_svg(&views.per_year, style)?),
        (
            MOST_CITED_PREFIX,
            most_cited_svg(views.top_papers(top_papers), style)?,
        ),
        (
            KEYWORDS_PREFIX,
            keywords_svg(views.top_keywords(top_keywords), style)?,
        ),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (prefix, svg) in charts {
        let path = dir.join(format!("{prefix}{range}.svg"));
        fs::write(&path, svg)?;
        log::info!("Exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Draw onto an in-memory SVG document and return its text.
fn render_svg<F>(draw: F) -> Result<String, DashboardError>
where
    F: FnOnce(&Root<'_>) -> DrawResult,
{
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(buf)
}

fn font<'a>(style: &'a StyleConfig, scale: f32) -> FontDesc<'a> {
    (style.font_family.as_str(), f64::from(style.font_size * scale)).into_font()
}

/// Y-axis upper bound with a little headroom above the tallest value.
fn y_top(max: usize) -> usize {
    max + max / 10 + 1
}

// ---------------------------------------------------------------------------
// Chart renderers
// ---------------------------------------------------------------------------

pub fn publications_svg(per_year: &[YearCount], style: &StyleConfig) -> Result<String, DashboardError> {
    let text = to_rgb(style.font_color32());
    let line = to_rgb(style.line_color32());
    let first = per_year.first().map(|c| c.year).unwrap_or(0);
    let last = per_year.last().map(|c| c.year).unwrap_or(first).max(first + 1);
    let max = per_year.iter().map(|c| c.count).max().unwrap_or(0);

    render_svg(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(PUBLICATIONS_TITLE, font(style, 1.5).color(&text))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(first..last, 0usize..y_top(max))?;
        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Publications")
            .x_labels(per_year.len().clamp(2, 30))
            .label_style(font(style, 1.0).color(&text))
            .axis_desc_style(font(style, 1.0).color(&text))
            .disable_x_mesh()
            .draw()?;

        let width = style.line_width.round().max(1.0) as u32;
        chart.draw_series(LineSeries::new(
            per_year.iter().map(|c| (c.year, c.count)),
            line.stroke_width(width),
        ))?;
        chart.draw_series(
            per_year
                .iter()
                .map(|c| Circle::new((c.year, c.count), 3, line.filled())),
        )?;
        Ok(())
    })
}

pub fn most_cited_svg(papers: &[CitationRank], style: &StyleConfig) -> Result<String, DashboardError> {
    let fill = to_rgb(style.bar_color32());
    let bars: Vec<(String, usize, RGBColor)> = papers
        .iter()
        .map(|p| (p.label.clone(), p.cited_by as usize, fill))
        .collect();
    bar_chart_svg(MOST_CITED_TITLE, "Publication", "Cited by", &bars, style)
}

pub fn keywords_svg(keywords: &[KeywordFrequency], style: &StyleConfig) -> Result<String, DashboardError> {
    let bars: Vec<(String, usize, RGBColor)> = keywords
        .iter()
        .zip(generate_palette(keywords.len()))
        .map(|(k, color)| (k.keyword.clone(), k.count, to_rgb(color)))
        .collect();
    bar_chart_svg(KEYWORDS_TITLE, "Index Keyword", "Count", &bars, style)
}

/// Vertical bar chart over categorical labels, one segment per bar.
fn bar_chart_svg(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, usize, RGBColor)],
    style: &StyleConfig,
) -> Result<String, DashboardError> {
    let text = to_rgb(style.font_color32());
    let n = bars.len().max(1) as u32;
    let max = bars.iter().map(|(_, v, _)| *v).max().unwrap_or(0);

    let label_of = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => bars
            .get(*i as usize)
            .map(|(label, _, _)| label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    render_svg(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, font(style, 1.5).color(&text))
            .margin(20)
            .x_label_area_size(160)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..n).into_segmented(), 0usize..y_top(max))?;
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(bars.len() * 2 + 2)
            .x_label_formatter(&label_of)
            .x_label_style(
                font(style, 1.0)
                    .transform(FontTransform::Rotate90)
                    .color(&text),
            )
            .label_style(font(style, 1.0).color(&text))
            .axis_desc_style(font(style, 1.0).color(&text))
            .disable_x_mesh()
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, (_, value, color))| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), *value),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        }))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PublicationTable, publication};
    use tempfile::TempDir;

    fn views() -> Views {
        Views::compute(&PublicationTable::sorted_by_citations(vec![
            publication("Hart, G", 1992, 100, "X", "load;monitoring"),
            publication("Doe, J", 1994, 5, "Y", "load"),
            publication("Kim, H", 1994, 1, "Z", "disaggregation"),
        ]))
    }

    #[test]
    fn test_export_writes_three_named_files() {
        let dir = TempDir::new().unwrap();
        let written = export_charts(
            dir.path(),
            &views(),
            YearRange::new(1990, 2000),
            10,
            10,
            &StyleConfig::default(),
        )
        .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "publications_1990-2000.svg",
                "mostcited_1990-2000.svg",
                "topkeywords_1990-2000.svg",
            ]
        );
        for path in &written {
            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("<svg"));
            assert!(content.contains("</svg>"));
        }
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("figures");
        let err = export_charts(
            &missing,
            &views(),
            YearRange::new(1990, 2000),
            10,
            10,
            &StyleConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::ExportDirMissing(p) if p == missing));
        assert!(!missing.exists());
    }

    #[test]
    fn test_most_cited_respects_top_n() {
        let v = views();
        let svg = most_cited_svg(v.top_papers(2), &StyleConfig::default()).unwrap();
        assert!(svg.contains(MOST_CITED_TITLE));
        assert!(svg.contains("Hart, 1992"));
        assert!(svg.contains("Doe, 1994"));
        assert!(!svg.contains("Kim, 1994"));
    }

    #[test]
    fn test_publications_chart_has_one_point_per_year() {
        let v = views();
        let svg = publications_svg(&v.per_year, &StyleConfig::default()).unwrap();
        assert!(svg.contains(PUBLICATIONS_TITLE));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_single_year_and_empty_charts_render() {
        let single = [YearCount { year: 2001, count: 4 }];
        assert!(publications_svg(&single, &StyleConfig::default()).is_ok());

        let svg = keywords_svg(&[], &StyleConfig::default()).unwrap();
        assert!(svg.contains(KEYWORDS_TITLE));
        assert!(publications_svg(&[], &StyleConfig::default()).is_ok());
    }

    #[test]
    fn test_y_top_leaves_headroom() {
        assert_eq!(y_top(0), 1);
        assert_eq!(y_top(5), 6);
        assert_eq!(y_top(100), 111);
    }
}
