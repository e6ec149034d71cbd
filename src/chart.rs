use crate::labels::{SizeLabelMap, SizeTick};
use crate::naming;
use crate::series::{algorithms, group_by_pattern, Series};
use crate::table::ResultTable;
use anyhow::{Context, Result};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::prelude::*;
use rayon::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

// Font sizes
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;

const LINE_WIDTH: u32 = 2;
const POINT_SIZE: u32 = 4;

/// Decimal places on the time axis.
const TIME_DECIMALS: usize = 3;

const X_DESC: &str = "Tamaño del archivo (bytes)";
const Y_DESC: &str = "Tiempo (segundos)";

/// Color palette for the harness algorithms
const COLORS: &[RGBColor] = &[
    RGBColor(66, 133, 244), // Blue (Boyer-Moore)
    RGBColor(234, 67, 53),  // Red (KMP)
    RGBColor(52, 168, 83),  // Green (Shift-And)
];

fn algorithm_color(algorithm: &str, slot: usize) -> RGBColor {
    match algorithm {
        "Boyer-Moore" => COLORS[0],
        "KMP" => COLORS[1],
        "Shift-And" => COLORS[2],
        _ => {
            let rgb = Palette99::pick(slot).to_backend_color().rgb;
            RGBColor(rgb.0, rgb.1, rgb.2)
        }
    }
}

/// Image settings shared by every chart in a run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Render charts on the rayon pool instead of one after another.
    pub parallel: bool,
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            parallel: false,
            verbose: false,
        }
    }
}

/// A series together with its table-wide algorithm slot, which keeps an
/// algorithm's color the same on every chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub slot: usize,
    pub series: Series,
}

/// Everything needed to draw one pattern's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartJob {
    pub pattern: String,
    pub title: String,
    pub path: PathBuf,
    pub series: Vec<ChartSeries>,
    /// Ascending sizes of every plotted point, with their labels.
    pub ticks: Vec<SizeTick>,
    /// Largest plotted time, `None` if nothing is plotted.
    pub max_time: Option<f64>,
}

impl ChartJob {
    /// Horizontal extent: the tick sizes plus a small margin on each side.
    pub fn x_range(&self) -> Range<f64> {
        let (Some(first), Some(last)) = (self.ticks.first(), self.ticks.last()) else {
            return 0.0..1.0;
        };
        let (min, max) = (first.size as f64, last.size as f64);
        let pad = if max > min {
            (max - min) * 0.05
        } else {
            (min * 0.05).max(1.0)
        };
        (min - pad)..(max + pad)
    }

    /// Vertical extent, always starting at zero.
    pub fn y_range(&self) -> Range<f64> {
        match self.max_time {
            Some(max) if max > 0.0 => 0.0..max * 1.1,
            _ => 0.0..1.0,
        }
    }

    /// Tick label for an x position, empty between ticks.
    fn tick_label(&self, x: f64) -> String {
        self.ticks
            .iter()
            .find(|t| (t.size as f64 - x).abs() < 0.5)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    }
}

/// Byte-size x axis. Mesh lines and labels sit exactly on the plotted
/// sizes instead of on evenly spaced round numbers.
struct SizeAxis {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl SizeAxis {
    fn new(job: &ChartJob) -> Self {
        Self {
            range: job.x_range(),
            ticks: job.ticks.iter().map(|t| t.size as f64).collect(),
        }
    }
}

impl Ranged for SizeAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        let ratio = (value - self.range.start) / span;
        limit.0 + (f64::from(limit.1 - limit.0) * ratio + 1e-3).floor() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // Only bold lines; no light mesh between sizes.
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

impl ValueFormatter<f64> for SizeAxis {
    fn format(value: &f64) -> String {
        format!("{:.0}", value)
    }
}

pub fn chart_title(pattern: &str) -> String {
    format!("Tiempo de búsqueda - Patrón: \"{}\"", pattern)
}

/// Build one [`ChartJob`] per distinct pattern, in table order.
pub fn plan_charts(table: &ResultTable, labels: &SizeLabelMap, output_dir: &Path) -> Vec<ChartJob> {
    let slots = algorithms(table);

    group_by_pattern(table)
        .into_iter()
        .map(|group| {
            let ticks = labels.ticks(&group.sizes());
            let max_time = group.max_time();
            let series = group
                .series
                .into_iter()
                .map(|series| ChartSeries {
                    slot: slots
                        .iter()
                        .position(|a| *a == series.algorithm)
                        .unwrap_or(0),
                    series,
                })
                .collect();

            ChartJob {
                title: chart_title(&group.pattern),
                path: naming::chart_path(output_dir, &group.pattern),
                pattern: group.pattern,
                series,
                ticks,
                max_time,
            }
        })
        .collect()
}

/// Draw a single chart and write it to `job.path`.
///
/// Each call owns its drawing area, which is flushed and dropped before
/// returning, so charts never share drawing state.
pub fn render_chart(job: &ChartJob, options: &RenderOptions) -> Result<()> {
    let root = BitMapBackend::new(&job.path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&job.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(SizeAxis::new(job), job.y_range())?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| job.tick_label(*x))
        .y_label_formatter(&|y| format!("{:.*}", TIME_DECIMALS, y))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for ChartSeries { slot, series } in &job.series {
        let color = algorithm_color(&series.algorithm, *slot);
        let data: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.size_bytes as f64, p.time_seconds))
            .collect();

        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(LINE_WIDTH)))?
            .label(series.algorithm.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });

        chart.draw_series(PointSeries::of_element(
            data,
            POINT_SIZE,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    if !job.series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;
    }

    root.present()
        .with_context(|| format!("Failed to write {}", job.path.display()))?;
    if options.verbose {
        println!("Generated: {}", job.path.display());
    }
    Ok(())
}

/// Jobs grouped by output path, in first-seen order. Jobs sharing a path
/// stay in plan order within their bucket so the later one wins.
fn path_buckets(jobs: &[ChartJob]) -> Vec<Vec<&ChartJob>> {
    let mut buckets: Vec<Vec<&ChartJob>> = Vec::new();
    for job in jobs {
        match buckets.iter_mut().find(|b| b[0].path == job.path) {
            Some(bucket) => bucket.push(job),
            None => buckets.push(vec![job]),
        }
    }
    buckets
}

/// Render every planned chart into `output_dir`, creating it if needed.
pub fn generate_charts(jobs: &[ChartJob], output_dir: &Path, options: &RenderOptions) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    if options.parallel {
        path_buckets(jobs).par_iter().try_for_each(|bucket| {
            bucket
                .iter()
                .try_for_each(|job| render_chart(job, options))
        })
    } else {
        jobs.iter().try_for_each(|job| render_chart(job, options))
    }
}

/// Load `input`, then plan and render one chart per pattern into
/// `output_dir`.
///
/// A missing file or missing columns fail before the output directory is
/// touched, so no chart is written from a bad table.
pub fn plot_results_file(
    input: &Path,
    output_dir: &Path,
    labels: &SizeLabelMap,
    options: &RenderOptions,
) -> Result<Vec<ChartJob>> {
    let table = ResultTable::load(input)?;

    if options.verbose {
        println!("Loaded {} rows from {}", table.len(), input.display());
        for (row, record) in table.unplottable() {
            eprintln!(
                "  Skipping row {} ({} / \"{}\"): unparsable size or time",
                row + 1,
                record.algorithm,
                record.pattern
            );
        }
    }

    let jobs = plan_charts(&table, labels, output_dir);
    generate_charts(&jobs, output_dir, options)?;
    Ok(jobs)
}
