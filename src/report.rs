use crate::chart::ChartJob;
use crate::series::Point;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
pub struct ManifestSeries<'a> {
    pub algorithm: &'a str,
    pub points: &'a [Point],
}

#[derive(Debug, Serialize)]
pub struct ManifestEntry<'a> {
    pub pattern: &'a str,
    pub file: String,
    pub sizes: Vec<ManifestTick<'a>>,
    pub series: Vec<ManifestSeries<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ManifestTick<'a> {
    pub size_bytes: u64,
    pub label: &'a str,
}

/// Describe a chart plan for machine consumption.
pub fn manifest(jobs: &[ChartJob]) -> Vec<ManifestEntry<'_>> {
    jobs.iter()
        .map(|job| ManifestEntry {
            pattern: &job.pattern,
            file: job
                .path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sizes: job
                .ticks
                .iter()
                .map(|t| ManifestTick {
                    size_bytes: t.size,
                    label: &t.label,
                })
                .collect(),
            series: job
                .series
                .iter()
                .map(|s| ManifestSeries {
                    algorithm: &s.series.algorithm,
                    points: &s.series.points,
                })
                .collect(),
        })
        .collect()
}

/// Write `manifest.json` next to the charts.
pub fn write_manifest(jobs: &[ChartJob], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest(jobs))?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Print a per-pattern overview of what was plotted.
pub fn print_summary(jobs: &[ChartJob]) {
    println!("\n{:=<80}", "");
    println!("Charts");
    println!("{:=<80}\n", "");

    for job in jobs {
        println!("Pattern: \"{}\"", job.pattern);
        println!("  File: {}", job.path.display());

        if job.series.is_empty() {
            println!("  (no plottable rows)\n");
            continue;
        }

        println!("\n  {:<24} {:>8} {:>12} {:>12}", "Algorithm", "Points", "Min (s)", "Max (s)");
        println!("  {:-<60}", "");

        for s in &job.series {
            let times = s.series.points.iter().map(|p| p.time_seconds);
            let min = times.clone().fold(f64::INFINITY, f64::min);
            let max = times.fold(0.0_f64, f64::max);
            println!(
                "  {:<24} {:>8} {:>12.3} {:>12.3}",
                s.series.algorithm,
                s.series.points.len(),
                min,
                max
            );
        }
        println!();
    }
}
