use crate::table::{BenchmarkRecord, ResultTable};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One plotted point: corpus size against elapsed search time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub size_bytes: u64,
    pub time_seconds: f64,
}

/// One algorithm's timing curve for a single pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub algorithm: String,
    /// Ascending by size. Rows sharing a size keep their table order.
    pub points: Vec<Point>,
}

/// Every series belonging to one pattern, i.e. the content of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGroup {
    pub pattern: String,
    pub series: Vec<Series>,
}

impl PatternGroup {
    /// Distinct sizes across all series, ascending.
    pub fn sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.size_bytes))
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Largest plotted time, or `None` if the chart has no points.
    pub fn max_time(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.time_seconds))
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))))
    }
}

/// Distinct non-empty values of `key` in first-seen order.
fn first_seen<'a>(
    records: &'a [BenchmarkRecord],
    key: impl Fn(&'a BenchmarkRecord) -> &'a str,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(key)
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .collect()
}

/// Distinct patterns in the order they first appear in the table. An empty
/// pattern cell names no pattern.
pub fn patterns(table: &ResultTable) -> Vec<&str> {
    first_seen(table.records(), |r| r.pattern.as_str())
}

/// Distinct algorithms in the order they first appear in the table.
pub fn algorithms(table: &ResultTable) -> Vec<&str> {
    first_seen(table.records(), |r| r.algorithm.as_str())
}

fn slots<'a>(values: &[&'a str]) -> HashMap<&'a str, usize> {
    values.iter().enumerate().map(|(i, v)| (*v, i)).collect()
}

/// Build the series for one pattern. See [`group_by_pattern`].
pub fn series_for_pattern(table: &ResultTable, pattern: &str) -> Vec<Series> {
    group_by_pattern(table)
        .into_iter()
        .find(|g| g.pattern == pattern)
        .map(|g| g.series)
        .unwrap_or_default()
}

/// Group the whole table into one [`PatternGroup`] per distinct pattern,
/// in a single pass over the rows.
///
/// Within a group, algorithms follow table first-seen order and an
/// algorithm with no plottable row yields no series at all. Every
/// plottable row becomes a point; duplicate sizes are not merged. A
/// pattern whose rows are all unplottable still gets a group, with no
/// series, so that every pattern still gets a chart.
pub fn group_by_pattern(table: &ResultTable) -> Vec<PatternGroup> {
    let patterns = patterns(table);
    let algorithms = algorithms(table);

    let pattern_slot = slots(&patterns);
    let algorithm_slot = slots(&algorithms);

    // buckets[pattern][algorithm], filled in row order
    let mut buckets: Vec<Vec<Vec<Point>>> =
        vec![vec![Vec::new(); algorithms.len()]; patterns.len()];
    for record in table.records() {
        let (Some(&p), Some(&a)) = (
            pattern_slot.get(record.pattern.as_str()),
            algorithm_slot.get(record.algorithm.as_str()),
        ) else {
            continue;
        };
        if let Some((size_bytes, time_seconds)) = record.point() {
            buckets[p][a].push(Point {
                size_bytes,
                time_seconds,
            });
        }
    }

    patterns
        .into_iter()
        .zip(buckets)
        .map(|(pattern, per_algorithm)| PatternGroup {
            pattern: pattern.to_string(),
            series: algorithms
                .iter()
                .zip(per_algorithm)
                .filter(|(_, points)| !points.is_empty())
                .map(|(algorithm, mut points)| {
                    // Stable: equal sizes stay in row order.
                    points.sort_by_key(|p| p.size_bytes);
                    Series {
                        algorithm: algorithm.to_string(),
                        points,
                    }
                })
                .collect(),
        })
        .collect()
}
