use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Corpus sizes produced by the benchmark harness and how to show them.
const KNOWN_SIZES: &[(u64, &str)] = &[
    (10_240, "10K"),
    (102_580, "100K"),
    (512_000, "500K"),
    (1_048_576, "1M"),
    (5_242_880, "5M"),
    (10_485_760, "10M"),
];

/// Exact byte size to tick label mapping, with a kilobyte fallback for
/// sizes not in the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLabelMap {
    labels: BTreeMap<u64, String>,
}

impl Default for SizeLabelMap {
    fn default() -> Self {
        Self {
            labels: KNOWN_SIZES
                .iter()
                .map(|&(size, label)| (size, label.to_string()))
                .collect(),
        }
    }
}

impl SizeLabelMap {
    /// A map with no known sizes; every label comes from the fallback.
    pub fn empty() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    /// Add or replace the label for an exact size.
    pub fn insert(&mut self, size: u64, label: impl Into<String>) {
        self.labels.insert(size, label.into());
    }

    /// Label for `size`: the mapped label if there is one, otherwise
    /// `round(size / 1000)` followed by `K`.
    pub fn label(&self, size: u64) -> String {
        match self.labels.get(&size) {
            Some(label) => label.clone(),
            None => fallback_label(size),
        }
    }

    /// Tick positions and their labels for a set of sizes.
    ///
    /// Sizes are sorted ascending and deduplicated first, so position `i`
    /// and label `i` always describe the same tick.
    pub fn ticks(&self, sizes: &[u64]) -> Vec<SizeTick> {
        let mut sorted = sizes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        sorted
            .into_iter()
            .map(|size| SizeTick {
                size,
                label: self.label(size),
            })
            .collect()
    }
}

/// Kilobytes, rounded half up, with a `K` suffix.
pub fn fallback_label(size: u64) -> String {
    format!("{}K", size / 1000 + u64::from(size % 1000 >= 500))
}

/// A labeled x-axis tick at a true byte position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTick {
    pub size: u64,
    pub label: String,
}

/// A `BYTES=LABEL` override, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLabelOverride {
    pub size: u64,
    pub label: String,
}

impl FromStr for SizeLabelOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, label) = s
            .split_once('=')
            .ok_or_else(|| format!("expected BYTES=LABEL, got '{}'", s))?;
        let size = size
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("invalid byte size '{}'", size.trim()))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(format!("empty label for size {}", size));
        }
        Ok(Self {
            size,
            label: label.to_string(),
        })
    }
}

impl fmt::Display for SizeLabelOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.size, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_size_uses_map() {
        let map = SizeLabelMap::default();
        assert_eq!(map.label(102_580), "100K");
        assert_eq!(map.label(1_048_576), "1M");
    }

    #[test]
    fn test_unknown_size_falls_back_to_kilobytes() {
        let map = SizeLabelMap::default();
        assert_eq!(map.label(250_000), "250K");
        assert_eq!(map.label(102_581), "103K");
        assert_eq!(map.label(0), "0K");
        assert_eq!(map.label(499), "0K");
        assert_eq!(map.label(500), "1K");
        assert_eq!(map.label(1_499), "1K");
        assert_eq!(map.label(1_500), "2K");
    }

    #[test]
    fn test_empty_map_only_falls_back() {
        let map = SizeLabelMap::empty();
        assert_eq!(map.label(102_580), "103K");
    }

    #[test]
    fn test_insert_overrides_builtin() {
        let mut map = SizeLabelMap::default();
        map.insert(102_580, "quijote");
        map.insert(7, "tiny");
        assert_eq!(map.label(102_580), "quijote");
        assert_eq!(map.label(7), "tiny");
    }

    #[test]
    fn test_ticks_sorted_and_aligned() {
        let map = SizeLabelMap::default();
        let ticks = map.ticks(&[1_048_576, 102_580, 250_000, 102_580]);
        assert_eq!(
            ticks,
            vec![
                SizeTick { size: 102_580, label: "100K".to_string() },
                SizeTick { size: 250_000, label: "250K".to_string() },
                SizeTick { size: 1_048_576, label: "1M".to_string() },
            ]
        );
    }

    #[test]
    fn test_parse_override() {
        let o: SizeLabelOverride = "2048=2K".parse().unwrap();
        assert_eq!(o, SizeLabelOverride { size: 2048, label: "2K".to_string() });
        assert_eq!(o.to_string(), "2048=2K");

        let spaced: SizeLabelOverride = " 4096 = 4 KiB ".parse().unwrap();
        assert_eq!(spaced.size, 4096);
        assert_eq!(spaced.label, "4 KiB");

        assert!("2048".parse::<SizeLabelOverride>().is_err());
        assert!("abc=2K".parse::<SizeLabelOverride>().is_err());
        assert!("2048=".parse::<SizeLabelOverride>().is_err());
    }

    proptest! {
        #[test]
        fn prop_fallback_is_rounded_kilobytes(size in 0u64..1_000_000_000_000) {
            let map = SizeLabelMap::empty();
            let expected = format!("{}K", (size as f64 / 1000.0).round() as u64);
            prop_assert_eq!(map.label(size), expected);
        }

        #[test]
        fn prop_ticks_ascending(sizes in proptest::collection::vec(0u64..20_000_000, 0..40)) {
            let ticks = SizeLabelMap::default().ticks(&sizes);
            prop_assert!(ticks.windows(2).all(|w| w[0].size < w[1].size));
            for tick in &ticks {
                prop_assert!(sizes.contains(&tick.size));
            }
        }
    }
}
