//! Report configuration: where to look for the dataset and how to bin it.

use std::path::PathBuf;

use crate::error::ConfigError;

const PRICE_EDGES: &[u64] = &[0, 3_000_000, 6_000_000, 9_000_000, 12_000_000, 15_000_000];
const PRICE_LABELS: &[&str] = &["<3M", "3M-6M", "6M-9M", "9M-12M", "12M+"];

const AREA_EDGES: &[u64] = &[0, 3_000, 6_000, 9_000, 12_000, 15_000, 18_000];
const AREA_LABELS: &[&str] = &["<3K", "3K-6K", "6K-9K", "9K-12K", "12K-15K", "15K+"];

/// Ordered bin edges with one label per interval.
///
/// A value `v` belongs to bin `i` when `edges[i] < v <= edges[i + 1]`. The
/// first bin is closed on the left as well, so `edges[0]` itself lands in it.
#[derive(Debug, Clone, PartialEq)]
pub struct BinConfig {
    edges: Vec<u64>,
    labels: Vec<String>,
}

impl BinConfig {
    pub fn new(edges: Vec<u64>, labels: Vec<String>) -> Result<Self, ConfigError> {
        if edges.len() < 2 {
            return Err(ConfigError::TooFewEdges(edges.len()));
        }
        if let Some(w) = edges.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ConfigError::NotAscending {
                prev: w[0],
                next: w[1],
            });
        }
        if labels.len() != edges.len() - 1 {
            return Err(ConfigError::LabelCount {
                expected: edges.len() - 1,
                edges: edges.len(),
                got: labels.len(),
            });
        }
        Ok(BinConfig { edges, labels })
    }

    fn from_static(edges: &[u64], labels: &[&str]) -> Result<Self, ConfigError> {
        Self::new(edges.to_vec(), labels.iter().map(|l| l.to_string()).collect())
    }

    pub fn price() -> Result<Self, ConfigError> {
        Self::from_static(PRICE_EDGES, PRICE_LABELS)
    }

    pub fn area() -> Result<Self, ConfigError> {
        Self::from_static(AREA_EDGES, AREA_LABELS)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn bin_count(&self) -> usize {
        self.labels.len()
    }

    /// Index of the bin holding `value`, or `None` outside every bin.
    pub fn bin_index(&self, value: u64) -> Option<usize> {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if value < first || value > last {
            return None;
        }
        if value == first {
            return Some(0);
        }
        // first edge >= value; the bin ends at that edge
        let upper = self.edges.partition_point(|&e| e < value);
        Some(upper - 1)
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub candidate_paths: Vec<PathBuf>,
    pub price_bins: BinConfig,
    pub area_bins: BinConfig,
    pub top_n: usize,
}

impl ReportConfig {
    /// The built-in report setup; fails if a built-in bin table is invalid.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(ReportConfig {
            candidate_paths: vec![
                PathBuf::from("data").join("Housing.csv"),
                PathBuf::from("..").join("data").join("Housing.csv"),
                PathBuf::from("Housing.csv"),
            ],
            price_bins: BinConfig::price()?,
            area_bins: BinConfig::area()?,
            top_n: 5,
        })
    }
}
