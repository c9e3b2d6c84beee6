use std::collections::BTreeMap;

use crate::csv_reader::Record;
use crate::dataset::{NumericAttribute, RangeColumn};
use crate::error::ReportError;

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct Share<K> {
    pub value: K,
    pub count: usize,
    /// Full precision; rounded to one decimal only when printed.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionOrder {
    /// Ascending by value.
    ByValue,
    /// Descending by count, ties ascending by value.
    ByCountDesc,
}

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Groups `values` by exact value and counts each group.
pub fn distribution<K, I>(values: I, order: DistributionOrder) -> Vec<Share<K>>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::<K, usize>::new();
    let mut total = 0;
    for value in values {
        *counts.entry(value).or_default() += 1;
        total += 1;
    }

    let mut shares = counts
        .into_iter()
        .map(|(value, count)| Share {
            value,
            count,
            percentage: percentage(count, total),
        })
        .collect::<Vec<_>>();
    if order == DistributionOrder::ByCountDesc {
        shares.sort_by(|a, b| b.count.cmp(&a.count));
    }
    shares
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinnedDistribution {
    /// One entry per bin, in label order, empty bins included.
    pub bins: Vec<Share<String>>,
    pub out_of_range: usize,
    pub total: usize,
}

impl BinnedDistribution {
    pub fn out_of_range_percentage(&self) -> f64 {
        percentage(self.out_of_range, self.total)
    }
}

pub fn bin_counts(column: &RangeColumn) -> BinnedDistribution {
    let total = column.assignments.len();
    let mut counts = vec![0usize; column.bins.bin_count()];
    let mut out_of_range = 0;
    for assignment in &column.assignments {
        match assignment {
            Some(i) => counts[*i] += 1,
            None => out_of_range += 1,
        }
    }

    let bins = column
        .bins
        .labels()
        .iter()
        .zip(counts)
        .map(|(label, count)| Share {
            value: label.clone(),
            count,
            percentage: percentage(count, total),
        })
        .collect();
    BinnedDistribution {
        bins,
        out_of_range,
        total,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

impl Summary {
    pub fn of(column: &'static str, values: &[u64]) -> Result<Summary, ReportError> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let (min, max) = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(ReportError::EmptyColumn(column)),
        };

        let sum: u128 = sorted.iter().map(|&v| u128::from(v)).sum();
        let mean = sum as f64 / sorted.len() as f64;
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        Ok(Summary {
            min,
            max,
            mean,
            median,
        })
    }
}

/// The attributes shown for a ranked house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseSummary {
    pub price: u64,
    pub area: u64,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

impl From<&Record> for HouseSummary {
    fn from(record: &Record) -> Self {
        HouseSummary {
            price: record.price,
            area: record.area,
            bedrooms: record.bedrooms,
            bathrooms: record.bathrooms,
        }
    }
}

/// The `n` records with the largest `attribute`, earlier records first on ties.
pub fn top_n(records: &[Record], attribute: NumericAttribute, n: usize) -> Vec<HouseSummary> {
    let mut ranked = records.iter().collect::<Vec<_>>();
    // sort_by is stable
    ranked.sort_by(|a, b| attribute.value(b).cmp(&attribute.value(a)));
    ranked.into_iter().take(n).map(HouseSummary::from).collect()
}
