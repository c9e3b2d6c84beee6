//! Text rendering of every report section, and the fixed order they run in.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::aggregate::{bin_counts, distribution, top_n, BinnedDistribution, DistributionOrder, Share, Summary};
use crate::config::{BinConfig, ReportConfig};
use crate::dataset::{column_type, field_text, CategoricalAttribute, Dataset, NumericAttribute};
use crate::error::ReportError;

const RULE_WIDTH: usize = 50;
const PREVIEW_ROWS: usize = 5;

type Section<W> = fn(&mut Dataset, &ReportConfig, &mut W) -> Result<(), ReportError>;

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn rounded(value: f64) -> String {
    group_thousands(value.round() as u64)
}

fn header<W: Write>(out: &mut W, title: &str, underline: usize) -> io::Result<()> {
    writeln!(out, "\n{}", title)?;
    writeln!(out, "{}", "-".repeat(underline))
}

fn share_line<W: Write, K>(out: &mut W, label: &str, share: &Share<K>) -> io::Result<()> {
    writeln!(
        out,
        "   {}: {:3} houses ({:5.1}%)",
        label, share.count, share.percentage
    )
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Starting housing analysis...")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Diagnostic printed when no candidate location holds the dataset.
pub fn write_not_found<W: Write>(out: &mut W, attempted: &[PathBuf], cwd: &Path) -> io::Result<()> {
    writeln!(out, "ERROR: Could not find Housing.csv file!")?;
    writeln!(out, "Please make sure the file exists in one of these locations:")?;
    for path in attempted {
        writeln!(out, "  - {}", path.display())?;
    }
    writeln!(out, "\nCurrent working directory: {}", cwd.display())
}

/// Runs every section in order.
///
/// A section that fails is reported inline and the next one still runs; only
/// a failure to write the output itself ends the run early.
pub fn run<W: Write>(dataset: &mut Dataset, config: &ReportConfig, out: &mut W) -> io::Result<()> {
    if dataset.is_empty() {
        warn!("{} has a header but no records", dataset.source().display());
    }
    writeln!(out, "Dataset loaded with {} records", dataset.len())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let sections: [(&str, Section<W>); 5] = [
        ("basic info", basic_info),
        ("distributions", distributions),
        ("price analysis", price_analysis),
        ("area analysis", area_analysis),
        ("categorical analysis", categorical_analysis),
    ];
    let mut failed = 0;
    for (name, section) in sections {
        debug!("running section {}", name);
        match section(dataset, config, out) {
            Ok(()) => {}
            Err(ReportError::Io(e)) => return Err(e),
            Err(e) => {
                error!("section {} failed: {}", name, e);
                writeln!(out, "\nSection {} failed: {}", name, e)?;
                failed += 1;
            }
        }
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    if failed == 0 {
        writeln!(out, "Analysis completed successfully!")
    } else {
        writeln!(out, "Analysis completed with {} failed section(s).", failed)
    }
}

fn basic_info<W: Write>(dataset: &mut Dataset, _: &ReportConfig, out: &mut W) -> Result<(), ReportError> {
    header(out, "BASIC DATASET INFORMATION", 30)?;
    let columns = dataset.columns();
    writeln!(out, "Total number of houses: {}", group_thousands(dataset.len() as u64))?;
    writeln!(out, "Number of features: {}", columns.len())?;
    writeln!(out, "Dataset shape: ({}, {})", dataset.len(), columns.len())?;

    writeln!(out, "\nColumn names:")?;
    for (i, column) in columns.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, column)?;
    }

    writeln!(out, "\nData types:")?;
    let name_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for column in &columns {
        let kind = column_type(column).unwrap_or("unknown");
        writeln!(out, "{:<width$}  {}", column, kind, width = name_width)?;
    }

    writeln!(out, "\nFirst {} rows:", PREVIEW_ROWS)?;
    let rows = dataset
        .records()
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| {
            columns
                .iter()
                .map(|c| field_text(r, c).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let widths = columns
        .iter()
        .enumerate()
        .map(|(i, c)| rows.iter().map(|r| r[i].len()).fold(c.len(), usize::max))
        .collect::<Vec<_>>();

    let index_width = rows.len().saturating_sub(1).to_string().len();
    write!(out, "{:index_width$}", "")?;
    for (column, width) in columns.iter().zip(&widths) {
        write!(out, "  {:>width$}", column, width = *width)?;
    }
    writeln!(out)?;
    for (i, row) in rows.iter().enumerate() {
        write!(out, "{:>index_width$}", i)?;
        for (cell, width) in row.iter().zip(&widths) {
            write!(out, "  {:>width$}", cell, width = *width)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn distributions<W: Write>(dataset: &mut Dataset, _: &ReportConfig, out: &mut W) -> Result<(), ReportError> {
    header(out, "HOUSING CHARACTERISTICS DISTRIBUTION", 40)?;
    let tables = [
        ("1. BEDROOMS DISTRIBUTION:", NumericAttribute::Bedrooms, "bedrooms"),
        ("2. BATHROOMS DISTRIBUTION:", NumericAttribute::Bathrooms, "bathrooms"),
        ("3. STORIES DISTRIBUTION:", NumericAttribute::Stories, "stories"),
        ("4. PARKING SPACES DISTRIBUTION:", NumericAttribute::Parking, "parking spaces"),
    ];
    for (title, attribute, unit) in tables {
        writeln!(out, "\n{}", title)?;
        let shares = distribution(dataset.numeric_column(attribute), DistributionOrder::ByValue);
        for share in &shares {
            share_line(out, &format!("{} {}", share.value, unit), share)?;
        }
    }
    Ok(())
}

fn binned_table<W: Write>(out: &mut W, binned: &BinnedDistribution) -> io::Result<()> {
    for share in &binned.bins {
        share_line(out, &share.value, share)?;
    }
    if binned.out_of_range > 0 {
        writeln!(
            out,
            "   out of range: {:3} houses ({:5.1}%)",
            binned.out_of_range,
            binned.out_of_range_percentage()
        )?;
    }
    Ok(())
}

fn ranged(
    dataset: &mut Dataset,
    column: &str,
    attribute: NumericAttribute,
    bins: &BinConfig,
) -> Result<BinnedDistribution, ReportError> {
    dataset.add_range_column(column, attribute, bins);
    Ok(bin_counts(dataset.range_column(column)?))
}

fn price_analysis<W: Write>(dataset: &mut Dataset, config: &ReportConfig, out: &mut W) -> Result<(), ReportError> {
    header(out, "PRICE ANALYSIS", 20)?;
    let summary = Summary::of("price", &dataset.numeric_column(NumericAttribute::Price))?;
    writeln!(out, "Minimum price: ₹{}", group_thousands(summary.min))?;
    writeln!(out, "Maximum price: ₹{}", group_thousands(summary.max))?;
    writeln!(out, "Average price: ₹{}", rounded(summary.mean))?;
    writeln!(out, "Median price: ₹{}", rounded(summary.median))?;

    writeln!(out, "\nPRICE RANGES DISTRIBUTION:")?;
    let binned = ranged(dataset, "price_range", NumericAttribute::Price, &config.price_bins)?;
    binned_table(out, &binned)?;

    writeln!(out, "\nTOP {} MOST EXPENSIVE HOUSES:", config.top_n)?;
    for house in top_n(dataset.records(), NumericAttribute::Price, config.top_n) {
        writeln!(
            out,
            "   ₹{} - {} sqft, {} bed, {} bath",
            group_thousands(house.price),
            house.area,
            house.bedrooms,
            house.bathrooms
        )?;
    }
    Ok(())
}

fn area_analysis<W: Write>(dataset: &mut Dataset, config: &ReportConfig, out: &mut W) -> Result<(), ReportError> {
    header(out, "AREA ANALYSIS", 15)?;
    let summary = Summary::of("area", &dataset.numeric_column(NumericAttribute::Area))?;
    writeln!(out, "Minimum area: {} sqft", group_thousands(summary.min))?;
    writeln!(out, "Maximum area: {} sqft", group_thousands(summary.max))?;
    writeln!(out, "Average area: {} sqft", rounded(summary.mean))?;
    writeln!(out, "Median area: {} sqft", rounded(summary.median))?;

    writeln!(out, "\nAREA RANGES DISTRIBUTION:")?;
    let binned = ranged(dataset, "area_range", NumericAttribute::Area, &config.area_bins)?;
    binned_table(out, &binned)?;

    writeln!(out, "\nTOP {} LARGEST HOUSES:", config.top_n)?;
    for house in top_n(dataset.records(), NumericAttribute::Area, config.top_n) {
        writeln!(
            out,
            "   {} sqft - ₹{}, {} bed, {} bath",
            group_thousands(house.area),
            group_thousands(house.price),
            house.bedrooms,
            house.bathrooms
        )?;
    }
    Ok(())
}

fn categorical_analysis<W: Write>(dataset: &mut Dataset, _: &ReportConfig, out: &mut W) -> Result<(), ReportError> {
    header(out, "CATEGORICAL FEATURES ANALYSIS", 35)?;
    for attribute in CategoricalAttribute::ALL {
        writeln!(out, "\n{}:", attribute.name().to_uppercase())?;
        let values = dataset.records().iter().map(|r| attribute.value(r));
        for share in distribution(values, DistributionOrder::ByCountDesc) {
            share_line(out, share.value, &share)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::load_first;
    use crate::csv_reader::tests::write_csv;
    use crate::csv_reader::FurnishingStatus;
    use crate::dataset::tests::{dataset, house};
    use tempfile::TempDir;

    const ROWS: &[&str] = &[
        "13300000,7420,4,2,3,yes,no,no,no,yes,2,yes,furnished",
        "12250000,8960,4,4,4,yes,no,no,no,yes,3,no,furnished",
        "12250000,9960,3,2,2,yes,no,yes,no,no,2,yes,semi-furnished",
        "1750000,3850,3,1,2,yes,no,no,no,no,0,no,unfurnished",
        "4410000,3000,2,1,1,no,no,no,no,no,0,no,unfurnished",
        "16500000,20000,5,3,2,yes,yes,yes,no,yes,3,yes,furnished",
    ];

    fn render(ds: &mut Dataset) -> String {
        let mut out = Vec::new();
        run(ds, &ReportConfig::new().unwrap(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(13300000), "13,300,000");
    }

    #[test]
    fn test_sections_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", ROWS);
        let mut ds = load_first(&[path], &mut io::sink()).unwrap();
        let text = render(&mut ds);

        let order = [
            "BASIC DATASET INFORMATION",
            "HOUSING CHARACTERISTICS DISTRIBUTION",
            "PRICE ANALYSIS",
            "AREA ANALYSIS",
            "CATEGORICAL FEATURES ANALYSIS",
            "Analysis completed successfully!",
        ];
        let positions = order
            .iter()
            .map(|h| text.find(h).unwrap_or_else(|| panic!("missing {h}")))
            .collect::<Vec<_>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_report_contents() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", ROWS);
        let mut ds = load_first(&[path], &mut io::sink()).unwrap();
        let text = render(&mut ds);

        assert!(text.contains("Dataset loaded with 6 records"));
        assert!(text.contains("Dataset shape: (6, 13)"));
        assert!(text.contains("   4 bedrooms:   2 houses ( 33.3%)"));
        assert!(text.contains("   0 parking spaces:   2 houses ( 33.3%)"));
        assert!(text.contains("Minimum price: ₹1,750,000"));
        assert!(text.contains("Maximum price: ₹16,500,000"));
        assert!(text.contains("Median price: ₹12,250,000"));
        assert!(text.contains("   12M+:   3 houses ( 50.0%)"));
        assert!(text.contains("   9M-12M:   0 houses (  0.0%)"));
        assert!(text.contains("   ₹16,500,000 - 20000 sqft, 5 bed, 3 bath"));
        // 20000 sqft lies past the last area edge
        assert!(text.contains("   out of range:   1 houses ( 16.7%)"));
        assert!(text.contains("   15K+:   0 houses (  0.0%)"));
        assert!(text.contains("   20,000 sqft - ₹16,500,000, 5 bed, 3 bath"));
        assert!(text.contains("\nFURNISHINGSTATUS:\n   furnished:   3 houses ( 50.0%)"));
        assert!(!text.contains("out of range:   0"));
    }

    #[test]
    fn test_top_expensive_keeps_file_order_on_ties() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", ROWS);
        let mut ds = load_first(&[path], &mut io::sink()).unwrap();
        let text = render(&mut ds);

        let first = text.find("₹12,250,000 - 8960 sqft").unwrap();
        let second = text.find("₹12,250,000 - 9960 sqft").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_loading_twice_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", ROWS);
        let mut first = load_first(&[path.clone()], &mut io::sink()).unwrap();
        let mut second = load_first(&[path], &mut io::sink()).unwrap();
        assert_eq!(render(&mut first), render(&mut second));
    }

    #[test]
    fn test_failing_section_does_not_stop_others() {
        let mut ds = dataset(Vec::new());
        let text = render(&mut ds);

        assert!(text.contains("Section price analysis failed: column `price` has no values"));
        assert!(text.contains("Section area analysis failed: column `area` has no values"));
        assert!(text.contains("CATEGORICAL FEATURES ANALYSIS"));
        assert!(text.contains("Analysis completed with 2 failed section(s)."));
    }

    #[test]
    fn test_categorical_ordered_by_count() {
        let mut records = vec![house(1, 1), house(2, 2), house(3, 3)];
        records[1].furnishingstatus = FurnishingStatus::Unfurnished;
        records[2].furnishingstatus = FurnishingStatus::Unfurnished;
        let mut ds = dataset(records);
        let text = render(&mut ds);

        let unfurnished = text.find("   unfurnished:   2 houses").unwrap();
        let furnished = text.find("   furnished:   1 houses").unwrap();
        assert!(unfurnished < furnished);
    }

    #[test]
    fn test_not_found_diagnostic_lists_attempts() {
        let dir = TempDir::new().unwrap();
        let attempted = vec![dir.path().join("data/Housing.csv"), dir.path().join("Housing.csv")];
        let mut out = Vec::new();
        write_not_found(&mut out, &attempted, dir.path()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let listed = text
            .lines()
            .filter_map(|l| l.strip_prefix("  - "))
            .collect::<Vec<_>>();
        let expected = attempted.iter().map(|p| p.display().to_string()).collect::<Vec<_>>();
        assert_eq!(listed, expected);
        assert!(text.contains("Current working directory"));
    }
}
