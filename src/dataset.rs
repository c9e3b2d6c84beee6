use std::path::{Path, PathBuf};

use log::debug;

use crate::config::BinConfig;
use crate::csv_reader::Record;
use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericAttribute {
    Price,
    Area,
    Bedrooms,
    Bathrooms,
    Stories,
    Parking,
}

impl NumericAttribute {
    pub fn name(self) -> &'static str {
        match self {
            NumericAttribute::Price => "price",
            NumericAttribute::Area => "area",
            NumericAttribute::Bedrooms => "bedrooms",
            NumericAttribute::Bathrooms => "bathrooms",
            NumericAttribute::Stories => "stories",
            NumericAttribute::Parking => "parking",
        }
    }

    pub fn value(self, record: &Record) -> u64 {
        match self {
            NumericAttribute::Price => record.price,
            NumericAttribute::Area => record.area,
            NumericAttribute::Bedrooms => record.bedrooms.into(),
            NumericAttribute::Bathrooms => record.bathrooms.into(),
            NumericAttribute::Stories => record.stories.into(),
            NumericAttribute::Parking => record.parking.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalAttribute {
    MainRoad,
    GuestRoom,
    Basement,
    HotWaterHeating,
    AirConditioning,
    PrefArea,
    FurnishingStatus,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 7] = [
        CategoricalAttribute::MainRoad,
        CategoricalAttribute::GuestRoom,
        CategoricalAttribute::Basement,
        CategoricalAttribute::HotWaterHeating,
        CategoricalAttribute::AirConditioning,
        CategoricalAttribute::PrefArea,
        CategoricalAttribute::FurnishingStatus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalAttribute::MainRoad => "mainroad",
            CategoricalAttribute::GuestRoom => "guestroom",
            CategoricalAttribute::Basement => "basement",
            CategoricalAttribute::HotWaterHeating => "hotwaterheating",
            CategoricalAttribute::AirConditioning => "airconditioning",
            CategoricalAttribute::PrefArea => "prefarea",
            CategoricalAttribute::FurnishingStatus => "furnishingstatus",
        }
    }

    pub fn value(self, record: &Record) -> &'static str {
        match self {
            CategoricalAttribute::MainRoad => record.mainroad.as_str(),
            CategoricalAttribute::GuestRoom => record.guestroom.as_str(),
            CategoricalAttribute::Basement => record.basement.as_str(),
            CategoricalAttribute::HotWaterHeating => record.hotwaterheating.as_str(),
            CategoricalAttribute::AirConditioning => record.airconditioning.as_str(),
            CategoricalAttribute::PrefArea => record.prefarea.as_str(),
            CategoricalAttribute::FurnishingStatus => record.furnishingstatus.as_str(),
        }
    }
}

const NUMERIC: [NumericAttribute; 6] = [
    NumericAttribute::Price,
    NumericAttribute::Area,
    NumericAttribute::Bedrooms,
    NumericAttribute::Bathrooms,
    NumericAttribute::Stories,
    NumericAttribute::Parking,
];

/// Type name shown for a source column, `None` for unknown columns.
pub fn column_type(column: &str) -> Option<&'static str> {
    if NUMERIC.iter().any(|a| a.name() == column) {
        Some("integer")
    } else if CategoricalAttribute::ALL.iter().any(|a| a.name() == column) {
        Some("text")
    } else {
        None
    }
}

/// Text of `record`'s value in `column`, `None` for unknown columns.
pub fn field_text(record: &Record, column: &str) -> Option<String> {
    if let Some(a) = NUMERIC.iter().find(|a| a.name() == column) {
        return Some(a.value(record).to_string());
    }
    CategoricalAttribute::ALL
        .iter()
        .find(|a| a.name() == column)
        .map(|a| a.value(record).to_string())
}

/// Per-record bin assignment derived from a numeric column.
#[derive(Debug, Clone)]
pub struct RangeColumn {
    pub name: String,
    pub bins: BinConfig,
    pub assignments: Vec<Option<usize>>,
}

/// All houses of one run, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    columns: Vec<String>,
    records: Vec<Record>,
    ranges: Vec<RangeColumn>,
}

impl Dataset {
    pub fn new(source: PathBuf, columns: Vec<String>, records: Vec<Record>) -> Self {
        Dataset {
            source,
            columns,
            records,
            ranges: Vec::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Header names in file order, followed by any derived range columns.
    pub fn columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(self.ranges.iter().map(|r| r.name.as_str()))
            .collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn numeric_column(&self, attribute: NumericAttribute) -> Vec<u64> {
        self.records.iter().map(|r| attribute.value(r)).collect()
    }

    /// Bins `attribute` and stores the result as derived column `name`.
    ///
    /// Adding a column under an existing name replaces it.
    pub fn add_range_column(&mut self, name: &str, attribute: NumericAttribute, bins: &BinConfig) {
        let assignments = self
            .records
            .iter()
            .map(|r| bins.bin_index(attribute.value(r)))
            .collect::<Vec<_>>();
        debug!(
            "derived {} from {}: {} of {} records outside all bins",
            name,
            attribute.name(),
            assignments.iter().filter(|a| a.is_none()).count(),
            assignments.len()
        );

        let column = RangeColumn {
            name: name.to_string(),
            bins: bins.clone(),
            assignments,
        };
        match self.ranges.iter_mut().find(|r| r.name == name) {
            Some(existing) => *existing = column,
            None => self.ranges.push(column),
        }
    }

    pub fn range_column(&self, name: &str) -> Result<&RangeColumn, ReportError> {
        self.ranges
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ReportError::MissingRangeColumn(name.to_string()))
    }
}
