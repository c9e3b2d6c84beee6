use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::dataset::Dataset;
use crate::error::LoadError;

/// A single house, one row of the input file.
///
/// Every field is required; a row with an empty or ill-typed cell fails the
/// whole load rather than being skipped.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Record {
    pub price: u64,
    pub area: u64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub stories: u32,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub parking: u32,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FurnishingStatus {
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl FurnishingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FurnishingStatus::Furnished => "furnished",
            FurnishingStatus::SemiFurnished => "semi-furnished",
            FurnishingStatus::Unfurnished => "unfurnished",
        }
    }
}

/// Reads the header row and every record of `path`.
///
/// A missing file surfaces as `LoadError::Io` with `io::ErrorKind::NotFound`
/// so callers can tell it apart from a file that exists but does not parse.
pub fn read_records(path: &Path) -> Result<(Vec<String>, Vec<Record>), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(file);
    let malformed = |source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let headers = rdr
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        let record: Record = result.map_err(malformed)?;
        records.push(record);
    }
    debug!("read {} records from {}", records.len(), path.display());
    Ok((headers, records))
}

/// Tries each candidate in order and returns the first dataset that loads.
///
/// Only missing files fall through to the next candidate. Every attempt is
/// announced on `out`.
pub fn load_first<W: Write>(candidates: &[PathBuf], out: &mut W) -> Result<Dataset, LoadError> {
    for path in candidates {
        writeln!(out, "Trying to load data from: {}", path.display())?;
        debug!("trying candidate {}", path.display());
        match read_records(path) {
            Ok((headers, records)) => {
                writeln!(out, "Successfully loaded data from: {}", path.display())?;
                info!("loaded {} records from {}", records.len(), path.display());
                return Ok(Dataset::new(path.clone(), headers, records));
            }
            Err(LoadError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                continue
            }
            Err(e) => return Err(e),
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    warn!("no dataset found, tried {} locations", candidates.len());
    Err(LoadError::NotFound {
        attempted: candidates.to_vec(),
        cwd,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    pub const HEADER: &str = "price,area,bedrooms,bathrooms,stories,mainroad,guestroom,basement,hotwaterheating,airconditioning,parking,prefarea,furnishingstatus";

    pub fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        contents.push('\n');
        fs::write(&path, contents).unwrap();
        path
    }

    const ROWS: &[&str] = &[
        "13300000,7420,4,2,3,yes,no,no,no,yes,2,yes,furnished",
        "12250000,8960,4,4,4,yes,no,no,no,yes,3,no,semi-furnished",
        "1750000,3850,3,1,2,yes,no,no,no,no,0,no,unfurnished",
    ];

    #[test]
    fn test_read_records_typed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", ROWS);

        let (headers, records) = read_records(&path).unwrap();
        assert_eq!(headers.len(), 13);
        assert_eq!(headers[0], "price");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].bathrooms, 4);
        assert_eq!(records[1].furnishingstatus, FurnishingStatus::SemiFurnished);
        assert_eq!(records[2].airconditioning, YesNo::No);
    }

    #[test]
    fn test_load_first_skips_missing_candidates() {
        let dir = TempDir::new().unwrap();
        let found = write_csv(&dir, "Housing.csv", ROWS);
        let candidates = vec![dir.path().join("data").join("Housing.csv"), found.clone()];

        let mut out = Vec::new();
        let dataset = load_first(&candidates, &mut out).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.source(), found.as_path());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Trying to load data from").count(), 2);
        assert!(text.contains("Successfully loaded data from"));
    }

    #[test]
    fn test_load_first_all_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().join("a.csv"), dir.path().join("b.csv")];

        let err = load_first(&candidates, &mut io::sink()).unwrap_err();
        match err {
            LoadError::NotFound { attempted, .. } => assert_eq!(attempted, candidates),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_value_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", &["13300000,,4,2,3,yes,no,no,no,yes,2,yes,furnished"]);

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_malformed_file_stops_search() {
        let dir = TempDir::new().unwrap();
        let bad = write_csv(&dir, "bad.csv", &["lots,7420,4,2,3,yes,no,no,no,yes,2,yes,furnished"]);
        let good = write_csv(&dir, "good.csv", ROWS);

        let err = load_first(&[bad, good], &mut io::sink()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_unknown_furnishing_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Housing.csv", &["13300000,7420,4,2,3,yes,no,no,no,yes,2,yes,luxurious"]);
        assert!(read_records(&path).is_err());
    }
}
