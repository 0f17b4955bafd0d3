//! Mass-list file reader.
//!
//! Streams [`MassListItem`]s from a delimited file with a header row.
//! Columns are located by header name, case-insensitively, so exports with
//! extra or reordered columns load without changes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tfm_types::MassListItem;

use crate::types::{MassListConfig, TfmError, TfmResult};

/// Resolved column positions.
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: usize,
    tfm: usize,
    system: usize,
    component: usize,
    description: Option<usize>,
}

/// A streaming reader for mass-list files.
pub struct MassListReader<R: Read> {
    reader: Reader<R>,
    columns: Columns,
    records_read: usize,
}

impl MassListReader<BufReader<File>> {
    /// Creates a reader from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or a required column is missing.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &MassListConfig) -> TfmResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TfmError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read> MassListReader<R> {
    /// Creates a reader from any byte source.
    pub fn from_reader(reader: R, config: &MassListConfig) -> TfmResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Self::resolve_columns(csv_reader.headers()?, config)?;

        Ok(Self {
            reader: csv_reader,
            columns,
            records_read: 0,
        })
    }

    fn resolve_columns(headers: &StringRecord, config: &MassListConfig) -> TfmResult<Columns> {
        let position = |name: &str| {
            headers.iter().position(|h| {
                // Handle UTF-8 BOM at start of file
                h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name)
            })
        };
        let required = |name: &str| {
            position(name).ok_or_else(|| TfmError::MissingColumn {
                column: name.to_string(),
            })
        };

        Ok(Columns {
            id: required(&config.id_column)?,
            tfm: required(&config.tfm_column)?,
            system: required(&config.system_column)?,
            component: required(&config.component_column)?,
            description: position(&config.description_column),
        })
    }

    /// Returns the number of data rows read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Reads every valid item, skipping invalid rows.
    pub fn parse_all(self) -> Vec<MassListItem> {
        self.flatten().collect()
    }

    fn item_from_record(&self, record: &StringRecord) -> TfmResult<MassListItem> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let id = field(self.columns.id);
        if id.is_empty() {
            return Err(TfmError::InvalidRow {
                row: self.records_read,
                reason: "empty identifier".to_string(),
            });
        }

        let tfm = field(self.columns.tfm);
        if tfm.is_empty() {
            return Err(TfmError::InvalidRow {
                row: self.records_read,
                reason: format!("empty TFM code for item {id}"),
            });
        }

        Ok(MassListItem {
            id,
            tfm,
            system: field(self.columns.system),
            component: field(self.columns.component),
            description: self
                .columns
                .description
                .map(field)
                .filter(|d| !d.is_empty()),
        })
    }
}

impl<R: Read> Iterator for MassListReader<R> {
    type Item = TfmResult<MassListItem>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip empty records
                    if record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(self.item_from_record(&record));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ID;TFM;System;Component;Description
1;+1=360.001-RTA001;360.001;RTA001;Aggregat
2;+1=360.001-KA002;360.001;KA002;
;+1=360.001-KA003;360.001;KA003;missing id
3;;360.001;KA004;missing tfm

4;+1=433.001-JP001;433.001;JP001;Pumpe
";

    #[test]
    fn test_read_items() {
        let reader = MassListReader::from_reader(SAMPLE.as_bytes(), &MassListConfig::default()).unwrap();
        let results: Vec<_> = reader.collect();
        assert_eq!(results.len(), 5);
        assert!(results[2].is_err());
        assert!(results[3].is_err());

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(first.tfm, "+1=360.001-RTA001");
        assert_eq!(first.description.as_deref(), Some("Aggregat"));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.description, None);
    }

    #[test]
    fn test_parse_all_skips_invalid_rows() {
        let reader = MassListReader::from_reader(SAMPLE.as_bytes(), &MassListConfig::default()).unwrap();
        let items = reader.parse_all();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_reordered_columns_and_bom() {
        let data = "\u{feff}component,tfm,id,system,extra\nRTA001,=360.001-RTA001,9,360.001,x\n";
        let items = MassListReader::from_reader(data.as_bytes(), &MassListConfig::csv())
            .unwrap()
            .parse_all();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "9");
        assert_eq!(items[0].component, "RTA001");
        assert_eq!(items[0].description, None);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "id,tfm,component\n1,=360.001-RTA001,RTA001\n";
        let result = MassListReader::from_reader(data.as_bytes(), &MassListConfig::csv());
        match result {
            Err(TfmError::MissingColumn { column }) => assert_eq!(column, "system"),
            _ => panic!("expected missing column error"),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = MassListReader::from_path("/nonexistent/mass_list.csv", &MassListConfig::csv());
        assert!(matches!(result, Err(TfmError::FileNotFound { .. })));
    }
}
