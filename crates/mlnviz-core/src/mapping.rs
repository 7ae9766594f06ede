//! Companion mapping file: vertex id to label or geocoordinates.
//!
//! The mapping file is a CSV with a header row. Row arity decides the value:
//!
//! - `id,label` gives a label
//! - `id,lon,lat` gives coordinates
//! - `id,"x,lon,lat",...` (more than 3 columns, comma inside column 2) gives
//!   coordinates taken from the quoted sub-field
//!
//! Rows of any other shape are skipped.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum MappingValue {
    Label(String),
    Coordinates { lon: f64, lat: f64 },
}

impl fmt::Display for MappingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingValue::Label(label) => write!(f, "{label}"),
            MappingValue::Coordinates { lon, lat } => write!(f, "{lon},{lat}"),
        }
    }
}

/// A geographic position, optionally carrying the label attribute from a
/// `lat,long,attr` label.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub attribute: Option<String>,
}

impl MappingValue {
    /// Position of this entry, if it has one.
    ///
    /// Labels shaped `lat,long[,attr]` are read as positions too; this is how
    /// airport and accident mapping files carry coordinates.
    pub fn geo(&self) -> Option<GeoPoint> {
        match self {
            MappingValue::Coordinates { lon, lat } => Some(GeoPoint {
                lat: *lat,
                lon: *lon,
                attribute: None,
            }),
            MappingValue::Label(label) => {
                let mut parts = label.split(',');
                let lat = parts.next()?.trim().parse().ok()?;
                let lon = parts.next()?.trim().parse().ok()?;
                let attribute = parts.next().map(|s| s.trim().to_string());
                Some(GeoPoint {
                    lat,
                    lon,
                    attribute,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMapping {
    entries: BTreeMap<String, MappingValue>,
}

impl LabelMapping {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the mapping file at `path`, or return an empty mapping if there
    /// is no such file.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no mapping file, using default labels");
            return Ok(Self::empty());
        }
        Self::read(path)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|e| {
            Error::from(e)
                .with_operation("mapping::read")
                .with_context("path", shown.clone())
        })?;
        let mapping = Self::from_reader(file).map_err(|e| e.with_context("path", shown.clone()))?;
        debug!(path = %shown, entries = mapping.len(), "loaded mapping file");
        Ok(mapping)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                Error::new(ErrorKind::ParseFailed, "malformed mapping row")
                    .with_operation("mapping::from_reader")
                    .set_source(e)
            })?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let Some(node_id) = record.get(0) else {
                continue;
            };
            let node_id = node_id.trim().to_string();

            let value = match record.len() {
                2 => MappingValue::Label(record[1].trim().to_string()),
                3 => MappingValue::Coordinates {
                    lon: parse_coordinate(&record[1], line)?,
                    lat: parse_coordinate(&record[2], line)?,
                },
                n if n > 3 && record[1].contains(',') => {
                    let parts: Vec<&str> = record[1].split(',').collect();
                    let [_, lon, lat] = parts.as_slice() else {
                        return Err(Error::parse_failed(
                            line,
                            format!("expected 3 values in '{}'", &record[1]),
                        )
                        .with_operation("mapping::from_reader"));
                    };
                    MappingValue::Coordinates {
                        lon: parse_coordinate(lon, line)?,
                        lat: parse_coordinate(lat, line)?,
                    }
                }
                _ => continue,
            };
            entries.insert(node_id, value);
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, id: impl Into<String>, value: MappingValue) {
        self.entries.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&MappingValue> {
        self.entries.get(id)
    }

    /// Mapped label for `id`, if present.
    pub fn label(&self, id: &str) -> Option<String> {
        self.entries.get(id).map(|v| v.to_string())
    }

    /// Mapped label, or the synthesized `Node {id}` fallback.
    pub fn label_or_default(&self, id: &str) -> String {
        self.label(id).unwrap_or_else(|| format!("Node {id}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_coordinate(field: &str, line: usize) -> Result<f64> {
    field.trim().parse::<f64>().map_err(|e| {
        Error::parse_failed(line, format!("'{}' is not a coordinate", field.trim()))
            .with_operation("mapping::from_reader")
            .set_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping(text: &str) -> LabelMapping {
        LabelMapping::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn two_columns_are_labels() {
        let m = mapping("id,label\n1, Chicago \n2,\"JFK,40.6,-73.7\"\n");
        assert_eq!(m.get("1"), Some(&MappingValue::Label("Chicago".into())));
        assert_eq!(m.label("2").as_deref(), Some("JFK,40.6,-73.7"));
    }

    #[test]
    fn three_columns_are_coordinates() {
        let m = mapping("id,lon,lat\n7,-87.6,41.8\n");
        assert_eq!(
            m.get("7"),
            Some(&MappingValue::Coordinates {
                lon: -87.6,
                lat: 41.8
            })
        );
    }

    #[test]
    fn wide_rows_take_coordinates_from_subfield() {
        let m = mapping("id,loc,a,b\n3,\"x,-80.1,25.7\",foo,bar\n4,plain,foo,bar\n");
        assert_eq!(
            m.get("3"),
            Some(&MappingValue::Coordinates {
                lon: -80.1,
                lat: 25.7
            })
        );
        assert!(m.get("4").is_none());
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn bad_coordinate_fails() {
        let err = LabelMapping::from_reader("id,lon,lat\n1,east,41\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
    }

    #[test]
    fn default_label_fallback() {
        let m = LabelMapping::empty();
        assert_eq!(m.label_or_default("12"), "Node 12");
    }

    #[test]
    fn geo_from_label_and_coordinates() {
        let label = MappingValue::Label("41.97,-87.90,ORD".into());
        assert_eq!(
            label.geo(),
            Some(GeoPoint {
                lat: 41.97,
                lon: -87.90,
                attribute: Some("ORD".into())
            })
        );
        assert_eq!(MappingValue::Label("Chicago".into()).geo(), None);

        let coords = MappingValue::Coordinates { lon: 1.0, lat: 2.0 };
        assert_eq!(coords.geo().map(|g| (g.lat, g.lon)), Some((2.0, 1.0)));
    }

    #[test]
    fn missing_file_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let m = LabelMapping::load_optional(dir.path().join("absent.map")).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn read_from_disk_records_the_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice_L1.map");
        std::fs::write(&path, "id,label\n0,Chicago\n").unwrap();
        let m = LabelMapping::read(&path).unwrap();
        assert_eq!(m.label("0").as_deref(), Some("Chicago"));

        std::fs::write(&path, "id,lon,lat\n7,west,41.8\n").unwrap();
        let err = LabelMapping::read(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert_eq!(err.context_value("path"), Some(path.display().to_string().as_str()));
    }
}
