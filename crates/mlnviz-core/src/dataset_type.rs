//! Dataset-type detection and click-through link construction.

use strum_macros::{Display, EnumString, IntoStaticStr};

/// Known dataset families, recognised from the input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
pub enum DatasetType {
    #[strum(serialize = "airport")]
    Airport,
    #[strum(serialize = "movies")]
    Movies,
    #[strum(serialize = "USCounty")]
    UsCounty,
    #[strum(serialize = "DBLP")]
    Dblp,
    #[strum(serialize = "Accident")]
    Accident,
    #[default]
    #[strum(serialize = "unknown")]
    Unknown,
}

/// Path substring -> dataset type, checked in order.
const PATH_MARKERS: [(&str, DatasetType); 5] = [
    ("Airlines", DatasetType::Airport),
    ("IMDb", DatasetType::Movies),
    ("USCounty", DatasetType::UsCounty),
    ("DBLP", DatasetType::Dblp),
    ("Accident", DatasetType::Accident),
];

impl DatasetType {
    pub fn detect(path: &str) -> Self {
        PATH_MARKERS
            .iter()
            .find(|(marker, _)| path.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(DatasetType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Build the search link for a node label.
///
/// Returns `None` for unknown datasets, for the `"0"` placeholder label, and
/// for labels missing the field the dataset type needs.
pub fn create_url(label: &str, dataset_type: DatasetType) -> Option<String> {
    if label == "0" {
        return None;
    }

    match dataset_type {
        DatasetType::Airport => {
            // lat,long,airportCode
            let code = label.split(',').nth(2)?;
            Some(format!(
                "https://www.google.com/maps/search/?api=1&query={}+airport",
                form_encode(code)
            ))
        }
        DatasetType::Movies => {
            let title = label.split(',').nth(1)?;
            Some(format!(
                "https://www.google.com/search?q={}",
                form_encode(&format!("{title} IMDb"))
            ))
        }
        DatasetType::UsCounty => Some(format!(
            "https://www.google.com/search?q={}+county",
            form_encode(label)
        )),
        DatasetType::Dblp => {
            let (_, authors) = label.split_once(',')?;
            Some(format!("https://www.google.com/search?q={authors}"))
        }
        DatasetType::Accident => {
            let location = label.split(',').take(2).collect::<Vec<_>>().join(",");
            Some(format!(
                "https://www.google.com/maps/search/?api=1&query={location}"
            ))
        }
        DatasetType::Unknown => None,
    }
}

/// `application/x-www-form-urlencoded` encoding of a query value.
pub fn form_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", b)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_by_path_substring() {
        assert_eq!(DatasetType::detect("/data/IMDb/L1.vcom"), DatasetType::Movies);
        assert_eq!(DatasetType::detect("Airlines_L1.net"), DatasetType::Airport);
        assert_eq!(DatasetType::detect("/tmp/USCounty.ecom"), DatasetType::UsCounty);
        assert_eq!(DatasetType::detect("/tmp/other.net"), DatasetType::Unknown);
    }

    #[test]
    fn detection_order_prefers_earlier_marker() {
        assert_eq!(DatasetType::detect("Airlines_IMDb.net"), DatasetType::Airport);
    }

    #[test]
    fn names_match_tags() {
        assert_eq!(DatasetType::UsCounty.to_string(), "USCounty");
        assert_eq!(DatasetType::Unknown.as_str(), "unknown");
        assert_eq!("DBLP".parse::<DatasetType>().ok(), Some(DatasetType::Dblp));
    }

    #[test]
    fn unknown_or_zero_label_has_no_link() {
        assert_eq!(create_url("Chicago", DatasetType::Unknown), None);
        for kind in [
            DatasetType::Airport,
            DatasetType::Movies,
            DatasetType::UsCounty,
            DatasetType::Dblp,
            DatasetType::Accident,
        ] {
            assert_eq!(create_url("0", kind), None);
        }
    }

    #[test]
    fn per_type_links() {
        assert_eq!(
            create_url("41.9,-87.9,ORD", DatasetType::Airport).as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=ORD+airport")
        );
        assert_eq!(
            create_url("12,The Matrix", DatasetType::Movies).as_deref(),
            Some("https://www.google.com/search?q=The+Matrix+IMDb")
        );
        assert_eq!(
            create_url("Cook, IL", DatasetType::UsCounty).as_deref(),
            Some("https://www.google.com/search?q=Cook%2C+IL+county")
        );
        assert_eq!(
            create_url("5,Knuth;Yao", DatasetType::Dblp).as_deref(),
            Some("https://www.google.com/search?q=Knuth;Yao")
        );
        assert_eq!(
            create_url("33.5,-112.1,3", DatasetType::Accident).as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=33.5,-112.1")
        );
    }

    #[test]
    fn label_missing_field_has_no_link() {
        assert_eq!(create_url("ORD", DatasetType::Airport), None);
        assert_eq!(create_url("Alone", DatasetType::Dblp), None);
    }

    #[test]
    fn form_encoding() {
        assert_eq!(form_encode("a b&c"), "a+b%26c");
        assert_eq!(form_encode("é"), "%C3%A9");
    }
}
