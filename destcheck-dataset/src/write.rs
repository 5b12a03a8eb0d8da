use crate::load::{Dataset, RecordLayout, SourceFile};
use camino::{Utf8Path, Utf8PathBuf};

pub const DEFAULT_BACKUP_SUFFIX: &str = ".destcheck.bak";

/// Serialize the records of `file` back into the layout they were read from.
///
/// Output is pretty-printed with a trailing newline. Absent optional fields stay absent
/// and unknown fields are written back unchanged.
pub fn encode_file(dataset: &Dataset, file: &SourceFile) -> Result<String, serde_json::Error> {
    let records = dataset.cities.get(file.records.clone()).unwrap_or(&[]);
    let mut out = match (file.layout, records) {
        (RecordLayout::Single, [city]) => serde_json::to_string_pretty(city)?,
        _ => serde_json::to_string_pretty(records)?,
    };
    out.push('\n');
    Ok(out)
}

/// `goa.json` + `.destcheck.bak` -> `goa.json.destcheck.bak`.
pub fn backup_path(path: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use destcheck_types::dataset::City;

    fn dataset(layout: RecordLayout, cities: Vec<City>) -> Dataset {
        let len = cities.len();
        Dataset {
            input: Utf8PathBuf::from("data"),
            cities,
            files: vec![SourceFile {
                path: Utf8PathBuf::from("data/goa.json"),
                layout,
                records: 0..len,
            }],
        }
    }

    fn goa() -> City {
        City {
            id: Some("C1".into()),
            name: Some("Goa".into()),
            ..City::default()
        }
    }

    #[test]
    fn single_layout_writes_an_object() {
        let ds = dataset(RecordLayout::Single, vec![goa()]);
        let out = encode_file(&ds, &ds.files[0]).expect("encode");
        assert_eq!(out, "{\n  \"id\": \"C1\",\n  \"name\": \"Goa\"\n}\n");
    }

    #[test]
    fn array_layout_writes_an_array() {
        let ds = dataset(RecordLayout::Array, vec![goa()]);
        let out = encode_file(&ds, &ds.files[0]).expect("encode");
        assert!(out.starts_with("[\n"));
        assert!(out.ends_with("]\n"));
    }

    #[test]
    fn backup_appends_suffix() {
        assert_eq!(
            backup_path(Utf8Path::new("data/goa.json"), DEFAULT_BACKUP_SUFFIX),
            Utf8PathBuf::from("data/goa.json.destcheck.bak")
        );
    }
}
