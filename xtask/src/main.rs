use anyhow::Context;
use clap::{Parser, Subcommand};
use destcheck_types::dataset::City;
use fs_err as fs;
use std::path::Path;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by destcheck.
    PrintSchemas,
    /// Write a small sample dataset (one clean city per file).
    InitDataset {
        #[arg(long, default_value = "sample-dataset")]
        dir: String,
    },
    /// Run `destcheck validate` over a dataset directory.
    Validate {
        #[arg(long, default_value = "sample-dataset")]
        dir: String,
    },
}

const SAMPLE_GOA: &str = r#"{
  "id": "C1",
  "name": "Goa",
  "state": "Goa",
  "country": "India",
  "coordinates": {"latitude": 15.2993, "longitude": 74.124},
  "description": {"en": "Beaches, churches and spice farms.", "hi": "समुद्र तट, चर्च और मसाले के बागान।"},
  "timezone": "Asia/Kolkata",
  "group_size": {"min": 1, "max": 12},
  "weather_alert": {"sources": ["IMD"], "thresholds": {"rain_mm": 50}},
  "points_of_interest": [
    {
      "id": "GO1",
      "name": {"en": "Baga Beach", "hi": "बागा बीच"},
      "description": {"en": "A lively beach with water sports.", "hi": "जल क्रीड़ा वाला जीवंत समुद्र तट।"},
      "category": "Beach",
      "coordinates": {"latitude": 15.5553, "longitude": 73.7517},
      "rating": 4.4,
      "cost": [{"amount": 0, "currency": "INR"}],
      "best_time_to_visit": {"start": "06:00", "end": "18:00"}
    }
  ],
  "transport": {"taxi": {"currency": "INR", "per_day": 2500}}
}
"#;

const SAMPLE_PONDICHERRY: &str = r#"{
  "id": "C2",
  "name": "Pondicherry",
  "state": "Puducherry",
  "country": "India",
  "coordinates": {"latitude": 11.9416, "longitude": 79.8083},
  "description": {"en": "French quarter and quiet promenades.", "hi": "फ्रांसीसी बस्ती और शांत सैरगाह।"},
  "timezone": "Asia/Kolkata",
  "group_size": {"min": 1, "max": 8},
  "weather_alert": {"sources": ["IMD"], "thresholds": {"wind_kmph": 60}},
  "points_of_interest": [
    {
      "id": "PO1",
      "name": {"en": "Promenade Beach", "hi": "प्रोमेनेड बीच"},
      "description": {"en": "Seafront walk along the Bay of Bengal.", "hi": "बंगाल की खाड़ी के किनारे सैर।"},
      "category": "Beach",
      "coordinates": {"latitude": 11.9338, "longitude": 79.8358},
      "rating": 4.5,
      "cost": [{"amount": 0, "currency": "INR"}]
    }
  ],
  "transport": {"auto_rickshaw": {"currency": "INR", "average_fare": 150}}
}
"#;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", destcheck_types::schema::DESTCHECK_REPORT_V1);
        }
        Command::InitDataset { dir } => {
            let written = init_dataset(Path::new(&dir))?;
            println!("initialized {dir} with {written} city files");
        }
        Command::Validate { dir } => {
            let status = ProcessCommand::new("cargo")
                .args(["run", "-p", "destcheck", "--", "validate", &dir])
                .status()
                .context("run destcheck validate")?;
            if !status.success() {
                anyhow::bail!("validate failed");
            }
        }
    }
    Ok(())
}

fn init_dataset(dir: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let samples = [("goa.json", SAMPLE_GOA), ("pondicherry.json", SAMPLE_PONDICHERRY)];
    for (name, body) in samples {
        // Catch a broken sample before it lands on disk.
        serde_json::from_str::<City>(body).with_context(|| format!("sample {name}"))?;
        fs::write(dir.join(name), body)?;
    }
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_dataset_writes_parseable_cities() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("data");
        assert_eq!(init_dataset(&dir).unwrap(), 2);

        let goa: City =
            serde_json::from_str(&fs::read_to_string(dir.join("goa.json")).unwrap()).unwrap();
        assert_eq!(goa.id(), "C1");
        assert_eq!(goa.pois().len(), 1);
    }
}
