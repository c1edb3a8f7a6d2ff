mod bootstrap;

use std::path::PathBuf;

use anyhow::{Context, Result};
use beep_core::settings::Settings;
use beep_data::aggregator::BeepAggregator;
use beep_data::reader::{read_beeps, read_data};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Big Beep v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, reference date: {}",
        settings.data.display(),
        settings.reference_date
    );

    run(&settings)?;
    Ok(())
}

/// Read, summarise, optionally dump and plot. Returns the figures written.
fn run(settings: &Settings) -> Result<Vec<PathBuf>> {
    if settings.dump_json {
        println!("{}", dump_json(settings)?);
    }

    let raw = read_beeps(&settings.data)
        .with_context(|| format!("loading beeps from {}", settings.data.display()))?;
    let data = raw.to_absolute_dates(&settings.reference_date)?;

    let summary = BeepAggregator::summarize(&data);
    tracing::info!(
        "{} beeps over {} days from {} observers ({} unattributed)",
        summary.beeps,
        summary.days,
        summary.observers,
        summary.unknown_beeps
    );

    if settings.no_plots {
        return Ok(Vec::new());
    }

    bootstrap::ensure_output_dir(&settings.out_dir)?;
    let written = beep_plot::write_figures(&settings.out_dir, &data, &settings.reference_date)?;
    Ok(written)
}

/// The dataset shaped by `--calendar-dates` and `--absolute-times`, as JSON.
fn dump_json(settings: &Settings) -> Result<String> {
    let dataset = read_data(&settings.data, &settings.read_options())
        .with_context(|| format!("loading beeps from {}", settings.data.display()))?;
    Ok(serde_json::to_string_pretty(&dataset)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
The Big Beep Theory,,,
Date,Time,Observer,Notes
9th May,10:15,JD,saw one
9th May,13:40,DR**2,
10/5/22,11:00,XY,
,,,
1st June?,,,
";

    fn settings_for(tmp: &TempDir, csv: &str, extra: &[&str]) -> Settings {
        let data = tmp.path().join("beeps.csv");
        std::fs::write(&data, csv).unwrap();
        let out = tmp.path().join("figures");

        let mut args = vec![
            "big-beep".to_string(),
            "--data".to_string(),
            data.display().to_string(),
            "--out-dir".to_string(),
            out.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Settings::from_args(args).unwrap()
    }

    #[test]
    fn test_run_writes_figures() {
        let tmp = TempDir::new().unwrap();
        let csv = SAMPLE.replace("1st June?,,,\n", "");
        let settings = settings_for(&tmp, &csv, &[]);

        let written = run(&settings).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_run_no_plots() {
        let tmp = TempDir::new().unwrap();
        let csv = SAMPLE.replace("1st June?,,,\n", "");
        let settings = settings_for(&tmp, &csv, &["--no-plots"]);

        assert!(run(&settings).unwrap().is_empty());
        assert!(!settings.out_dir.exists());
    }

    #[test]
    fn test_dump_json_day_offsets() {
        let tmp = TempDir::new().unwrap();
        let csv = SAMPLE.replace("1st June?,,,\n", "");
        let settings = settings_for(&tmp, &csv, &["--dump-json", "--absolute-times"]);

        let value: serde_json::Value = serde_json::from_str(&dump_json(&settings).unwrap()).unwrap();
        let days = value.as_object().unwrap();

        let keys: Vec<&str> = days.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["0", "1"]);
        assert_eq!(days["0"][0]["time"], serde_json::json!(36_900));
        assert_eq!(days["0"][1]["observer"], serde_json::json!("DR"));
    }

    #[test]
    fn test_dump_json_calendar_dates() {
        let tmp = TempDir::new().unwrap();
        let csv = SAMPLE.replace("1st June?,,,\n", "");
        let settings = settings_for(&tmp, &csv, &["--dump-json", "--calendar-dates"]);

        let text = dump_json(&settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let days = value.as_object().unwrap();

        assert_eq!(days.len(), 2);
        assert!(text.find("\"9/5/22\"").unwrap() < text.find("\"10/5/22\"").unwrap());
        assert_eq!(days["10/5/22"][0]["time"], serde_json::json!("11:00"));
        assert_eq!(days["10/5/22"][0]["observer"], serde_json::json!("XY"));
    }

    #[test]
    fn test_run_fails_on_unparseable_date() {
        let tmp = TempDir::new().unwrap();
        let settings = settings_for(&tmp, SAMPLE, &["--no-plots"]);

        assert!(run(&settings).is_err());
    }

    #[test]
    fn test_run_missing_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::from_args([
            "big-beep",
            "--data",
            tmp.path().join("absent.csv").to_str().unwrap(),
            "--no-plots",
        ])
        .unwrap();

        let err = run(&settings).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read file"));
    }
}
