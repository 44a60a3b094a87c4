// src/pipeline.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use tracing::info;

use crate::config::EtlConfig;
use crate::dictionary::build_dictionary;
use crate::extract::load_table;
use crate::load::{write_dictionary, write_table};
use crate::process::{
    convert::{parse_dates, standardize_labels, validate_urls},
    dedup::dedupe,
    missing::{drop_missing_headline, fill_defaults, refill_defaults},
    raw_table::{Column, Table},
    trimming::{apply_trimming, TEXT_COLUMNS},
};

/// Counts gathered while the stages run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub initial_rows: usize,
    pub dropped_missing_headline: usize,
    pub duplicates_removed: usize,
    pub label_variants_before: usize,
    pub label_variants_after: usize,
    pub dates_parsed: usize,
    pub stated_on_parsed: usize,
    pub valid_urls: usize,
    pub invalid_urls: usize,
    pub final_rows: usize,
}

impl PipelineReport {
    pub fn rows_removed(&self) -> usize {
        self.initial_rows - self.final_rows
    }
}

/// Batch cleaner: load, transform, write the cleaned table and its dictionary.
pub struct Pipeline {
    config: EtlConfig,
}

impl Pipeline {
    pub fn new(config: EtlConfig) -> Self {
        Self { config }
    }

    /// Run every transform stage in order over an in-memory table.
    /// Only the drop and dedupe stages change the row count.
    pub fn transform(mut table: Table) -> (Table, PipelineReport) {
        let mut report = PipelineReport {
            initial_rows: table.len(),
            ..Default::default()
        };

        report.dropped_missing_headline = drop_missing_headline(&mut table);
        info!(
            dropped = report.dropped_missing_headline,
            "dropped rows with missing headlines"
        );

        fill_defaults(&mut table);
        info!("filled missing Source with 'Unknown' and URLs with 'Not Available'");

        report.duplicates_removed = dedupe(&mut table);
        info!(removed = report.duplicates_removed, "removed duplicates");

        apply_trimming(&mut table, &TEXT_COLUMNS);
        refill_defaults(&mut table);
        info!("fixed encoding and whitespace issues");

        let labels = standardize_labels(&mut table);
        report.label_variants_before = labels.before;
        report.label_variants_after = labels.after;
        info!(
            before = labels.before,
            after = labels.after,
            "standardized label variations"
        );

        report.stated_on_parsed = parse_dates(&mut table, Column::StatedOn);
        report.dates_parsed = parse_dates(&mut table, Column::Date);
        info!(
            date = report.dates_parsed,
            stated_on = report.stated_on_parsed,
            "parsed dates"
        );

        let urls = validate_urls(&mut table);
        report.valid_urls = urls.valid;
        report.invalid_urls = urls.invalid;
        info!(valid = urls.valid, invalid = urls.invalid, "validated URLs");

        report.final_rows = table.len();
        (table, report)
    }

    /// Load the configured input, clean it, and write both outputs.
    #[tracing::instrument(level = "info", skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<PipelineReport> {
        let table = load_table(&self.config.input)?;
        let (clean, report) = Self::transform(table);

        write_table(&clean, &self.config.output)?;
        info!(records = clean.len(), path = %self.config.output.display(), "clean data saved");

        let dict = build_dictionary(&clean);
        write_dictionary(&dict, &self.config.dictionary)?;

        if let Some(path) = &self.config.report {
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(path, json).with_context(|| format!("writing report {:?}", path))?;
        }

        info!(
            initial = report.initial_rows,
            final_rows = report.final_rows,
            removed = report.rows_removed(),
            "etl complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use crate::process::raw_table::Record;
    use std::path::Path;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn raw(fields: [Option<&str>; 6]) -> Record {
        let mut rec = Record::default();
        for (col, v) in Column::ALL.into_iter().zip(fields) {
            rec.set(col, v.map(String::from));
        }
        rec
    }

    fn row(table: &Table, i: usize) -> [Option<&str>; 6] {
        table.ordered_rows().nth(i).expect("row exists")
    }

    #[test]
    fn scenario_a_single_dirty_row() {
        init_test_logging();
        let input = Table::new(vec![raw([
            Some("  Says the moon is  fläT"),
            Some(""),
            Some("18-Jun-20"),
            Some("Jun 19, 2020"),
            Some("Mostly True"),
            Some("Invalid URL"),
        ])]);
        let (out, report) = Pipeline::transform(input);
        assert_eq!(
            row(&out, 0),
            [
                Some("Says the moon is flT"),
                Some("Unknown"),
                Some("2020-06-18"),
                Some("2020-06-19"),
                Some("mostly-true"),
                Some("Invalid URL"),
            ]
        );
        assert_eq!(report.final_rows, 1);
        assert_eq!(report.valid_urls, 0);
        assert_eq!(report.invalid_urls, 1);
    }

    #[test]
    fn scenario_b_missing_headline_is_dropped_without_trace() {
        let input = Table::new(vec![
            raw([Some("kept"), Some("a"), None, None, Some("true"), None]),
            raw([
                None,
                Some("GhostSource"),
                Some("1-Jan-20"),
                None,
                Some("false"),
                Some("https://ghost.example.com"),
            ]),
        ]);
        let (out, report) = Pipeline::transform(input);
        assert_eq!(out.len(), 1);
        assert_eq!(report.dropped_missing_headline, 1);
        for rec in &out.records {
            for col in Column::ALL {
                let v = rec.get(col).unwrap_or("");
                assert!(!v.contains("Ghost") && !v.contains("ghost"), "{v:?}");
            }
        }
    }

    #[test]
    fn scenario_c_identical_rows_collapse_to_first() {
        let dup = [
            Some("Same claim"),
            Some("Speaker"),
            Some("2020-01-01"),
            Some("2020-01-02"),
            Some("half-true"),
            Some("https://a.com/1"),
        ];
        let input = Table::new(vec![
            raw(dup),
            raw([Some("Other"), None, None, None, None, None]),
            raw(dup),
        ]);
        let (out, report) = Pipeline::transform(input);
        assert_eq!(out.len(), 2);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(row(&out, 0)[0], Some("Same claim"));
        assert_eq!(row(&out, 1)[0], Some("Other"));
    }

    #[test]
    fn dedupe_compares_values_before_normalization() {
        // rows differing only in whitespace are distinct when dedup runs
        let input = Table::new(vec![
            raw([Some("Claim"), Some("S"), None, None, None, None]),
            raw([Some("Claim "), Some("S"), None, None, None, None]),
        ]);
        let (out, report) = Pipeline::transform(input);
        assert_eq!(report.duplicates_removed, 0);
        assert_eq!(out.len(), 2);
        assert_eq!(row(&out, 0), row(&out, 1));
    }

    #[test]
    fn scenario_d_labels() {
        let input = Table::new(
            ["PANTS ON FIRE!!", "half TRUE", "maybe"]
                .into_iter()
                .enumerate()
                .map(|(i, label)| {
                    let headline = format!("claim {i}");
                    raw([Some(headline.as_str()), None, None, None, Some(label), None])
                })
                .collect(),
        );
        let (out, report) = Pipeline::transform(input);
        let labels: Vec<_> = out.column(Column::Label).collect();
        assert_eq!(
            labels,
            vec![Some("pants-fire"), Some("half-true"), Some("Unknown")]
        );
        assert_eq!(report.label_variants_before, 3);
        assert_eq!(report.label_variants_after, 3);
    }

    #[test]
    fn output_invariants_hold() {
        let input = Table::new(vec![
            raw([
                Some("x"),
                Some("\u{2603}"),
                Some("garbage"),
                Some("nan"),
                Some("??"),
                Some("www.nope"),
            ]),
            raw([Some("y"), None, None, None, None, Some("https://ok.example.com/a")]),
            raw([Some("z"), Some("s"), None, None, Some("TRUE"), Some("")]),
        ]);
        let (out, _) = Pipeline::transform(input);
        for rec in &out.records {
            let headline = rec.get(Column::Headline).expect("headline");
            assert!(!headline.is_empty());
            let label = rec.get(Column::Label).expect("label");
            assert!(crate::process::Verdict::ALL.iter().any(|v| v.as_str() == label));
            let link = rec.get(Column::Link).expect("link");
            assert!(
                crate::process::is_valid_url(Some(link))
                    || link == crate::process::NOT_AVAILABLE
                    || link == crate::process::INVALID_URL
            );
            assert!(rec.get(Column::Source).is_some());
        }
        assert_eq!(out.records[0].link.as_deref(), Some("Invalid URL"));
        assert_eq!(out.records[2].link.as_deref(), Some("Not Available"));
        assert_eq!(out.records[0].stated_on, None);
    }

    fn write_input(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("dirty.csv");
        fs::write(
            &path,
            format!("News_Headline,Source,Stated_On,Date,Label,Link_Of_News\n{body}"),
        )
        .expect("write input");
        path
    }

    #[test]
    fn run_writes_clean_table_dictionary_and_report() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let input = write_input(
            dir.path(),
            "\"  Says the moon is  fläT\",,18-Jun-20,\"Jun 19, 2020\",Mostly True,Invalid URL\n\
             ,Nobody,,,,\n\
             Repeat,Me,,,true,https://a.com\n\
             Repeat,Me,,,true,https://a.com\n",
        );
        let config = EtlConfig {
            input,
            output: dir.path().join("out/clean.csv"),
            dictionary: dir.path().join("out/dict.csv"),
            report: Some(dir.path().join("report.json")),
        };
        let report = Pipeline::new(config.clone()).run()?;
        assert_eq!(report.initial_rows, 4);
        assert_eq!(report.final_rows, 2);
        assert_eq!(report.rows_removed(), 2);

        let clean = fs::read_to_string(&config.output)?;
        let lines: Vec<_> = clean.lines().collect();
        assert_eq!(
            lines,
            vec![
                "News_Headline,Source,Stated_On,Date,Label,Link_Of_News",
                "Says the moon is flT,Unknown,2020-06-18,2020-06-19,mostly-true,Invalid URL",
                "Repeat,Me,,,TRUE,https://a.com",
            ]
        );

        let dict = fs::read_to_string(&config.dictionary)?;
        assert_eq!(dict.lines().count(), 7);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json"))?)?;
        assert_eq!(json["duplicates_removed"], 1);
        assert_eq!(json["dropped_missing_headline"], 1);
        Ok(())
    }

    #[test]
    fn run_with_missing_columns_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("bad.csv");
        fs::write(&input, "News_Headline,Label\nx,true\n")?;
        let config = EtlConfig {
            input,
            output: dir.path().join("clean.csv"),
            dictionary: dir.path().join("dict.csv"),
            report: None,
        };
        let err = Pipeline::new(config.clone()).run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::MissingColumns { .. })
        ));
        assert!(!config.output.exists());
        assert!(!config.dictionary.exists());
        Ok(())
    }

    #[test]
    fn rerun_overwrites_outputs_identically() -> Result<()> {
        let dir = tempdir()?;
        let input = write_input(dir.path(), "A,B,,,,\n");
        let config = EtlConfig {
            input,
            output: dir.path().join("clean.parquet"),
            dictionary: dir.path().join("dict.csv"),
            report: None,
        };
        let pipeline = Pipeline::new(config.clone());
        let first = pipeline.run()?;
        let dict_first = fs::read(&config.dictionary)?;
        let second = pipeline.run()?;
        assert_eq!(first, second);
        assert_eq!(fs::read(&config.dictionary)?, dict_first);
        Ok(())
    }
}
