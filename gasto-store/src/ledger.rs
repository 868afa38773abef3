//! Append-only CSV ledger of finalized expenses.
//!
//! On-disk format, plain CSV so spreadsheet tools can open it:
//!   Data,Categoria,Valor,Descrição
//!   2026-08-27 12:30:00,Lazer,50.00,cinema

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use gasto_core::{Category, ExpenseRecord, LedgerSink};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// The file is created (with header) on first append, not here.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sum of the `Valor` column across the whole ledger; 0 when the
    /// file does not exist yet. Unparseable rows count as zero.
    pub fn total(&self) -> Result<f64> {
        if !self.path.exists() {
            return Ok(0.0);
        }
        let mut rdr = csv::Reader::from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut total = 0.0;
        for result in rdr.records() {
            let record = result?;
            let amount: f64 = record.get(2).unwrap_or("0").trim().parse().unwrap_or(0.0);
            total += amount;
        }
        Ok(total)
    }

    /// All records currently in the ledger, skipping rows whose date does
    /// not parse. Unknown category labels fall back to the catch-all.
    pub fn records(&self) -> Result<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut out = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let date_str = record.get(0).unwrap_or("").trim();
            let timestamp =
                match NaiveDateTime::parse_from_str(date_str, ExpenseRecord::TIMESTAMP_FMT) {
                    Ok(t) => t,
                    Err(_) => continue,
                };
            let category = Category::from_label(record.get(1).unwrap_or("").trim())
                .unwrap_or(Category::DEFAULT);
            let amount: f64 = record.get(2).unwrap_or("0").trim().parse().unwrap_or(0.0);
            let description = record.get(3).unwrap_or("").to_string();

            out.push(ExpenseRecord::new(timestamp, category, amount, description));
        }
        Ok(out)
    }
}

impl LedgerSink for CsvLedger {
    fn append(&mut self, record: &ExpenseRecord) -> Result<()> {
        let new_file = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if new_file {
            wtr.write_record(["Data", "Categoria", "Valor", "Descrição"])?;
        }
        wtr.write_record([
            record
                .timestamp
                .format(ExpenseRecord::TIMESTAMP_FMT)
                .to_string()
                .as_str(),
            record.category.label(),
            format!("{:.2}", record.amount).as_str(),
            record.description.as_str(),
        ])?;
        wtr.flush()?;
        Ok(())
    }
}
