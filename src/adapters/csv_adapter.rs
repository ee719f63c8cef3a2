//! CSV export adapter for amortization schedules and trade ledgers.

use crate::domain::error::FincalcError;
use crate::domain::formula::loan::AmortizationSchedule;
use crate::domain::holding::Transaction;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::path::Path;

pub struct CsvReportAdapter;

#[derive(Serialize)]
struct LedgerRow<'a> {
    id: u64,
    date: String,
    side: String,
    symbol: &'a str,
    quantity: f64,
    price: f64,
    value: f64,
}

fn export_error(path: &str, e: impl std::fmt::Display) -> FincalcError {
    FincalcError::Export {
        reason: format!("failed to write {}: {}", path, e),
    }
}

fn write_rows<T, I>(output_path: &str, rows: I) -> Result<(), FincalcError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(Path::new(output_path))
        .map_err(|e| export_error(output_path, e))?;
    let mut count = 0usize;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| export_error(output_path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| export_error(output_path, e))?;
    log::debug!("wrote {} rows to {}", count, output_path);
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write_schedule(
        &self,
        schedule: &AmortizationSchedule,
        output_path: &str,
    ) -> Result<(), FincalcError> {
        write_rows(output_path, &schedule.rows)
    }

    fn write_ledger(
        &self,
        transactions: &[Transaction],
        output_path: &str,
    ) -> Result<(), FincalcError> {
        // A header-only file still documents the columns when nothing traded.
        if transactions.is_empty() {
            return std::fs::write(
                output_path,
                "id,date,side,symbol,quantity,price,value\n",
            )
            .map_err(|e| export_error(output_path, e));
        }
        write_rows(
            output_path,
            transactions.iter().map(|tx| LedgerRow {
                id: tx.id,
                date: tx.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                side: tx.side.to_string(),
                symbol: &tx.symbol,
                quantity: tx.quantity,
                price: tx.price,
                value: tx.value(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formula::loan::{amortization_schedule, LoanTerms};
    use crate::domain::holding::TradeSide;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn schedule_has_header_and_one_row_per_period() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schedule.csv");
        let schedule = amortization_schedule(&LoanTerms::new(1_200.0, 0.0, 12.0));

        CsvReportAdapter
            .write_schedule(&schedule, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "period,payment,interest,principal,balance");
        assert_eq!(lines.len(), 13);
        assert!(lines[12].starts_with("12,"));
    }

    #[test]
    fn ledger_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 3)
            .unwrap();
        let txs = vec![Transaction {
            id: 1,
            side: TradeSide::Buy,
            symbol: "AAPL".into(),
            quantity: 2.0,
            price: 150.0,
            date,
        }];

        CsvReportAdapter
            .write_ledger(&txs, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "id,date,side,symbol,quantity,price,value");
        assert_eq!(lines[1], "1,2024-03-01 09:30:03,BUY,AAPL,2.0,150.0,300.0");
    }

    #[test]
    fn empty_ledger_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        CsvReportAdapter.write_ledger(&[], path.to_str().unwrap()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,date,side,symbol,quantity,price,value\n"
        );
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let err = CsvReportAdapter
            .write_ledger(&[], "/nonexistent/dir/ledger.csv")
            .unwrap_err();
        assert!(matches!(err, FincalcError::Export { .. }));
    }
}
