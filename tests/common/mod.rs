#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fincalc::domain::error::FincalcError;
use fincalc::domain::instrument::Instrument;
use fincalc::domain::market::Market;
use fincalc::ports::snapshot_port::SnapshotPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

#[derive(Default)]
pub struct MemorySnapshotStore {
    pub blobs: RefCell<HashMap<String, String>>,
}

impl SnapshotPort for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, FincalcError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), FincalcError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

pub fn sample_market() -> Market {
    Market::new(vec![
        Instrument::stock("AAPL", "Apple Inc.", 190.0),
        Instrument::stock("MSFT", "Microsoft", 410.0),
        Instrument::crypto("BTC", "Bitcoin", 60_000.0),
        Instrument::crypto("DOGE", "Dogecoin", 0.02),
    ])
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// ExitCode has no PartialEq, so compare through its Debug form.
pub fn same_code(actual: ExitCode, expected: u8) -> bool {
    format!("{actual:?}") == format!("{:?}", ExitCode::from(expected))
}
