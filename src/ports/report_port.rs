//! Export port for tabular results.

use crate::domain::error::FincalcError;
use crate::domain::formula::loan::AmortizationSchedule;
use crate::domain::holding::Transaction;

pub trait ReportPort {
    fn write_schedule(&self, schedule: &AmortizationSchedule, output_path: &str) -> Result<(), FincalcError>;

    fn write_ledger(&self, transactions: &[Transaction], output_path: &str) -> Result<(), FincalcError>;
}
