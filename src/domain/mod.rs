//! Core domain types and logic.

pub mod formula;
pub mod form;
pub mod calculator;
pub mod report;
pub mod instrument;
pub mod holding;
pub mod portfolio;
pub mod trade;
pub mod market;
pub mod order;
pub mod session;
pub mod snapshot;
pub mod config_validation;
pub mod error;
