#![doc(test(attr(deny(warnings))))]

//! Expense Core loads a tabular expense ledger, aggregates spending by
//! category and month under optional filters, and feeds the results to
//! spreadsheet export, static charts and an interactive dashboard.

pub mod charts;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod export;
pub mod jobs;
pub mod ledger;
pub mod loader;
pub mod report;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug event.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Core tracing initialized.");
    });
}
