//! Interactive dashboard: a line-oriented shell over one loaded ledger with
//! category/month filters, tabular views, chart rendering and xlsx export.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
mod shell;
pub mod table;

pub use shell::{run_dashboard, SCRIPT_ENV};
