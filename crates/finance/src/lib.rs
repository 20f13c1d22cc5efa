//! Financial derivation and pt-BR formatting for proposals.
//!
//! Both halves are pure: no I/O, no shared state.

pub mod derive;
pub mod format;

pub use derive::{DerivedSummary, Payback, derive_summary, economy_over_horizon, find_payback};
pub use format::{format_currency, format_kwh, format_number};
