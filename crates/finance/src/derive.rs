//! Summary figures derived from the yearly return schedule.

use serde::{Serialize, Serializer};
use sunquote_types::{Investment, YearlyReturn};

/// The first year whose cumulative balance turns positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payback {
    pub year: u32,
    /// Cumulative balance at `year`; always strictly positive.
    pub value: f64,
}

/// Figures the proposal narrative is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedSummary {
    pub investment_total: f64,
    /// Absent when no year of the schedule reaches a positive balance.
    pub payback: Option<Payback>,
    /// Balance of the last schedule entry, or zero for an empty schedule.
    pub economy_25_years: f64,
}

impl DerivedSummary {
    pub fn payback_year(&self) -> Option<u32> {
        self.payback.map(|p| p.year)
    }

    pub fn payback_value(&self) -> Option<f64> {
        self.payback.map(|p| p.value)
    }
}

/// Flat record form, with nulls for an absent payback.
#[derive(Serialize)]
struct SummaryRecord {
    investment_total: f64,
    payback_year: Option<u32>,
    payback_value: Option<f64>,
    economy_25_years: f64,
}

impl Serialize for DerivedSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SummaryRecord {
            investment_total: self.investment_total,
            payback_year: self.payback_year(),
            payback_value: self.payback_value(),
            economy_25_years: self.economy_25_years,
        }
        .serialize(serializer)
    }
}

/// Finds the payback entry: the earliest one, in the given order, whose
/// balance is strictly positive.
pub fn find_payback(returns: &[YearlyReturn]) -> Option<Payback> {
    returns
        .iter()
        .find(|r| r.balance > 0.0)
        .map(|r| Payback { year: r.year, value: r.balance })
}

/// The accumulated economy reported for the 25-year horizon.
///
/// This is the balance of the last entry as supplied, whatever year it
/// covers.
pub fn economy_over_horizon(returns: &[YearlyReturn]) -> f64 {
    returns.last().map_or(0.0, |r| r.balance)
}

/// Computes the summary for one proposal. Pure and deterministic.
pub fn derive_summary(investment: &Investment, returns: &[YearlyReturn]) -> DerivedSummary {
    let summary = DerivedSummary {
        investment_total: investment.total(),
        payback: find_payback(returns),
        economy_25_years: economy_over_horizon(returns),
    };
    log::debug!(
        "Derived summary over {} year(s): total={:.2}, payback={:?}, economy={:.2}",
        returns.len(),
        summary.investment_total,
        summary.payback_year(),
        summary.economy_25_years
    );
    summary
}
