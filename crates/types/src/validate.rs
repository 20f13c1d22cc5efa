//! Boundary validation for proposal input.
//!
//! The renderers and the composer trust their input; callers run
//! [`ProposalInput::validate`] before handing data to the pipeline.

use crate::model::{MonthKey, ProposalInput};
use std::fmt;
use thiserror::Error;

/// A single rule violated by the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("client name must not be empty")]
    EmptyClientName,
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum { field: String, min: f64, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
    #[error("monthly_production[{index}]: month must be between 1 and 12, got {month}")]
    MonthOutOfRange { index: usize, month: u8 },
    #[error("yearly_returns[{index}]: year must be between 1 and 25, got {year}")]
    YearOutOfRange { index: usize, year: u32 },
}

/// All violations found in one input, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn at_least(&mut self, field: impl Into<String>, value: f64, min: f64) {
        let field = field.into();
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite { field });
        } else if value < min {
            self.errors.push(ValidationError::BelowMinimum { field, min, value });
        }
    }

    fn finite(&mut self, field: impl Into<String>, value: f64) {
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite { field: field.into() });
        }
    }
}

impl ProposalInput {
    /// Checks every field against the input contract, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::default();

        if self.client.name.trim().is_empty() {
            check.errors.push(ValidationError::EmptyClientName);
        }

        let modules = &self.system.modules;
        check.at_least("system.modules.quantity", f64::from(modules.quantity), 1.0);
        check.at_least("system.modules.power_w", f64::from(modules.power_w), 1.0);

        let inverters = &self.system.inverters;
        check.at_least("system.inverters.quantity", f64::from(inverters.quantity), 1.0);
        check.at_least("system.inverters.power_kw", inverters.power_kw, 0.1);

        check.at_least("investment.kit_cost", self.investment.kit_cost, 0.0);
        check.at_least("investment.labor_cost", self.investment.labor_cost, 0.0);

        for (index, entry) in self.monthly_production.iter().enumerate() {
            if let MonthKey::Month(month) = entry.month {
                if !(1..=12).contains(&month) {
                    check.errors.push(ValidationError::MonthOutOfRange { index, month });
                }
            }
            check.at_least(
                format!("monthly_production[{}].generation_kwh", index),
                entry.generation_kwh,
                0.0,
            );
        }

        for (index, entry) in self.yearly_returns.iter().enumerate() {
            if !(1..=25).contains(&entry.year) {
                check.errors.push(ValidationError::YearOutOfRange { index, year: entry.year });
            }
            check.finite(format!("yearly_returns[{}].balance", index), entry.balance);
            check.at_least(
                format!("yearly_returns[{}].monthly_saving", index),
                entry.monthly_saving,
                0.0,
            );
            check.at_least(
                format!("yearly_returns[{}].annual_saving", index),
                entry.annual_saving,
                0.0,
            );
        }

        if check.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(check.errors))
        }
    }
}
