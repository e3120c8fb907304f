//! Configuration types for the payroll record keeper.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::MAX_AMOUNT;

/// The records file used when no configuration says otherwise.
pub const DEFAULT_DATA_FILE: &str = "employees.txt";

/// A single bracket rule: tax owed at `rate` on income above `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRule {
    /// Annual income above which the rule applies.
    pub threshold: Decimal,
    /// Rate applied to the income above the threshold.
    pub rate: Decimal,
}

/// Bracket rules and deductions for the tax calculator.
///
/// Both default to empty, which leaves only the flat base rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    /// Bracket rules, in any order.
    pub brackets: Vec<BracketRule>,
    /// Fixed amounts subtracted from the computed tax, keyed by name.
    pub deductions: BTreeMap<String, Decimal>,
}

impl TaxRules {
    /// Checks that the rules describe a usable calculator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a threshold or deduction is negative, a
    /// deduction exceeds [`MAX_AMOUNT`], a rate lies outside `0..=1`, or two
    /// brackets share a threshold.
    pub fn validate(&self) -> PayrollResult<()> {
        let mut seen = BTreeSet::new();
        for bracket in &self.brackets {
            if bracket.threshold < Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket threshold {} is negative",
                    bracket.threshold
                )));
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket rate {} at threshold {} is outside 0..=1",
                    bracket.rate, bracket.threshold
                )));
            }
            if !seen.insert(bracket.threshold.normalize()) {
                return Err(invalid(format!(
                    "duplicate bracket threshold {}",
                    bracket.threshold
                )));
            }
        }

        for (name, amount) in &self.deductions {
            if *amount < Decimal::ZERO {
                return Err(invalid(format!("deduction '{}' is negative", name)));
            }
            if *amount > MAX_AMOUNT {
                return Err(invalid(format!(
                    "deduction '{}' exceeds {}",
                    name, MAX_AMOUNT
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> PayrollError {
    PayrollError::InvalidConfig { message }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Path of the employee records file.
    pub data_file: PathBuf,
    /// Tax bracket rules and deductions.
    pub tax: TaxRules,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            tax: TaxRules::default(),
        }
    }
}
