//! Tax calculation functionality.
//!
//! This module computes an employee's tax from their annual income using a
//! flat base rate per employment type, cumulative bracket surcharges, and
//! fixed deductions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxRules;
use crate::error::PayrollResult;
use crate::models::{Employee, EmploymentType};

/// Months in a pay year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Returns the flat rate charged on all income for an employment type.
///
/// Full-time income is taxed at 15%, part-time income at 20%.
pub fn base_tax_rate(employment_type: EmploymentType) -> Decimal {
    match employment_type {
        EmploymentType::FullTime => Decimal::new(15, 2),
        EmploymentType::PartTime => Decimal::new(20, 2),
    }
}

/// Every stage of a tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Monthly salary times twelve.
    pub taxable_income: Decimal,
    /// The flat rate for the employee's type.
    pub base_rate: Decimal,
    /// `taxable_income * base_rate`.
    pub base_tax: Decimal,
    /// Sum of the surcharges from every exceeded bracket.
    pub bracket_tax: Decimal,
    /// Sum of every deduction.
    pub deductions: Decimal,
    /// Final tax, never negative.
    pub tax: Decimal,
}

/// Computes tax from configured bracket rules and deductions.
///
/// Brackets are held in ascending threshold order. Each bracket the income
/// exceeds adds `(income - threshold) * rate` on top of the base tax; the
/// surcharges are cumulative, so income above two thresholds pays both
/// surcharges on its full excess over each.
///
/// # Examples
///
/// ```
/// use payroll_records::calculation::TaxCalculator;
/// use payroll_records::models::{Compensation, Employee};
/// use rust_decimal::Decimal;
///
/// let calculator = TaxCalculator::new()
///     .with_bracket(Decimal::new(50000, 0), Decimal::new(5, 2))
///     .with_deduction("std", Decimal::new(200, 0));
///
/// let employee = Employee::new(
///     "E1",
///     "Ada Lovelace",
///     "12 St James Square",
///     "ada@example.com",
///     Compensation::full_time(Decimal::new(60000, 0)).unwrap(),
/// )
/// .unwrap();
///
/// // 9000 base + 500 bracket - 200 deduction
/// assert_eq!(calculator.compute_tax(&employee), Decimal::new(9300, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxCalculator {
    brackets: BTreeMap<Decimal, Decimal>,
    deductions: BTreeMap<String, Decimal>,
}

impl TaxCalculator {
    /// Creates a calculator with no brackets and no deductions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a calculator from configured rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rules fail [`TaxRules::validate`].
    pub fn from_rules(rules: &TaxRules) -> PayrollResult<Self> {
        rules.validate()?;
        let brackets = rules
            .brackets
            .iter()
            .map(|b| (b.threshold, b.rate))
            .collect();
        Ok(Self {
            brackets,
            deductions: rules.deductions.clone(),
        })
    }

    /// Adds a bracket rule, replacing any rule at the same threshold.
    pub fn with_bracket(mut self, threshold: Decimal, rate: Decimal) -> Self {
        self.brackets.insert(threshold, rate);
        self
    }

    /// Adds a named deduction, replacing any with the same name.
    pub fn with_deduction(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.deductions.insert(name.into(), amount);
        self
    }

    /// Returns the bracket rules in ascending threshold order.
    pub fn brackets(&self) -> &BTreeMap<Decimal, Decimal> {
        &self.brackets
    }

    /// Returns the deductions by name.
    pub fn deductions(&self) -> &BTreeMap<String, Decimal> {
        &self.deductions
    }

    /// Computes the tax owed by an employee.
    pub fn compute_tax(&self, employee: &Employee) -> Decimal {
        self.breakdown(employee).tax
    }

    /// Computes the tax owed by an employee, keeping every stage.
    ///
    /// Arithmetic saturates at the `Decimal` bounds, so rules added through
    /// the builders without validation still yield a result.
    pub fn breakdown(&self, employee: &Employee) -> TaxBreakdown {
        let base_rate = base_tax_rate(employee.employment_type());
        let taxable_income = employee
            .compute_monthly_salary()
            .saturating_mul(Decimal::from(MONTHS_PER_YEAR));
        let base_tax = taxable_income.saturating_mul(base_rate);

        let bracket_tax = self
            .brackets
            .iter()
            .filter(|(threshold, _)| taxable_income > **threshold)
            .map(|(threshold, rate)| taxable_income.saturating_sub(*threshold).saturating_mul(*rate))
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let deductions = self
            .deductions
            .values()
            .copied()
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let tax = base_tax
            .saturating_add(bracket_tax)
            .saturating_sub(deductions)
            .max(Decimal::ZERO);

        TaxBreakdown {
            taxable_income,
            base_rate,
            base_tax,
            bracket_tax,
            deductions,
            tax,
        }
    }
}
