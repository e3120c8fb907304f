//! Calculation logic for the payroll record keeper.
//!
//! Monthly salary lives on the employee model; this module turns it into a
//! tax liability under configurable bracket rules and deductions.

mod tax;

pub use tax::{MONTHS_PER_YEAR, TaxBreakdown, TaxCalculator, base_tax_rate};
