//! Report models.
//!
//! A [`Report`] is a snapshot of the persisted employee list, optionally with
//! each employee's tax, stamped with the time it was generated.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmploymentType;

/// Formats an amount in dollars, rounded to cents for display only.
///
/// Trailing zeros are dropped, so `7500.00` prints as `$7500`.
pub fn format_amount(amount: Decimal) -> String {
    format!("${}", amount.round_dp(2).normalize())
}

/// The kinds of report the operations layer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Every employee with their employment type.
    EmployeeList,
    /// Every employee with their computed tax.
    TaxReport,
}

impl ReportKind {
    /// Returns the heading printed above the report lines.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::EmployeeList => "Employee List",
            ReportKind::TaxReport => "Tax Report",
        }
    }
}

/// One employee's row in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's employment type.
    pub employment_type: EmploymentType,
    /// The computed tax, present on tax reports only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
}

/// A generated report, one line per employee in record order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Which report this is.
    pub kind: ReportKind,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The report rows.
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Sums the tax column. Zero for an employee list.
    pub fn total_tax(&self) -> Decimal {
        self.lines.iter().filter_map(|line| line.tax_amount).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.kind.title())?;
        for line in &self.lines {
            match line.tax_amount {
                Some(tax) => writeln!(
                    f,
                    "{} ({}) - Tax Amount: {}",
                    line.name,
                    line.employee_id,
                    format_amount(tax)
                )?,
                None => writeln!(
                    f,
                    "{} ({}) - {}",
                    line.name, line.employee_id, line.employment_type
                )?,
            }
        }
        Ok(())
    }
}
