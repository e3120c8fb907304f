//! Request types for the operations layer.
//!
//! Requests carry values exactly as a user typed them. Converting a request
//! into a domain type parses and validates every field, so a rejected request
//! never reaches the store.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Compensation, Employee, EmploymentType};

/// Compensation figures as entered by a user.
///
/// Only the figures for the chosen employment type are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationRequest {
    /// `Full-time` or `Part-time`, in any common spelling.
    pub employment_type: String,
    /// Annual salary, required for full-time.
    #[serde(default)]
    pub annual_salary: Option<String>,
    /// Hourly rate, required for part-time.
    #[serde(default)]
    pub hourly_rate: Option<String>,
    /// Hours per month, required for part-time.
    #[serde(default)]
    pub hours_worked_per_month: Option<String>,
}

impl CompensationRequest {
    /// Builds a full-time request.
    pub fn full_time(annual_salary: impl Into<String>) -> Self {
        Self {
            employment_type: EmploymentType::FullTime.label().to_string(),
            annual_salary: Some(annual_salary.into()),
            ..Self::default()
        }
    }

    /// Builds a part-time request.
    pub fn part_time(
        hourly_rate: impl Into<String>,
        hours_worked_per_month: impl Into<String>,
    ) -> Self {
        Self {
            employment_type: EmploymentType::PartTime.label().to_string(),
            hourly_rate: Some(hourly_rate.into()),
            hours_worked_per_month: Some(hours_worked_per_month.into()),
            ..Self::default()
        }
    }
}

impl TryFrom<CompensationRequest> for Compensation {
    type Error = PayrollError;

    fn try_from(request: CompensationRequest) -> PayrollResult<Self> {
        match request.employment_type.parse::<EmploymentType>()? {
            EmploymentType::FullTime => Compensation::full_time(parse_amount(
                "annual_salary",
                request.annual_salary.as_deref(),
            )?),
            EmploymentType::PartTime => Compensation::part_time(
                parse_amount("hourly_rate", request.hourly_rate.as_deref())?,
                parse_amount(
                    "hours_worked_per_month",
                    request.hours_worked_per_month.as_deref(),
                )?,
            ),
        }
    }
}

/// A new employee as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployeeRequest {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's postal address.
    pub address: String,
    /// Phone, email or similar contact text.
    pub contact_details: String,
    /// Employment type and its figures.
    #[serde(flatten)]
    pub compensation: CompensationRequest,
}

impl TryFrom<NewEmployeeRequest> for Employee {
    type Error = PayrollError;

    fn try_from(request: NewEmployeeRequest) -> PayrollResult<Self> {
        let compensation = Compensation::try_from(request.compensation)?;
        Employee::new(
            request.employee_id.trim(),
            request.name,
            request.address,
            request.contact_details,
            compensation,
        )
    }
}

/// Parses a user-entered decimal amount.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` if the value is missing, blank, or
/// not a decimal number.
pub fn parse_amount(field: &str, value: Option<&str>) -> PayrollResult<Decimal> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(PayrollError::invalid_input(field, "is required"));
    }
    Decimal::from_str(value)
        .map_err(|_| PayrollError::invalid_input(field, format!("'{}' is not a number", value)))
}
