//! Employee model and related types.
//!
//! This module defines the [`Employee`] record, the closed [`Compensation`]
//! variants that drive salary computation, and the [`EmploymentType`] label
//! derived from them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};

/// Field separator of the persisted record format.
///
/// Text fields may not contain it because the format has no escaping.
pub const FIELD_DELIMITER: char = ',';

/// Upper bound accepted for any salary, rate, or hours figure.
///
/// Keeps every downstream product well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Salaried employment paid from an annual figure.
    FullTime,
    /// Hourly employment paid from a rate and monthly hours.
    PartTime,
}

impl EmploymentType {
    /// Returns the label used in the records file and in reports.
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmploymentType {
    type Err = PayrollError;

    /// Parses an employment type, ignoring case and the separator style.
    ///
    /// Accepts `Full-time`, `full_time`, `fulltime` and the part-time
    /// equivalents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "fulltime" => Ok(EmploymentType::FullTime),
            "parttime" => Ok(EmploymentType::PartTime),
            _ => Err(PayrollError::invalid_input(
                "employment_type",
                format!("expected Full-time or Part-time, got '{}'", s.trim()),
            )),
        }
    }
}

/// The pay arrangement of an employee, carrying the figures each one needs.
///
/// This is a closed set: salary, tax and persistence all match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "employment_type", rename_all = "snake_case")]
pub enum Compensation {
    /// Full-time salaried pay.
    FullTime {
        /// Gross salary per year.
        annual_salary: Decimal,
    },
    /// Part-time hourly pay.
    PartTime {
        /// Pay per hour worked.
        hourly_rate: Decimal,
        /// Hours worked in a month.
        hours_worked_per_month: Decimal,
    },
}

impl Compensation {
    /// Builds a full-time compensation, validating the salary.
    pub fn full_time(annual_salary: Decimal) -> PayrollResult<Self> {
        check_amount("annual_salary", annual_salary)?;
        Ok(Compensation::FullTime { annual_salary })
    }

    /// Builds a part-time compensation, validating rate and hours.
    pub fn part_time(hourly_rate: Decimal, hours_worked_per_month: Decimal) -> PayrollResult<Self> {
        check_amount("hourly_rate", hourly_rate)?;
        check_amount("hours_worked_per_month", hours_worked_per_month)?;
        Ok(Compensation::PartTime {
            hourly_rate,
            hours_worked_per_month,
        })
    }

    /// Returns the employment type this compensation represents.
    pub fn employment_type(&self) -> EmploymentType {
        match self {
            Compensation::FullTime { .. } => EmploymentType::FullTime,
            Compensation::PartTime { .. } => EmploymentType::PartTime,
        }
    }

    /// Computes the gross pay for one month.
    ///
    /// Full-time pay is `annual_salary / 12`, part-time pay is
    /// `hourly_rate * hours_worked_per_month`. No currency rounding is
    /// applied; a non-terminating quotient keeps 28 significant digits.
    pub fn monthly_salary(&self) -> Decimal {
        match self {
            Compensation::FullTime { annual_salary } => *annual_salary / Decimal::from(12),
            Compensation::PartTime {
                hourly_rate,
                hours_worked_per_month,
            } => *hourly_rate * *hours_worked_per_month,
        }
    }

    /// Checks the figures against the accepted range.
    pub fn validate(&self) -> PayrollResult<()> {
        match self {
            Compensation::FullTime { annual_salary } => check_amount("annual_salary", *annual_salary),
            Compensation::PartTime {
                hourly_rate,
                hours_worked_per_month,
            } => {
                check_amount("hourly_rate", *hourly_rate)?;
                check_amount("hours_worked_per_month", *hours_worked_per_month)
            }
        }
    }
}

/// The attributes that can be changed through [`Employee::update_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAttribute {
    /// The employee's name.
    Name,
    /// The employee's postal address.
    Address,
    /// Phone, email or similar contact text.
    ContactDetails,
    /// The employment classification.
    EmploymentType,
}

impl RecordAttribute {
    /// Looks up an attribute by its field name.
    ///
    /// Returns `None` for names that are not updatable.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "name" => Some(RecordAttribute::Name),
            "address" => Some(RecordAttribute::Address),
            "contact_details" => Some(RecordAttribute::ContactDetails),
            "employment_type" => Some(RecordAttribute::EmploymentType),
            _ => None,
        }
    }

    /// Returns the field name of this attribute.
    pub fn name(&self) -> &'static str {
        match self {
            RecordAttribute::Name => "name",
            RecordAttribute::Address => "address",
            RecordAttribute::ContactDetails => "contact_details",
            RecordAttribute::EmploymentType => "employment_type",
        }
    }
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    employee_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's postal address.
    pub address: String,
    /// Phone, email or similar contact text.
    pub contact_details: String,
    #[serde(flatten)]
    compensation: Compensation,
}

impl Employee {
    /// Creates an employee, validating every field.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is blank, a text field contains the
    /// record delimiter or a line break, or a figure is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_records::models::{Compensation, Employee, EmploymentType};
    /// use rust_decimal::Decimal;
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
    /// assert_eq!(employee.employment_type(), EmploymentType::FullTime);
    /// assert_eq!(employee.compute_monthly_salary(), Decimal::new(5000, 0));
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        contact_details: impl Into<String>,
        compensation: Compensation,
    ) -> PayrollResult<Self> {
        let employee = Self {
            employee_id: employee_id.into(),
            name: name.into(),
            address: address.into(),
            contact_details: contact_details.into(),
            compensation,
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Returns the immutable id that keys this record.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the current compensation.
    pub fn compensation(&self) -> &Compensation {
        &self.compensation
    }

    /// Returns the employment type, derived from the compensation.
    pub fn employment_type(&self) -> EmploymentType {
        self.compensation.employment_type()
    }

    /// Computes the gross pay for one month.
    pub fn compute_monthly_salary(&self) -> Decimal {
        self.compensation.monthly_salary()
    }

    /// Sets one attribute from a text value.
    ///
    /// Unrecognised attribute names are ignored. Changing `employment_type`
    /// to the current type is a no-op; changing it to the other type is
    /// rejected because the new variant's figures are needed, which
    /// [`Employee::reclassify`] takes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the value cannot be stored. The record is
    /// unchanged on error.
    pub fn update_record(&mut self, attribute: &str, new_value: &str) -> PayrollResult<()> {
        let Some(attribute) = RecordAttribute::from_name(attribute) else {
            debug!(
                employee_id = %self.employee_id,
                attribute = %attribute,
                "Ignoring update of unknown attribute"
            );
            return Ok(());
        };

        match attribute {
            RecordAttribute::Name => {
                check_text(attribute.name(), new_value)?;
                self.name = new_value.to_string();
            }
            RecordAttribute::Address => {
                check_text(attribute.name(), new_value)?;
                self.address = new_value.to_string();
            }
            RecordAttribute::ContactDetails => {
                check_text(attribute.name(), new_value)?;
                self.contact_details = new_value.to_string();
            }
            RecordAttribute::EmploymentType => {
                let requested: EmploymentType = new_value.parse()?;
                if requested != self.employment_type() {
                    let needed = match requested {
                        EmploymentType::FullTime => "annual_salary",
                        EmploymentType::PartTime => "hourly_rate and hours_worked_per_month",
                    };
                    return Err(PayrollError::invalid_input(
                        attribute.name(),
                        format!(
                            "changing to {} requires {}; reclassify the employee instead",
                            requested, needed
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Replaces the compensation, converting between employment types.
    pub fn reclassify(&mut self, compensation: Compensation) -> PayrollResult<()> {
        compensation.validate()?;
        self.compensation = compensation;
        Ok(())
    }

    /// Entity-level hook for deletion.
    ///
    /// Does nothing; removing a record is the store's job.
    pub fn delete_record(&self) {}

    /// Checks every field against the persisted format's constraints.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(PayrollError::invalid_input(
                "employee_id",
                "must not be blank",
            ));
        }
        check_text("employee_id", &self.employee_id)?;
        check_text("name", &self.name)?;
        check_text("address", &self.address)?;
        check_text("contact_details", &self.contact_details)?;
        self.compensation.validate()
    }
}

fn check_text(field: &str, value: &str) -> PayrollResult<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(PayrollError::invalid_input(
            field,
            format!("must not contain '{}'", FIELD_DELIMITER),
        ));
    }
    if value.contains(['\n', '\r']) {
        return Err(PayrollError::invalid_input(
            field,
            "must not contain line breaks",
        ));
    }
    Ok(())
}

fn check_amount(field: &str, value: Decimal) -> PayrollResult<()> {
    if value < Decimal::ZERO {
        return Err(PayrollError::invalid_input(field, "must not be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(PayrollError::invalid_input(
            field,
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}
