//! Response types for the operations layer.
//!
//! Each type renders, through `Display`, the message a user sees.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, EmploymentType, format_amount};

/// Acknowledgement of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "employee_id", rename_all = "snake_case")]
pub enum Confirmation {
    /// A new employee was stored.
    Added(String),
    /// An attribute of an employee was updated.
    Updated(String),
    /// An employee was moved to a different employment type.
    Reclassified(String),
    /// An employee was removed.
    Deleted(String),
}

impl Confirmation {
    /// Returns the id of the affected employee.
    pub fn employee_id(&self) -> &str {
        match self {
            Confirmation::Added(id)
            | Confirmation::Updated(id)
            | Confirmation::Reclassified(id)
            | Confirmation::Deleted(id) => id,
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confirmation::Added(_) => "Employee Added Successfully!",
            Confirmation::Updated(_) => "Employee Record Updated Successfully!",
            Confirmation::Reclassified(_) => "Employment Type Changed Successfully!",
            Confirmation::Deleted(_) => "Employee Record Deleted Successfully!",
        })
    }
}

/// Identity fields of an employee together with their monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInformation {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's postal address.
    pub address: String,
    /// Phone, email or similar contact text.
    pub contact_details: String,
    /// The employee's employment type.
    pub employment_type: EmploymentType,
    /// Gross pay for one month.
    pub monthly_salary: Decimal,
}

impl From<&Employee> for EmployeeInformation {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id().to_string(),
            name: employee.name.clone(),
            address: employee.address.clone(),
            contact_details: employee.contact_details.clone(),
            employment_type: employee.employment_type(),
            monthly_salary: employee.compute_monthly_salary(),
        }
    }
}

impl fmt::Display for EmployeeInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Employee Information:")?;
        writeln!(f, "ID: {}", self.employee_id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Contact Details: {}", self.contact_details)?;
        writeln!(f, "Employment Type: {}", self.employment_type)?;
        write!(f, "Monthly Salary: {}", format_amount(self.monthly_salary))
    }
}
