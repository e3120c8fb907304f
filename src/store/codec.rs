//! Line codec for the employee records file.
//!
//! One record per line, fields separated by [`FIELD_DELIMITER`]:
//!
//! ```text
//! id,name,address,contact,Full-time,annual_salary
//! id,name,address,contact,Part-time,hourly_rate,hours_worked_per_month
//! ```
//!
//! There is no escaping, so text fields never contain the delimiter; the
//! model rejects such values before they reach the codec.

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Compensation, Employee, EmploymentType, FIELD_DELIMITER};

const SHARED_FIELDS: usize = 5;

/// Encodes one employee as a record line, without the line terminator.
pub fn encode_record(employee: &Employee) -> String {
    let mut fields = vec![
        employee.employee_id().to_string(),
        employee.name.clone(),
        employee.address.clone(),
        employee.contact_details.clone(),
        employee.employment_type().label().to_string(),
    ];

    match employee.compensation() {
        Compensation::FullTime { annual_salary } => {
            fields.push(annual_salary.to_string());
        }
        Compensation::PartTime {
            hourly_rate,
            hours_worked_per_month,
        } => {
            fields.push(hourly_rate.to_string());
            fields.push(hours_worked_per_month.to_string());
        }
    }

    fields.join(&FIELD_DELIMITER.to_string())
}

/// Encodes every employee, one terminated line each, in order.
pub fn encode_records(employees: &[Employee]) -> String {
    let mut out = String::new();
    for employee in employees {
        out.push_str(&encode_record(employee));
        out.push('\n');
    }
    out
}

/// Decodes a single record line.
///
/// `line_number` is one-based and only used in error messages.
///
/// # Errors
///
/// Returns `MalformedRecord` if the field count does not match the
/// employment type, the type is unknown, a number does not parse, or the
/// values fail the model's validation.
pub fn decode_record(line: &str, line_number: usize) -> PayrollResult<Employee> {
    let malformed = |message: String| PayrollError::MalformedRecord {
        line: line_number,
        message,
    };

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < SHARED_FIELDS {
        return Err(malformed(format!(
            "expected at least {} fields, found {}",
            SHARED_FIELDS,
            fields.len()
        )));
    }

    let employment_type = EmploymentType::from_str(fields[4])
        .map_err(|_| malformed(format!("unknown employment type '{}'", fields[4])))?;

    let expected = match employment_type {
        EmploymentType::FullTime => SHARED_FIELDS + 1,
        EmploymentType::PartTime => SHARED_FIELDS + 2,
    };
    if fields.len() != expected {
        return Err(malformed(format!(
            "expected {} fields for a {} record, found {}",
            expected,
            employment_type,
            fields.len()
        )));
    }

    let number = |index: usize, name: &str| {
        Decimal::from_str(fields[index])
            .map_err(|e| malformed(format!("{} '{}' is not a number: {}", name, fields[index], e)))
    };

    let compensation = match employment_type {
        EmploymentType::FullTime => Compensation::FullTime {
            annual_salary: number(5, "annual_salary")?,
        },
        EmploymentType::PartTime => Compensation::PartTime {
            hourly_rate: number(5, "hourly_rate")?,
            hours_worked_per_month: number(6, "hours_worked_per_month")?,
        },
    };

    Employee::new(fields[0], fields[1], fields[2], fields[3], compensation)
        .map_err(|e| malformed(e.to_string()))
}

/// Decodes a whole records file.
///
/// Blank lines are skipped. The first bad line fails the whole decode so a
/// damaged file is never half-loaded.
///
/// # Errors
///
/// Returns `MalformedRecord` for any undecodable line or for an id that
/// appears twice.
pub fn decode_records(content: &str) -> PayrollResult<Vec<Employee>> {
    let mut employees = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let employee = decode_record(line, line_number)?;
        if !seen.insert(employee.employee_id().to_string()) {
            return Err(PayrollError::MalformedRecord {
                line: line_number,
                message: format!("duplicate employee id '{}'", employee.employee_id()),
            });
        }
        employees.push(employee);
    }

    Ok(employees)
}
