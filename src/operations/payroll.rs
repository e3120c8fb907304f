//! The payroll operations handle.
//!
//! [`Payroll`] owns the record store and the tax calculator. It is built once
//! at start-up and every operation goes through it.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::TaxCalculator;
use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Compensation, Employee, Report, ReportKind, ReportLine};
use crate::store::RecordStore;

use super::request::{CompensationRequest, NewEmployeeRequest};
use super::response::{Confirmation, EmployeeInformation};

/// Payroll state: the employee records and the tax rules applied to them.
///
/// # Example
///
/// ```no_run
/// use payroll_records::config::PayrollConfig;
/// use payroll_records::operations::{CompensationRequest, NewEmployeeRequest, Payroll};
///
/// let mut payroll = Payroll::open(&PayrollConfig::default())?;
/// let confirmation = payroll.add_employee(NewEmployeeRequest {
///     employee_id: "E1".to_string(),
///     name: "Ada Lovelace".to_string(),
///     address: "12 St James Square".to_string(),
///     contact_details: "ada@example.com".to_string(),
///     compensation: CompensationRequest::full_time("60000"),
/// })?;
/// println!("{}", confirmation);
/// println!("Tax Amount: ${}", payroll.compute_tax("E1")?);
/// # Ok::<(), payroll_records::error::PayrollError>(())
/// ```
#[derive(Debug)]
pub struct Payroll {
    store: RecordStore,
    calculator: TaxCalculator,
}

impl Payroll {
    /// Creates the handle from an opened store and a calculator.
    pub fn new(store: RecordStore, calculator: TaxCalculator) -> Self {
        Self { store, calculator }
    }

    /// Opens the records file and builds the calculator named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unusable tax rules, or the store's load
    /// errors (`Storage`, `MalformedRecord`).
    pub fn open(config: &PayrollConfig) -> PayrollResult<Self> {
        let calculator = TaxCalculator::from_rules(&config.tax)?;
        let store = RecordStore::open(&config.data_file)?;
        info!(
            data_file = %store.path().display(),
            employees = store.len(),
            "Payroll opened"
        );
        Ok(Self::new(store, calculator))
    }

    /// Returns the record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the tax calculator.
    pub fn calculator(&self) -> &TaxCalculator {
        &self.calculator
    }

    /// Validates and stores a new employee.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the request does not validate, `DuplicateId`
    /// if the id is taken, or `Storage` if the write fails. The store is
    /// unchanged on error.
    pub fn add_employee(&mut self, request: NewEmployeeRequest) -> PayrollResult<Confirmation> {
        let employee = Employee::try_from(request)?;
        let employee_id = employee.employee_id().to_string();
        self.store.add(employee)?;
        Ok(Confirmation::Added(employee_id))
    }

    /// Sets one attribute of an employee.
    ///
    /// Attribute names are `name`, `address`, `contact_details` and
    /// `employment_type`; any other name is accepted and ignored.
    pub fn update_employee_record(
        &mut self,
        employee_id: &str,
        attribute: &str,
        new_value: &str,
    ) -> PayrollResult<Confirmation> {
        self.store.update(employee_id, attribute, new_value)?;
        Ok(Confirmation::Updated(employee_id.to_string()))
    }

    /// Moves an employee to the employment type and figures in `request`.
    pub fn change_employment_type(
        &mut self,
        employee_id: &str,
        request: CompensationRequest,
    ) -> PayrollResult<Confirmation> {
        if self.store.find_by_id(employee_id).is_none() {
            return Err(not_found(employee_id));
        }
        let compensation = Compensation::try_from(request)?;
        self.store.reclassify(employee_id, compensation)?;
        Ok(Confirmation::Reclassified(employee_id.to_string()))
    }

    /// Removes an employee.
    pub fn delete_employee_record(&mut self, employee_id: &str) -> PayrollResult<Confirmation> {
        self.store.delete(employee_id)?;
        Ok(Confirmation::Deleted(employee_id.to_string()))
    }

    /// Computes an employee's monthly salary.
    pub fn compute_salary(&self, employee_id: &str) -> PayrollResult<Decimal> {
        Ok(self.employee(employee_id)?.compute_monthly_salary())
    }

    /// Computes an employee's tax under the configured rules.
    pub fn compute_tax(&self, employee_id: &str) -> PayrollResult<Decimal> {
        Ok(self.calculator.compute_tax(self.employee(employee_id)?))
    }

    /// Returns an employee's identity fields and monthly salary.
    pub fn view_employee_information(&self, employee_id: &str) -> PayrollResult<EmployeeInformation> {
        Ok(EmployeeInformation::from(self.employee(employee_id)?))
    }

    /// Generates a report from the last-saved records.
    ///
    /// The store is reloaded from its file first, so the report shows what
    /// is on disk.
    ///
    /// # Errors
    ///
    /// Returns the store's load errors if the file cannot be re-read.
    pub fn generate_report(&mut self, kind: ReportKind) -> PayrollResult<Report> {
        self.store.reload()?;

        let lines = self
            .store
            .employees()
            .iter()
            .map(|employee| ReportLine {
                employee_id: employee.employee_id().to_string(),
                name: employee.name.clone(),
                employment_type: employee.employment_type(),
                tax_amount: match kind {
                    ReportKind::EmployeeList => None,
                    ReportKind::TaxReport => Some(self.calculator.compute_tax(employee)),
                },
            })
            .collect::<Vec<_>>();

        info!(kind = ?kind, employees = lines.len(), "Report generated");

        Ok(Report {
            kind,
            generated_at: Utc::now(),
            lines,
        })
    }

    fn employee(&self, employee_id: &str) -> PayrollResult<&Employee> {
        self.store
            .find_by_id(employee_id)
            .ok_or_else(|| not_found(employee_id))
    }
}

fn not_found(employee_id: &str) -> PayrollError {
    PayrollError::EmployeeNotFound {
        id: employee_id.to_string(),
    }
}
