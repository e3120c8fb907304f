//! The employee record store.
//!
//! [`RecordStore`] keeps the employee list in memory in file order and writes
//! the whole list back to its records file after every mutation.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Compensation, Employee};

use super::codec::{decode_records, encode_records};

/// Reads every record from `path`.
///
/// A missing file is an empty store, not an error.
///
/// # Errors
///
/// Returns `Storage` if the file exists but cannot be read, and
/// `MalformedRecord` if it is not UTF-8 or any line fails to decode.
pub fn load_records(path: &Path) -> PayrollResult<Vec<Employee>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Records file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PayrollError::Storage {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let content = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        PayrollError::MalformedRecord {
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            message: "record is not valid UTF-8".to_string(),
        }
    })?;

    let employees = decode_records(&content)?;
    debug!(path = %path.display(), count = employees.len(), "Loaded employee records");
    Ok(employees)
}

/// Replaces the contents of `path` with `employees`.
///
/// The records are written to a sibling temp file, synced, and renamed over
/// the target, so an interrupted save leaves the previous file intact.
///
/// # Errors
///
/// Returns `Storage` if any step of the write fails.
pub fn save_records(path: &Path, employees: &[Employee]) -> PayrollResult<()> {
    atomic_write(path, encode_records(employees).as_bytes()).map_err(|source| {
        PayrollError::Storage {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), count = employees.len(), "Saved employee records");
    Ok(())
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| io::Error::other("records path has no file name"))?;
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// In-memory employee list backed by a records file.
///
/// Ids are unique within a store. Every mutation is persisted before it
/// returns; if the write fails the in-memory change is undone and the
/// storage error is returned.
///
/// # Example
///
/// ```no_run
/// use payroll_records::models::{Compensation, Employee};
/// use payroll_records::store::RecordStore;
/// use rust_decimal::Decimal;
///
/// let mut store = RecordStore::open("employees.txt")?;
/// let employee = Employee::new(
///     "E1",
///     "Ada Lovelace",
///     "12 St James Square",
///     "ada@example.com",
///     Compensation::full_time(Decimal::new(60000, 0))?,
/// )?;
/// store.add(employee)?;
/// assert!(store.find_by_id("E1").is_some());
/// # Ok::<(), payroll_records::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    employees: Vec<Employee>,
}

impl RecordStore {
    /// Opens the store backed by `path`, loading whatever it holds.
    pub fn open<P: Into<PathBuf>>(path: P) -> PayrollResult<Self> {
        let path = path.into();
        let employees = load_records(&path)?;
        Ok(Self { path, employees })
    }

    /// Returns the records file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the employees in record order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the store holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Re-reads the records file, discarding the in-memory list.
    ///
    /// On error the in-memory list is left as it was.
    pub fn reload(&mut self) -> PayrollResult<()> {
        self.employees = load_records(&self.path)?;
        Ok(())
    }

    /// Writes the current list to the records file.
    pub fn save(&self) -> PayrollResult<()> {
        save_records(&self.path, &self.employees)
    }

    /// Finds an employee by id.
    pub fn find_by_id(&self, employee_id: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.employee_id() == employee_id)
    }

    /// Appends an employee and persists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a field cannot be persisted, `DuplicateId`
    /// if the id is taken, or `Storage` if the write fails.
    pub fn add(&mut self, employee: Employee) -> PayrollResult<()> {
        employee.validate()?;
        let employee_id = employee.employee_id().to_string();
        if self.find_by_id(&employee_id).is_some() {
            return Err(PayrollError::DuplicateId { id: employee_id });
        }

        let employment_type = employee.employment_type();
        self.employees.push(employee);
        if let Err(err) = self.save() {
            self.employees.pop();
            warn!(employee_id = %employee_id, error = %err, "Rolled back add after failed save");
            return Err(err);
        }

        info!(
            employee_id = %employee_id,
            employment_type = %employment_type,
            "Employee added"
        );
        Ok(())
    }

    /// Updates one attribute of an employee and persists.
    ///
    /// Follows [`Employee::update_record`]: unknown attributes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee has the id, `InvalidInput`
    /// if the value is rejected, or `Storage` if the write fails.
    pub fn update(&mut self, employee_id: &str, attribute: &str, new_value: &str) -> PayrollResult<()> {
        self.mutate(employee_id, |employee| {
            employee.update_record(attribute, new_value)
        })?;
        info!(employee_id = %employee_id, attribute = %attribute, "Employee record updated");
        Ok(())
    }

    /// Converts an employee to a new compensation and persists.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee has the id, `InvalidInput`
    /// if the figures are out of range, or `Storage` if the write fails.
    pub fn reclassify(&mut self, employee_id: &str, compensation: Compensation) -> PayrollResult<()> {
        let employment_type = compensation.employment_type();
        self.mutate(employee_id, |employee| employee.reclassify(compensation))?;
        info!(
            employee_id = %employee_id,
            employment_type = %employment_type,
            "Employee reclassified"
        );
        Ok(())
    }

    /// Removes an employee and persists, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee has the id (the store is
    /// unchanged), or `Storage` if the write fails.
    pub fn delete(&mut self, employee_id: &str) -> PayrollResult<Employee> {
        let index = self.position(employee_id)?;
        let removed = self.employees.remove(index);
        removed.delete_record();

        if let Err(err) = self.save() {
            self.employees.insert(index, removed);
            warn!(employee_id = %employee_id, error = %err, "Rolled back delete after failed save");
            return Err(err);
        }

        info!(employee_id = %employee_id, "Employee deleted");
        Ok(removed)
    }

    fn position(&self, employee_id: &str) -> PayrollResult<usize> {
        self.employees
            .iter()
            .position(|e| e.employee_id() == employee_id)
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                id: employee_id.to_string(),
            })
    }

    fn mutate<F>(&mut self, employee_id: &str, change: F) -> PayrollResult<()>
    where
        F: FnOnce(&mut Employee) -> PayrollResult<()>,
    {
        let index = self.position(employee_id)?;
        let previous = self.employees[index].clone();

        change(&mut self.employees[index])?;

        if let Err(err) = self.save() {
            self.employees[index] = previous;
            warn!(employee_id = %employee_id, error = %err, "Rolled back update after failed save");
            return Err(err);
        }
        Ok(())
    }
}
