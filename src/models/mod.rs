//! Core data models for the payroll record keeper.
//!
//! This module contains the domain models used throughout the crate.

mod employee;
mod report;

pub use employee::{
    Compensation, Employee, EmploymentType, FIELD_DELIMITER, MAX_AMOUNT, RecordAttribute,
};
pub use report::{Report, ReportKind, ReportLine, format_amount};
