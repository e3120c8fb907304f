//! Operations layer for the payroll record keeper.
//!
//! This module provides the add/update/delete/compute/view/report operations
//! a front end calls, composed from the model, the tax calculator and the
//! record store.

mod payroll;
mod request;
mod response;

pub use payroll::Payroll;
pub use request::{CompensationRequest, NewEmployeeRequest, parse_amount};
pub use response::{Confirmation, EmployeeInformation};
