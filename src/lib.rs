//! Payroll record keeper.
//!
//! This crate stores employee records in a flat text file, computes monthly
//! salary and a simplified tax per employee, and exposes the add, update,
//! delete, view and report operations a front end needs.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod store;
