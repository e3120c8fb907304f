//! Configuration loading and management for the payroll record keeper.
//!
//! This module loads the records file location and the tax rules
//! (bracket rules and deductions) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_records::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./payroll.yaml").unwrap();
//! println!("Brackets: {}", config.config().tax.brackets.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BracketRule, DEFAULT_DATA_FILE, PayrollConfig, TaxRules};
