//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Loads and provides access to the payroll configuration.
///
/// # File Format
///
/// ```text
/// data_file: employees.txt
/// tax:
///   brackets:
///     - threshold: "50000"
///       rate: "0.05"
///   deductions:
///     std: "200"
/// ```
///
/// Every key is optional. A relative `data_file` is resolved against the
/// directory holding the configuration file.
///
/// # Example
///
/// ```no_run
/// use payroll_records::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./payroll.yaml")?;
/// println!("Records file: {}", loader.config().data_file.display());
/// # Ok::<(), payroll_records::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown value types (`ConfigParseError`)
    /// - The tax rules are not usable (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut config: PayrollConfig =
            serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        config.tax.validate()?;

        if config.data_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_file = dir.join(&config.data_file);
            }
        }

        info!(
            path = %path_str,
            data_file = %config.data_file.display(),
            brackets = config.tax.brackets.len(),
            deductions = config.tax.deductions.len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Loads from `path` if given, otherwise uses the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> PayrollResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::from_config(PayrollConfig::default())),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
