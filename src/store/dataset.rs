//! JSON dataset file: import and export of a whole store snapshot.

use crate::errors::{AppError, AppResult};
use crate::models::timesheet::validate_hours;
use crate::models::{Client, Employee, Invoice, Timesheet};
use crate::store::seed;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub timesheets: Vec<Timesheet>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

impl Dataset {
    /// Load the dataset at `path`, or the built-in sample data when the file is missing.
    pub fn load_or_sample(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::info!(
                "dataset {} not found, using sample data",
                path.display()
            );
            return Ok(seed::sample_dataset());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let ds: Dataset = serde_json::from_str(&content)?;
        ds.validate()?;
        log::debug!(
            "loaded dataset {}: {} clients, {} employees, {} timesheets, {} invoices",
            path.display(),
            ds.clients.len(),
            ds.employees.len(),
            ds.timesheets.len(),
            ds.invoices.len()
        );
        Ok(ds)
    }

    /// Rates and hours must be finite and non-negative.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(emp) = self
            .employees
            .iter()
            .find(|e| !e.rate.is_finite() || e.rate < 0.0)
        {
            return Err(AppError::InvalidParameter(format!(
                "employee {} has an invalid rate {}",
                emp.id, emp.rate
            )));
        }
        for ts in &self.timesheets {
            validate_hours(ts.hours)?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("dataset.json");

        let sample = seed::sample_dataset();
        sample.save(&path).unwrap();

        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn negative_rates_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");

        let mut ds = seed::sample_dataset();
        ds.employees[2].rate = -45.0;
        ds.save(&path).unwrap();

        assert!(matches!(
            Dataset::load(&path),
            Err(AppError::InvalidParameter(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::load_or_sample(&dir.path().join("nope.json")).unwrap();
        assert_eq!(ds.clients.len(), 3);
        assert_eq!(ds.employees.len(), 5);
    }
}
