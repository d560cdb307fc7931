use crate::errors::{AppError, AppResult};
use crate::export::Letterhead;
use crate::store::{Dataset, seed};
use crate::utils::path::{expand_tilde, resolve};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        let lh = Letterhead::default();
        Self {
            name: lh.company_name,
            address_lines: lh.address_lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub dataset: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub company: CompanyConfig,
    #[serde(default = "default_payment_due_days")]
    pub payment_due_days: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_page_size() -> usize {
    crate::core::pipeline::DEFAULT_PAGE_SIZE
}
fn default_payment_due_days() -> u32 {
    30
}
fn default_output_dir() -> String {
    Config::config_dir()
        .join("invoices")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: Self::dataset_file().to_string_lossy().to_string(),
            page_size: default_page_size(),
            company: CompanyConfig::default(),
            payment_due_days: default_payment_due_days(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimebill")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimebill")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimebill.conf")
    }

    /// Return the full path of the default JSON dataset
    pub fn dataset_file() -> PathBuf {
        Self::config_dir().join("dataset.json")
    }

    pub fn dataset_path(&self) -> PathBuf {
        expand_tilde(&self.dataset)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    pub fn letterhead(&self) -> Letterhead {
        Letterhead {
            company_name: self.company.name.clone(),
            address_lines: self.company.address_lines.clone(),
            payment_due_days: self.payment_due_days,
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 {
            return Err(AppError::Config("page_size must be at least 1".into()));
        }
        if self.dataset.trim().is_empty() {
            return Err(AppError::Config("dataset path is empty".into()));
        }
        Ok(())
    }

    /// Initialize configuration and dataset files
    pub fn init_all(custom_dataset: Option<String>, is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let dataset_path = match custom_dataset {
            Some(name) => resolve(&name, &dir),
            None => Self::dataset_file(),
        };

        let config = Config {
            dataset: dataset_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Sample dataset, never overwriting an existing one
        if !dataset_path.exists() {
            let ds: Dataset = seed::sample_dataset();
            ds.save(&dataset_path)?;
        }

        println!("✅ Dataset:     {:?}", dataset_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("dataset: /tmp/ds.json\n").unwrap();
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.payment_due_days, 30);
        assert_eq!(cfg.company.name, "STAFFING COMPANY");
        assert_eq!(cfg.company.address_lines.len(), 2);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let cfg: Config = serde_yaml::from_str("dataset: ds.json\npage_size: 0\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn letterhead_follows_company_settings() {
        let yaml = "dataset: ds.json\npayment_due_days: 15\ncompany:\n  name: ACME STAFFING\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        let lh = cfg.letterhead();
        assert_eq!(lh.company_name, "ACME STAFFING");
        assert!(lh.address_lines.is_empty());
        assert_eq!(lh.payment_due_days, 15);
    }
}
