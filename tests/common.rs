#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtimebill::store::Dataset;
use rtimebill::store::seed::sample_dataset_for;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const THIS_WEEK: &str = "2023-03-24";
pub const LAST_WEEK: &str = "2023-03-17";

pub fn this_week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 24).unwrap()
}

pub fn last_week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 17).unwrap()
}

/// Binary with HOME pointed at `home`, so no real config is read.
pub fn rtb(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rtimebill");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Temp HOME holding the sample dataset anchored on 2023-03-24.
pub struct Sandbox {
    pub dir: TempDir,
    pub data: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let data = dir.path().join("dataset.json");
        sample_dataset_for(this_week())
            .save(&data)
            .expect("write sample dataset");
        Self {
            data: data.to_string_lossy().to_string(),
            dir,
        }
    }

    /// Command bound to this sandbox's dataset.
    pub fn cmd(&self) -> Command {
        let mut cmd = rtb(self.dir.path());
        cmd.args(["--data", &self.data]);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn dataset(&self) -> Dataset {
        Dataset::load(Path::new(&self.data)).expect("read dataset back")
    }
}
