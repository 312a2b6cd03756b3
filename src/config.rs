//! Runtime settings read from the environment (after `.env` is loaded).

use std::net::SocketAddr;

use anyhow::{Context, Result, anyhow};

use crate::courses::filter::{StudentLevel, validate_min_gpa};
use crate::courses::types::Selection;

pub const DEFAULT_DATA_SOURCE: &str =
    "https://raw.githubusercontent.com/wadefagen/datasets/master/gpa/uiuc-gpa-dataset.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";
pub const DEFAULT_SUBJECT: &str = "AAS";
pub const DEFAULT_MIN_GPA: f64 = 3.0;
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/gpa_explorer.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_source: String,
    pub bind_addr: SocketAddr,
    pub defaults: Selection,
    pub log_file_path: String,
}

impl Settings {
    /// Reads `GPA_*` and `LOG_FILE_PATH` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = get("GPA_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid GPA_BIND_ADDR {bind}: {e}"))?;

        let level = match lookup("GPA_DEFAULT_LEVEL") {
            Some(raw) => raw
                .parse::<StudentLevel>()
                .context("invalid GPA_DEFAULT_LEVEL")?,
            None => StudentLevel::Undergraduate,
        };

        let min_gpa = match lookup("GPA_DEFAULT_MIN_GPA") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid GPA_DEFAULT_MIN_GPA {raw}"))?,
            None => DEFAULT_MIN_GPA,
        };
        let min_gpa = validate_min_gpa(min_gpa).context("invalid GPA_DEFAULT_MIN_GPA")?;

        Ok(Self {
            data_source: get("GPA_DATA_SOURCE", DEFAULT_DATA_SOURCE),
            bind_addr,
            defaults: Selection {
                subject: get("GPA_DEFAULT_SUBJECT", DEFAULT_SUBJECT),
                level,
                min_gpa,
            },
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH),
        })
    }
}
