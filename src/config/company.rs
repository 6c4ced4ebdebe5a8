use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::batch::DEFAULT_WORKERS;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    pub company: Company,
    #[serde(default)]
    pub slip: SlipSettings,
}

/// Identity block printed under the slip title.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    /// Up to three address lines; extra lines are not printed
    #[serde(default)]
    pub address: Vec<String>,
}

impl Default for Company {
    fn default() -> Self {
        Self {
            name: "24X7 Moneyworks Consulting Private Limited".to_string(),
            address: vec![
                "Registered Office: 205-206, Corner Point, Jetalpur Road".to_string(),
                "Development Location: 509, Midtown Complex, Jetalpur Road".to_string(),
                "Vadodara-390007".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SlipSettings {
    /// Local path or http(s) URL of the logo; omitted slips carry no logo
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_logo_timeout")]
    pub logo_timeout_secs: u64,
}

impl SlipSettings {
    pub fn logo_timeout(&self) -> Duration {
        Duration::from_secs(self.logo_timeout_secs)
    }
}

impl Default for SlipSettings {
    fn default() -> Self {
        Self {
            logo: None,
            output_dir: default_output_dir(),
            workers: default_workers(),
            logo_timeout_secs: default_logo_timeout(),
        }
    }
}

fn default_output_dir() -> String {
    "~/.payslip/output".to_string()
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_logo_timeout() -> u64 {
    10
}
