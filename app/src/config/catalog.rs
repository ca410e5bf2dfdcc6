use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedEmployee {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Reference data loaded from YAML: the services a client may be filed
/// under and the employees seeded at startup.
///
/// ```yaml
/// services:
///   - Architecture
///   - Interior Design
/// employees:
///   - name: Asha
///     email: asha@example.com
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        // Handle empty file
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }

        let catalog: Catalog = serde_yaml::from_str(contents)?;
        Ok(catalog)
    }

    /// Missing file means no catalogue: every service is allowed, nothing is seeded.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::new());
        }

        Self::load_from_file(path)
    }

    pub fn allows_service(&self, service: &str) -> bool {
        self.services.is_empty() || self.services.iter().any(|s| s == service)
    }

    pub fn list_services(&self) -> Vec<String> {
        self.services.clone()
    }
}
