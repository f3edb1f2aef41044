//! Broker resource library loaded from a JSON file
//!
//! File shape: `{ "resources": [ { title, description, url, categories, date } ] }`

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Pseudo-category that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
}

impl Resource {
    /// Long-form date, e.g. "December 8, 2024"; falls back to the raw value
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Deserialize)]
struct ResourceFile {
    resources: Vec<Resource>,
}

/// Loaded resources plus their derived category list
#[derive(Debug, Clone, Default)]
pub struct ResourceLibrary {
    resources: Vec<Resource>,
}

impl ResourceLibrary {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: ResourceFile =
            serde_json::from_str(json).context("Resource file is not valid JSON")?;
        Ok(Self::new(file.resources))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Load from the configured path; any failure logs and yields an empty library
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(library) => {
                tracing::info!("Loaded {} resources from {}", library.len(), path.display());
                library
            }
            Err(e) => {
                tracing::warn!("Error loading resources: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// `All` followed by each category in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut out = vec![ALL_CATEGORIES];
        for category in self.resources.iter().flat_map(|r| r.categories.iter()) {
            if !out.contains(&category.as_str()) {
                out.push(category.as_str());
            }
        }
        out
    }

    /// Resources matching `search` (case-insensitive) within `category`
    pub fn filter(&self, search: &str, category: &str) -> Vec<&Resource> {
        let needle = search.trim().to_lowercase();
        self.resources
            .iter()
            .filter(|r| needle.is_empty() || r.matches(&needle))
            .filter(|r| category == ALL_CATEGORIES || r.categories.iter().any(|c| c == category))
            .collect()
    }
}
