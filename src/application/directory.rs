//! # Project Directory
//!
//! Loads and exposes the immutable mapping from project key to project record.
//! Built once at startup (file first, environment variable as fallback) and
//! read-only afterwards, so request handling never locks or touches disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::types::ProjectRecord;

/// Normalizes a project key: trimmed and lowercased. Applied to stored keys at
/// load time and query keys at lookup time, so matching is case-insensitive.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// On-disk record shape. `managers` (plural) wins over the legacy singular
/// `manager`; downstream code only ever sees the normalized `ProjectRecord`.
#[derive(Debug, Deserialize)]
struct RawProject {
    name: String,
    #[serde(default)]
    managers: Option<Vec<String>>,
    #[serde(default)]
    manager: Option<String>,
}

#[derive(Debug, Default)]
pub struct Directory {
    records: Vec<ProjectRecord>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Load the directory from the best available source: the file if it
    /// exists, else the environment variable, else empty. Never fails; a
    /// malformed source is logged and yields an empty directory.
    pub fn load(path: &Path, env_var: &str) -> Directory {
        let file = fs::read_to_string(path).ok();
        if file.is_some() {
            tracing::info!("Reading project directory from {}", path.display());
        }
        let env = std::env::var(env_var).ok();
        Self::from_sources(file.as_deref(), env.as_deref())
    }

    /// Source precedence without the I/O, so it stays unit-testable.
    pub fn from_sources(file: Option<&str>, env: Option<&str>) -> Directory {
        let payload = file.or_else(|| env.filter(|v| !v.trim().is_empty()));

        let Some(data) = payload else {
            tracing::warn!("No project data found; starting with an empty directory");
            return Directory::default();
        };

        match Self::from_json(data) {
            Ok(directory) => {
                tracing::info!("Loaded {} project record(s)", directory.len());
                directory
            }
            Err(e) => {
                tracing::error!("Failed to parse project data, using an empty directory: {e:#}");
                Directory::default()
            }
        }
    }

    /// Parse the serialized record set. Key order in the JSON object is
    /// preserved and becomes the directory's iteration order.
    pub fn from_json(data: &str) -> Result<Directory> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(data).context("project data is not a JSON object")?;

        let mut directory = Directory::default();
        for (raw_key, value) in raw {
            let project: RawProject = serde_json::from_value(value)
                .with_context(|| format!("invalid record for project '{raw_key}'"))?;

            let managers = match (project.managers, project.manager) {
                (Some(list), _) if !list.is_empty() => list,
                (_, Some(single)) => vec![single],
                _ => Vec::new(),
            };

            let key = normalize_key(&raw_key);
            let record = ProjectRecord {
                key: key.clone(),
                name: project.name,
                managers,
            };

            if let Some(&existing) = directory.index.get(&key) {
                tracing::warn!("Duplicate project key '{key}', keeping the later record");
                directory.records[existing] = record;
            } else {
                directory.index.insert(key, directory.records.len());
                directory.records.push(record);
            }
        }
        Ok(directory)
    }

    /// Look up a project by key (normalized internally).
    pub fn get(&self, key: &str) -> Option<&ProjectRecord> {
        self.index
            .get(&normalize_key(key))
            .map(|&i| &self.records[i])
    }

    /// All projects the given person is responsible for, in directory order.
    /// A person with no projects gets an empty Vec, not an error.
    pub fn projects_of(&self, person_id: &str) -> Vec<&ProjectRecord> {
        self.records
            .iter()
            .filter(|r| r.managers.iter().any(|m| m == person_id))
            .collect()
    }

    /// Projects grouped by responsible person. Person order is first
    /// appearance while scanning records in directory order; each person's
    /// list keeps directory order. Recomputed per call; the directory is
    /// static and small.
    pub fn manager_groups(&self) -> Vec<(String, Vec<&ProjectRecord>)> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<&ProjectRecord>> = HashMap::new();

        for record in &self.records {
            for id in &record.managers {
                if !groups.contains_key(id) {
                    order.push(id.clone());
                }
                groups.entry(id.clone()).or_default().push(record);
            }
        }

        order
            .into_iter()
            .map(|id| {
                let projects = groups.remove(&id).unwrap_or_default();
                (id, projects)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "bk": { "name": "BK", "managers": ["U100000001"] },
        "sk": { "name": "SK", "managers": ["U100000001", "U100000002"] }
    }"#;

    #[test]
    fn file_source_wins_over_env() {
        let dir = Directory::from_sources(Some(SAMPLE), Some(r#"{"other":{"name":"Other"}}"#));
        assert!(dir.get("bk").is_some());
        assert!(dir.get("other").is_none());
    }

    #[test]
    fn env_source_used_when_file_absent() {
        let dir = Directory::from_sources(None, Some(SAMPLE));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn blank_env_source_is_treated_as_absent() {
        let dir = Directory::from_sources(None, Some("   "));
        assert!(dir.is_empty());
    }

    #[test]
    fn no_source_yields_empty_directory() {
        let dir = Directory::from_sources(None, None);
        assert!(dir.is_empty());
    }

    #[test]
    fn malformed_source_yields_empty_directory() {
        let dir = Directory::from_sources(Some("{ not json"), None);
        assert!(dir.is_empty());
    }

    #[test]
    fn load_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dir = Directory::load(file.path(), "ROSTER_TEST_UNSET_VAR");
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn load_with_missing_file_and_unset_var_is_empty() {
        let dir = Directory::load(Path::new("does/not/exist.json"), "ROSTER_TEST_UNSET_VAR");
        assert!(dir.is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let dir = Directory::from_json(SAMPLE).unwrap();
        assert_eq!(dir.get("BK"), dir.get("bk"));
        assert_eq!(dir.get("  Bk  "), dir.get("bk"));
        assert_eq!(normalize_key(&normalize_key(" BK ")), normalize_key(" BK "));
    }

    #[test]
    fn stored_keys_are_normalized_at_load_time() {
        let dir = Directory::from_json(r#"{" VK ": {"name": "VK", "manager": "U100000003"}}"#)
            .unwrap();
        assert_eq!(dir.get("vk").unwrap().key, "vk");
    }

    #[test]
    fn plural_managers_win_over_legacy_singular() {
        let dir = Directory::from_json(
            r#"{"yk": {"name": "YK", "manager": "U100000009", "managers": ["U100000001"]}}"#,
        )
        .unwrap();
        assert_eq!(dir.get("yk").unwrap().managers, vec!["U100000001"]);
    }

    #[test]
    fn legacy_singular_manager_is_accepted() {
        let dir = Directory::from_json(r#"{"yk": {"name": "YK", "manager": "U100000009"}}"#)
            .unwrap();
        assert_eq!(dir.get("yk").unwrap().managers, vec!["U100000009"]);
    }

    #[test]
    fn record_without_any_manager_is_kept_as_degraded() {
        let dir = Directory::from_json(r#"{"zz": {"name": "ZZ"}}"#).unwrap();
        assert!(dir.get("zz").unwrap().managers.is_empty());
    }

    #[test]
    fn projects_of_returns_exact_assignments() {
        let dir = Directory::from_json(SAMPLE).unwrap();
        let both: Vec<&str> = dir
            .projects_of("U100000001")
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(both, vec!["bk", "sk"]);

        let one: Vec<&str> = dir
            .projects_of("U100000002")
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(one, vec!["sk"]);

        assert!(dir.projects_of("U999999999").is_empty());
    }

    #[test]
    fn manager_groups_follow_directory_order() {
        let dir = Directory::from_json(SAMPLE).unwrap();
        let groups = dir.manager_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "U100000001");
        let names: Vec<&str> = groups[0].1.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["BK", "SK"]);
        assert_eq!(groups[1].0, "U100000002");
    }
}
