//! Flat-file incident storage.
//!
//! The JSON file is the sole source of truth: every operation is a full
//! load → mutate → save over the collection, with no locking. Concurrent
//! mutations through the HTTP surface can therefore lose the earlier write;
//! that matches the system this replaces and is documented in DESIGN.md.
//!
//! Alongside the collection sits a plain-text action log, one line per
//! mutating operation, opened and closed per call.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analyzer;
use crate::error::{AppError, AppResult};
use crate::models::{now_stamp, Analysis, Incident, Priority};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct IncidentStore {
    incident_file: PathBuf,
    log_file: PathBuf,
}

impl IncidentStore {
    pub fn new(incident_file: impl Into<PathBuf>, log_file: impl Into<PathBuf>) -> Self {
        Self {
            incident_file: incident_file.into(),
            log_file: log_file.into(),
        }
    }

    pub fn incident_file(&self) -> &Path {
        &self.incident_file
    }

    /// Load the full collection. A missing file is an empty store; a file
    /// that exists but does not parse is a storage error, never silently
    /// replaced by an empty list.
    pub fn load_all(&self) -> AppResult<Vec<Incident>> {
        if !self.incident_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.incident_file)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::Storage(format!(
                "incident file {} is corrupt: {}",
                self.incident_file.display(),
                e
            ))
        })
    }

    /// Overwrite the persisted collection, pretty-printed for hand editing.
    pub fn save_all(&self, incidents: &[Incident]) -> AppResult<()> {
        let content = serde_json::to_string_pretty(incidents)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        fs::write(&self.incident_file, content).map_err(|e| AppError::Storage(e.to_string()))
    }

    pub fn create(
        &self,
        description: &str,
        priority: Priority,
        analysis: Option<Analysis>,
    ) -> AppResult<Incident> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::blank_description());
        }

        let with_ai = analysis.is_some();
        let incident = Incident::new(description.to_string(), priority, analysis);

        let mut incidents = self.load_all()?;
        incidents.push(incident.clone());
        self.save_all(&incidents)?;

        let ai_suffix = if with_ai { " (with AI analysis)" } else { "" };
        self.log_action(&format!("Incident created{}: {}", ai_suffix, description));

        Ok(incident)
    }

    pub fn update(&self, id: Uuid, description: &str, reanalyze: bool) -> AppResult<Incident> {
        let mut incidents = self.load_all()?;
        let incident = incidents
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(AppError::incident_not_found)?;

        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::blank_description());
        }

        let old_description = std::mem::replace(&mut incident.description, description.to_string());
        if reanalyze {
            incident.ai_analysis = Some(analyzer::analyze(description));
        }
        let updated = incident.clone();

        self.save_all(&incidents)?;

        if reanalyze {
            self.log_action(&format!(
                "Incident updated with AI re-analysis:\nFrom: {}\nTo: {}",
                old_description, description
            ));
        } else {
            self.log_action(&format!(
                "Incident updated:\nFrom: {}\nTo: {}",
                old_description, description
            ));
        }

        Ok(updated)
    }

    /// Mark an incident resolved. Resolving an already-resolved incident
    /// overwrites `resolved_at` with a fresh timestamp; the quirk is kept
    /// intentionally (see DESIGN.md).
    pub fn resolve(&self, id: Uuid) -> AppResult<Incident> {
        let mut incidents = self.load_all()?;
        let incident = incidents
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(AppError::incident_not_found)?;

        incident.resolved = true;
        incident.resolved_at = Some(now_stamp());
        let resolved = incident.clone();

        self.save_all(&incidents)?;
        self.log_action(&format!("Incident resolved: {}", resolved.description));

        Ok(resolved)
    }

    /// Remove an incident, returning the deleted record.
    pub fn delete(&self, id: Uuid) -> AppResult<Incident> {
        let mut incidents = self.load_all()?;
        let index = incidents
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(AppError::incident_not_found)?;

        let deleted = incidents.remove(index);
        self.save_all(&incidents)?;
        self.log_action(&format!("Incident deleted: {}", deleted.description));

        Ok(deleted)
    }

    /// Append one human-readable line to the action log. Log failures are
    /// swallowed: the log is an audit convenience, not part of the store's
    /// consistency contract.
    pub fn log_action(&self, action: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z");
        let line = format!("{} at {}\n", action, timestamp);

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .and_then(|mut f| f.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::warn!("Failed to append action log: {}", e);
        }
    }

    /// Raw action-log lines, oldest first. Missing log file is an empty log.
    pub fn read_log(&self) -> AppResult<Vec<String>> {
        if !self.log_file.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.log_file).map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(content.lines().map(|l| l.trim().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, IncidentStore) {
        let dir = TempDir::new().unwrap();
        let store = IncidentStore::new(
            dir.path().join("incidents.json"),
            dir.path().join("incident_log.txt"),
        );
        (dir, store)
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let (_dir, store) = test_store();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let (_dir, store) = test_store();
        fs::write(store.incident_file(), "{ not json").unwrap();
        assert!(matches!(store.load_all(), Err(AppError::Storage(_))));
    }

    #[test]
    fn save_load_round_trip_preserves_records() {
        let (_dir, store) = test_store();
        store
            .create("Server room over temperature", Priority::High, None)
            .unwrap();
        store
            .create(
                "Ransomware on workstation 12",
                Priority::Critical,
                Some(analyzer::analyze("Ransomware on workstation 12")),
            )
            .unwrap();

        let first = store.load_all().unwrap();
        store.save_all(&first).unwrap();
        let second = store.load_all().unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.description, b.description);
            assert_eq!(a.priority, b.priority);
            assert_eq!(a.created_at, b.created_at);
            assert_eq!(
                a.ai_analysis.as_ref().map(|x| x.category),
                b.ai_analysis.as_ref().map(|x| x.category)
            );
        }
    }

    #[test]
    fn create_appends_one_record_with_fresh_id() {
        let (_dir, store) = test_store();
        let first = store.create("VPN flapping", Priority::Medium, None).unwrap();
        let second = store.create("VPN flapping again", Priority::Medium, None).unwrap();

        let incidents = store.load_all().unwrap();
        assert_eq!(incidents.len(), 2);
        assert_ne!(first.id, second.id);
        assert_eq!(incidents[1].description, "VPN flapping again");
        assert!(!incidents[1].resolved);
        assert!(incidents[1].resolved_at.is_none());
    }

    #[test]
    fn create_trims_and_rejects_blank_description() {
        let (_dir, store) = test_store();
        assert!(matches!(
            store.create("   ", Priority::Low, None),
            Err(AppError::Validation(_))
        ));
        assert!(store.load_all().unwrap().is_empty());

        let incident = store.create("  padded  ", Priority::Low, None).unwrap();
        assert_eq!(incident.description, "padded");
    }

    #[test]
    fn update_replaces_description_and_optionally_reanalyzes() {
        let (_dir, store) = test_store();
        let incident = store.create("Minor bug in footer", Priority::Low, None).unwrap();

        let updated = store.update(incident.id, "Data breach confirmed", true).unwrap();
        assert_eq!(updated.description, "Data breach confirmed");
        let analysis = updated.ai_analysis.expect("reanalysis requested");
        assert_eq!(analysis.category, crate::models::Category::Security);

        let untouched = store.update(incident.id, "Data breach contained", false).unwrap();
        // Analysis survives a plain update unchanged.
        assert!(untouched.ai_analysis.is_some());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (_dir, store) = test_store();
        assert!(matches!(
            store.update(Uuid::new_v4(), "anything", false),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn update_blank_description_is_rejected() {
        let (_dir, store) = test_store();
        let incident = store.create("Original", Priority::Low, None).unwrap();
        assert!(matches!(
            store.update(incident.id, "  ", false),
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.load_all().unwrap()[0].description, "Original");
    }

    #[test]
    fn resolve_sets_flag_and_timestamp() {
        let (_dir, store) = test_store();
        let incident = store.create("Disk filling up", Priority::Medium, None).unwrap();
        let resolved = store.resolve(incident.id).unwrap();
        assert!(resolved.resolved);
        assert!(resolved.resolved_at.is_some());
    }

    #[test]
    fn resolve_unknown_id_leaves_store_unmodified() {
        let (_dir, store) = test_store();
        store.create("Known incident", Priority::Low, None).unwrap();
        let before = fs::read_to_string(store.incident_file()).unwrap();

        assert!(matches!(store.resolve(Uuid::new_v4()), Err(AppError::NotFound(_))));

        let after = fs::read_to_string(store.incident_file()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn resolve_twice_overwrites_resolved_at() {
        let (_dir, store) = test_store();
        let incident = store.create("Flaky job", Priority::Low, None).unwrap();

        let first = store.resolve(incident.id).unwrap();
        let second = store.resolve(incident.id).unwrap();
        assert!(second.resolved);
        // Timestamps have second resolution, so equal stamps are possible;
        // the point is the field was written again, not preserved as-is.
        assert!(second.resolved_at.unwrap() >= first.resolved_at.unwrap());
    }

    #[test]
    fn delete_returns_removed_record() {
        let (_dir, store) = test_store();
        let keep = store.create("Keep me", Priority::Low, None).unwrap();
        let drop = store.create("Drop me", Priority::Low, None).unwrap();

        let deleted = store.delete(drop.id).unwrap();
        assert_eq!(deleted.id, drop.id);

        let remaining = store.load_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);

        assert!(matches!(store.delete(drop.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn actions_append_to_the_log() {
        let (_dir, store) = test_store();
        assert!(store.read_log().unwrap().is_empty());

        let incident = store.create("Logged incident", Priority::Low, None).unwrap();
        store.resolve(incident.id).unwrap();

        let log = store.read_log().unwrap();
        assert!(log[0].starts_with("Incident created: Logged incident at "));
        assert!(log.last().unwrap().starts_with("Incident resolved: Logged incident at "));
    }
}
