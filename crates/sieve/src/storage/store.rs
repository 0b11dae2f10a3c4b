//! File-backed store for versioned insight snapshots.
//!
//! Layout under the store root:
//!
//! ```text
//! insights/
//! ├── sales.csv_revenue_v1.json
//! ├── sales.csv_revenue_v2.json
//! └── sales.csv_revenue_latest.json   # copy of the newest version
//! ```
//!
//! The dataset and metric are joined with `_` and path separators flatten to
//! `_`, so `("a_b", "c")` and `("a", "b_c")` share file names. Each snapshot
//! records its own keys, and the store refuses to read or overwrite files that
//! belong to another pair.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SieveError};

use super::snapshot::InsightSnapshot;

/// Directory of versioned snapshots, keyed by dataset and decision metric.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at a directory. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Save a snapshot as the next version and refresh the latest copy.
    ///
    /// Returns the stored snapshot with its assigned version.
    pub fn save(&self, mut snapshot: InsightSnapshot) -> Result<InsightSnapshot> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                SieveError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    self.root.display(),
                    e
                ))
            })?;
        }

        let dataset = snapshot.dataset_id.clone();
        let metric = snapshot.decision_metric.clone();
        // Fails if the file names are already taken by another pair.
        self.load(&dataset, &metric, None)?;

        let version = self
            .versions(&dataset, &metric)?
            .last()
            .map_or(1, |v| v + 1);
        snapshot.version = version;

        let version_path = self.version_path(&dataset, &metric, version);
        write_json(&version_path, &snapshot)?;
        if let Err(e) = write_json(&self.latest_path(&dataset, &metric), &snapshot) {
            // Keep versions and the latest copy in step.
            warn!(path = %version_path.display(), error = %e, "rolling back snapshot version");
            let _ = fs::remove_file(&version_path);
            return Err(e);
        }

        info!(
            dataset = %dataset,
            metric = %metric,
            version,
            insights = snapshot.insights.len(),
            "saved insight snapshot"
        );
        Ok(snapshot)
    }

    /// Load a specific version, or the latest when `version` is `None`.
    ///
    /// Returns `Ok(None)` if no such snapshot exists.
    pub fn load(
        &self,
        dataset_id: &str,
        decision_metric: &str,
        version: Option<u32>,
    ) -> Result<Option<InsightSnapshot>> {
        let path = match version {
            Some(v) => self.version_path(dataset_id, decision_metric, v),
            None => self.latest_path(dataset_id, decision_metric),
        };
        if !path.exists() {
            debug!(path = %path.display(), "snapshot not found");
            return Ok(None);
        }

        let file = File::open(&path).map_err(|e| {
            SieveError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;
        let snapshot: InsightSnapshot =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                SieveError::Persistence(format!(
                    "Failed to parse snapshot '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        if snapshot.dataset_id != dataset_id || snapshot.decision_metric != decision_metric {
            return Err(SieveError::Persistence(format!(
                "Snapshot '{}' belongs to {} / {}, not {} / {}",
                path.display(),
                snapshot.dataset_id,
                snapshot.decision_metric,
                dataset_id,
                decision_metric
            )));
        }
        Ok(Some(snapshot))
    }

    /// All stored version numbers, ascending.
    pub fn versions(&self, dataset_id: &str, decision_metric: &str) -> Result<Vec<u32>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{}_v", file_stem(dataset_id, decision_metric));
        let mut versions: Vec<u32> = fs::read_dir(&self.root)
            .map_err(|e| {
                SieveError::Persistence(format!(
                    "Failed to read directory '{}': {}",
                    self.root.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_prefix(&prefix)?
                    .strip_suffix(".json")?
                    .parse()
                    .ok()
            })
            .collect();

        versions.sort_unstable();
        Ok(versions)
    }

    /// Delete one version, or the latest copy when `version` is `None`.
    ///
    /// Returns whether a file was removed.
    pub fn delete(
        &self,
        dataset_id: &str,
        decision_metric: &str,
        version: Option<u32>,
    ) -> Result<bool> {
        let path = match version {
            Some(v) => self.version_path(dataset_id, decision_metric, v),
            None => self.latest_path(dataset_id, decision_metric),
        };
        if !path.exists() {
            return Ok(false);
        }
        remove(&path)?;
        Ok(true)
    }

    /// Delete every version and the latest copy. Returns the number of files removed.
    pub fn delete_all(&self, dataset_id: &str, decision_metric: &str) -> Result<usize> {
        let mut deleted = 0;
        for version in self.versions(dataset_id, decision_metric)? {
            remove(&self.version_path(dataset_id, decision_metric, version))?;
            deleted += 1;
        }

        let latest = self.latest_path(dataset_id, decision_metric);
        if latest.exists() {
            remove(&latest)?;
            deleted += 1;
        }

        info!(dataset = %dataset_id, metric = %decision_metric, deleted, "deleted insight snapshots");
        Ok(deleted)
    }

    fn version_path(&self, dataset_id: &str, decision_metric: &str, version: u32) -> PathBuf {
        self.root.join(format!(
            "{}_v{}.json",
            file_stem(dataset_id, decision_metric),
            version
        ))
    }

    fn latest_path(&self, dataset_id: &str, decision_metric: &str) -> PathBuf {
        self.root
            .join(format!("{}_latest.json", file_stem(dataset_id, decision_metric)))
    }
}

/// File name stem for a dataset and metric, with path separators flattened.
fn file_stem(dataset_id: &str, decision_metric: &str) -> String {
    let safe = |s: &str| s.replace(['/', '\\'], "_");
    format!("{}_{}", safe(dataset_id), safe(decision_metric))
}

/// Write a snapshot beside `path` and rename it into place.
fn write_json(path: &Path, snapshot: &InsightSnapshot) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let written = write_file(&tmp, snapshot).and_then(|()| {
        fs::rename(&tmp, path).map_err(|e| {
            SieveError::Persistence(format!("Failed to replace '{}': {}", path.display(), e))
        })
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_file(path: &Path, snapshot: &InsightSnapshot) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        SieveError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(|e| {
        SieveError::Persistence(format!("Failed to serialize snapshot: {}", e))
    })?;
    writer.flush().map_err(|e| {
        SieveError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
    })
}

fn remove(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| {
        SieveError::Persistence(format!("Failed to delete '{}': {}", path.display(), e))
    })
}
