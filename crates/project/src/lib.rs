mod config;
mod load;
mod save;
mod store;

use serde::{Deserialize, Serialize};

pub use config::{Field, FillingTarget, LabelConfig, LockedDragPolicy};
pub use load::{ProjectMetadata, load_project, load_project_metadata};
pub use save::save_project;
pub use store::EditorStore;

/// A time-domain label. Times are in milliseconds.
///
/// An `end` of zero or below is measured from the end of the sample, so `-200.0`
/// means "200ms before the sample ends".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sample: String,
    pub name: String,
    pub start: f64,
    pub end: f64,
    /// One point per configured field, in field order.
    pub points: Vec<f64>,
}

impl Entry {
    /// Resolves a relative (non-positive) end against the sample length.
    pub fn resolved_end(&self, sample_duration_ms: f64) -> f64 {
        if self.end <= 0.0 {
            sample_duration_ms + self.end
        } else {
            self.end
        }
    }
}

/// An entry together with its position in the project's entry list.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    pub index: usize,
    pub entry: Entry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleInfo {
    pub name: String,
    pub sample_rate: u32,
    /// Length in sample frames.
    pub frames: u64,
}

impl SampleInfo {
    pub fn duration_ms(&self) -> f64 {
        self.frames as f64 * 1000.0 / self.sample_rate as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub samples: Vec<SampleInfo>,
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub current_index: usize,
    pub label_config: LabelConfig,
}

impl Project {
    pub fn current_entry(&self) -> &Entry {
        &self.entries[self.current_index]
    }

    pub fn sample_of(&self, entry: &Entry) -> Option<&SampleInfo> {
        self.samples.iter().find(|s| s.name == entry.sample)
    }

    pub fn current_sample(&self) -> Option<&SampleInfo> {
        self.sample_of(self.current_entry())
    }

    /// Indexes of all entries that belong to the current entry's sample, in order.
    pub fn current_sample_indexes(&self) -> Vec<usize> {
        let sample = &self.current_entry().sample;
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| &e.sample == sample)
            .map(|(i, _)| i)
            .collect()
    }

    /// The entries handed to the marker editor.
    ///
    /// With `multiple` set on a continuous labeler, every entry of the current sample is
    /// edited together; otherwise only the current entry is.
    pub fn editing_window(&self, multiple: bool) -> Vec<IndexedEntry> {
        let indexes = if multiple && self.label_config.continuous {
            self.current_sample_indexes()
        } else {
            vec![self.current_index]
        };
        indexes
            .into_iter()
            .map(|index| IndexedEntry {
                index,
                entry: self.entries[index].clone(),
            })
            .collect()
    }

    pub(crate) fn validate(&self) -> Result<(), ProjectError> {
        if self.entries.is_empty() {
            return Err(ProjectError::InvalidProject {
                reason: "project has no entries".to_string(),
            });
        }
        if self.current_index >= self.entries.len() {
            return Err(ProjectError::InvalidProject {
                reason: format!(
                    "current index {} out of range for {} entries",
                    self.current_index,
                    self.entries.len()
                ),
            });
        }
        let field_count = self.label_config.fields.len();
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.points.len() != field_count {
                return Err(ProjectError::InvalidProject {
                    reason: format!(
                        "entry {index} ({}) has {} points, expected {field_count}",
                        entry.name,
                        entry.points.len()
                    ),
                });
            }
            if self.sample_of(entry).is_none() {
                return Err(ProjectError::InvalidProject {
                    reason: format!("entry {index} refers to unknown sample '{}'", entry.sample),
                });
            }
        }
        self.label_config.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] rmp_serde::decode::Error),

    #[error("Invalid project: {reason}")]
    InvalidProject { reason: String },

    #[error("Cannot cut entry {index} at {position}ms")]
    InvalidCut { index: usize, position: f64 },
}
