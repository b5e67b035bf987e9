use crate::ProjectError;
use serde::{Deserialize, Serialize};

/// Describes which fields an entry carries and how the editor treats them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub name: String,
    pub fields: Vec<Field>,
    /// Adjacent entries of a sample share a border.
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub locked_drag: LockedDragPolicy,
}

impl LabelConfig {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn is_drag_base(&self, field_index: usize) -> bool {
        self.fields.get(field_index).is_some_and(|f| f.drag_base)
    }

    pub(crate) fn validate(&self) -> Result<(), ProjectError> {
        for field in &self.fields {
            if !(field.height > 0.0 && field.height <= 1.0) {
                return Err(ProjectError::InvalidProject {
                    reason: format!(
                        "field '{}' has height {} outside (0, 1]",
                        field.name, field.height
                    ),
                });
            }
            if let FillingTarget::Field(target) = &field.filling {
                if target == &field.name || self.field_index(target).is_none() {
                    return Err(ProjectError::InvalidProject {
                        reason: format!("field '{}' fills against unknown field '{target}'", field.name),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Text shown in the floating label above the field's line.
    pub label: String,
    pub color: String,
    /// Share of the waveform height covered by the field's line, in (0, 1].
    pub height: f64,
    #[serde(default)]
    pub filling: FillingTarget,
    #[serde(default)]
    pub drag_base: bool,
}

/// The point a field's region is filled against.
///
/// Serialized the way label configs spell it: `null`, `"start"`, `"end"`, or the name
/// of another field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum FillingTarget {
    #[default]
    None,
    Start,
    End,
    Field(String),
}

impl From<Option<String>> for FillingTarget {
    fn from(value: Option<String>) -> Self {
        match value {
            None => FillingTarget::None,
            Some(name) if name == "start" => FillingTarget::Start,
            Some(name) if name == "end" => FillingTarget::End,
            Some(name) => FillingTarget::Field(name),
        }
    }
}

impl From<FillingTarget> for Option<String> {
    fn from(value: FillingTarget) -> Self {
        match value {
            FillingTarget::None => None,
            FillingTarget::Start => Some("start".to_string()),
            FillingTarget::End => Some("end".to_string()),
            FillingTarget::Field(name) => Some(name),
        }
    }
}

/// Which points drag their whole entry along by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedDragPolicy {
    #[serde(default)]
    pub use_drag_base: bool,
    #[serde(default)]
    pub use_start: bool,
}
