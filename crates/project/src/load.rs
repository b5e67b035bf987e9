use crate::{Project, ProjectError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    pub name: String,
    pub label_config: String,
    pub sample_count: usize,
    pub entry_count: usize,
    pub continuous: bool,
}

fn load_project_data(path: &Path) -> Result<Project, ProjectError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    // Try JSON first, fall back to MessagePack
    serde_json::from_reader(reader).or_else(|_| {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        rmp_serde::decode::from_read(reader).map_err(ProjectError::from)
    })
}

pub fn load_project_metadata(path: &Path) -> Result<ProjectMetadata, ProjectError> {
    let project = load_project_data(path)?;

    Ok(ProjectMetadata {
        name: project.name,
        label_config: project.label_config.name,
        sample_count: project.samples.len(),
        entry_count: project.entries.len(),
        continuous: project.label_config.continuous,
    })
}

/// Loads and validates a project. Entries must carry one point per configured field.
pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
    let project = load_project_data(path)?;
    project.validate()?;

    log::info!(
        "Loaded project '{}' with {} entries from {}",
        project.name,
        project.entries.len(),
        path.display()
    );
    Ok(project)
}
