use crate::{Project, ProjectError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a project as JSON, or as MessagePack when the path ends in `.msgpack`.
pub fn save_project(path: &Path, project: &Project) -> Result<(), ProjectError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if path.extension().is_some_and(|ext| ext == "msgpack") {
        rmp_serde::encode::write_named(&mut writer, project)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, project)?;
    }
    writer.flush()?;

    log::info!("Saved project '{}' to {}", project.name, path.display());
    Ok(())
}
