use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_warn;
use matcher_core::FileHandle;

/// Reads each path into a `FileHandle`, preserving order.
///
/// Unreadable paths are skipped and returned alongside the reason; content
/// is not inspected.
pub fn load_documents(paths: &[PathBuf]) -> (Vec<FileHandle>, Vec<String>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match fs::read(path) {
            Ok(bytes) => documents.push(FileHandle::new(display_name(path), bytes)),
            Err(err) => {
                engine_warn!("Could not read {:?}: {}", path, err);
                failures.push(format!("{}: {}", path.display(), err));
            }
        }
    }
    (documents, failures)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
