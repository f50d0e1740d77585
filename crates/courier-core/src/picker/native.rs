//! Filesystem-backed picker.
//!
//! Stands in for the platform chooser in non-interactive hosts (the CLI):
//! "selection" is a preset list of paths, resolved and read at prompt time.
//! The accept filter is enforced the way a chooser would restrict the
//! selectable files.

use std::fs;
use std::path::PathBuf;

use super::{FilePicker, PickerPrompt, SelectedFile, SelectionError};

/// Picks files from a fixed list of paths.
#[derive(Debug, Clone)]
pub struct PathPicker {
    paths: Vec<PathBuf>,
}

impl PathPicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl FilePicker for PathPicker {
    fn pick(&self, prompt: &PickerPrompt) -> Result<Vec<SelectedFile>, SelectionError> {
        let paths: &[PathBuf] = if prompt.multiple {
            &self.paths
        } else {
            // Single-selection prompts expose at most one file.
            &self.paths[..self.paths.len().min(1)]
        };

        let mut selected = Vec::with_capacity(paths.len());
        for path in paths {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
            if !accept_matches(&prompt.accept, &mime) {
                return Err(SelectionError::Picker(format!(
                    "{} ({}) does not match accept filter `{}`",
                    path.display(),
                    mime,
                    prompt.accept
                )));
            }
            let data = fs::read(path).map_err(|source| SelectionError::Read {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            selected.push(SelectedFile { name, mime, data });
        }
        Ok(selected)
    }
}

/// HTML-`accept` style matching: a comma-separated pattern list where each
/// entry is `*/*`, a `type/*` wildcard, or an exact `type/subtype`.
fn accept_matches(accept: &str, mime: &str) -> bool {
    accept.split(',').map(str::trim).any(|pattern| {
        if pattern.is_empty() || pattern == "*/*" {
            return pattern == "*/*";
        }
        match pattern.strip_suffix("/*") {
            Some(main_type) => mime
                .split('/')
                .next()
                .is_some_and(|m| m.eq_ignore_ascii_case(main_type)),
            None => mime.eq_ignore_ascii_case(pattern),
        }
    })
}
