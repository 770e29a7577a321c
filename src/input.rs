//! Loading change sets and analysis results from JSON files.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::context::{AnalysisResult, ChangeSet};
use crate::error::InputError;

/// Path that means "read from stdin".
pub const STDIN_PATH: &str = "-";

fn read_source(path: &Path) -> Result<String, InputError> {
    let read_failed = |source: std::io::Error| InputError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new(STDIN_PATH) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(read_failed)?;
        Ok(content)
    } else {
        std::fs::read_to_string(path).map_err(read_failed)
    }
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, InputError> {
    serde_json::from_str(content).map_err(|source| InputError::ParseFailed {
        path: PathBuf::from(path),
        source,
    })
}

/// Load a [`ChangeSet`] from a JSON file, or stdin for `-`.
pub fn load_change_set(path: &Path) -> Result<ChangeSet, InputError> {
    parse(path, &read_source(path)?)
}

/// Load an [`AnalysisResult`] from a JSON file, or stdin for `-`.
pub fn load_analysis(path: &Path) -> Result<AnalysisResult, InputError> {
    parse(path, &read_source(path)?)
}
