//! Finding misnamed migration directories

use std::fs;
use std::path::PathBuf;

use crate::config::FixerConfig;
use crate::error::FixError;

/// A direct child of the migrations root with a misnamed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
}

/// Check a directory name against the forbidden characters and bad tokens
pub fn is_bad_name(name: &str, config: &FixerConfig) -> bool {
    if name.chars().any(|c| config.forbidden_chars.contains(&c)) {
        return true;
    }
    let lower = name.to_lowercase();
    config
        .bad_tokens
        .iter()
        .filter(|token| !token.is_empty())
        .any(|token| lower.contains(&token.to_lowercase()))
}

/// List every misnamed directory under the root, sorted by name.
///
/// The canonical target itself is never a candidate, even when its name
/// would match a bad token.
pub fn find_candidates(config: &FixerConfig) -> Result<Vec<Candidate>, FixError> {
    let root = &config.root;
    if !root.is_dir() {
        return Err(FixError::RootNotFound { path: root.clone() });
    }

    let read_err = |source| FixError::ReadRoot {
        path: root.clone(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name == config.target_name || !is_bad_name(&name, config) {
            continue;
        }

        tracing::debug!(candidate = %path.display(), "misnamed migration directory");
        candidates.push(Candidate { path, name });
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}
