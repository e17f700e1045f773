//! Migration Directory Fixer
//!
//! Decides what to do with the first misnamed directory under the migrations
//! root and performs at most one filesystem mutation:
//!
//! - no candidate: nothing happens
//! - target name free: the candidate is renamed to the target name
//! - target name taken: the candidate is removed, the existing target stays
//!
//! Only the first candidate (in name order) is handled per run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::FixerConfig;
use crate::context::AppContext;
use crate::error::FixError;
use crate::scan::{find_candidates, Candidate};

// =============================================================================
// Types
// =============================================================================

/// The single action a run will take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Nothing,
    Rename { from: PathBuf, to: PathBuf },
    Delete { candidate: Candidate, existing: PathBuf },
}

/// What a run actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NothingToDo,
    Renamed { from: PathBuf, to: PathBuf },
    Deleted { path: PathBuf, summary: DirSummary },
    /// Deletion was declined at the confirmation prompt
    Kept { path: PathBuf },
}

/// Contents of a directory tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirSummary {
    pub files: u64,
    pub dirs: u64,
    pub bytes: u64,
    /// The candidate is a symlink; removing it leaves the link target alone
    pub symlink: bool,
}

impl fmt::Display for DirSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symlink {
            return write!(f, "symbolic link, target left in place");
        }
        write!(
            f,
            "{} file(s), {} subdirectory(ies), {} byte(s)",
            self.files, self.dirs, self.bytes
        )
    }
}

/// Count files, subdirectories and bytes below `path` (the root itself excluded).
///
/// A symlinked `path` is not followed, matching what `remove_dir_all` removes.
pub fn summarize(path: &Path) -> Result<DirSummary, FixError> {
    let mut summary = DirSummary::default();

    for entry in WalkDir::new(path).follow_root_links(false) {
        let entry = entry.map_err(|source| FixError::Summarize {
            path: path.to_path_buf(),
            source,
        })?;
        if entry.depth() == 0 {
            summary.symlink = entry.path_is_symlink();
            continue;
        }
        let file_type = entry.file_type();
        if file_type.is_dir() {
            summary.dirs += 1;
        } else {
            summary.files += 1;
            if file_type.is_file() {
                let meta = entry.metadata().map_err(|source| FixError::Summarize {
                    path: path.to_path_buf(),
                    source,
                })?;
                summary.bytes += meta.len();
            }
        }
    }

    Ok(summary)
}

// =============================================================================
// Planning
// =============================================================================

/// Decide what to do without touching the filesystem.
///
/// Also returns how many further candidates were found and left for later runs.
pub fn plan(config: &FixerConfig) -> Result<(Plan, usize), FixError> {
    let mut candidates = find_candidates(config)?.into_iter();

    let Some(candidate) = candidates.next() else {
        return Ok((Plan::Nothing, 0));
    };
    let remaining = candidates.count();

    let target = config.target_path();
    let plan = if target.is_dir() {
        Plan::Delete {
            candidate,
            existing: target,
        }
    } else {
        Plan::Rename {
            from: candidate.path,
            to: target,
        }
    };

    Ok((plan, remaining))
}

// =============================================================================
// Applying
// =============================================================================

/// Carry out a plan, reporting each step on the console
pub fn apply(ctx: &AppContext, plan: Plan) -> Result<Outcome, FixError> {
    match plan {
        Plan::Nothing => {
            ctx.print_success("No misnamed migration directory found, nothing to do");
            Ok(Outcome::NothingToDo)
        }
        Plan::Rename { from, to } => rename(ctx, from, to),
        Plan::Delete {
            candidate,
            existing,
        } => delete(ctx, candidate, &existing),
    }
}

fn rename(ctx: &AppContext, from: PathBuf, to: PathBuf) -> Result<Outcome, FixError> {
    ctx.print_info(&format!(
        "Renaming: {} -> {}",
        file_name(&from),
        file_name(&to)
    ));

    fs::rename(&from, &to).map_err(|source| FixError::Rename {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;

    tracing::info!(from = %from.display(), to = %to.display(), "renamed migration directory");
    ctx.print_success("Directory renamed successfully");
    Ok(Outcome::Renamed { from, to })
}

fn delete(ctx: &AppContext, candidate: Candidate, existing: &Path) -> Result<Outcome, FixError> {
    let summary = summarize(&candidate.path)?;

    ctx.print_warning(&format!(
        "Destination already exists: {}",
        existing.display()
    ));
    ctx.print_warning(&format!(
        "   Removing old directory: {} ({})",
        candidate.path.display(),
        summary
    ));
    tracing::warn!(
        candidate = %candidate.path.display(),
        existing = %existing.display(),
        files = summary.files,
        dirs = summary.dirs,
        bytes = summary.bytes,
        symlink = summary.symlink,
        "removing misnamed migration directory, target already exists"
    );

    if ctx.confirm_deletes {
        let prompt = format!("Delete {} and everything in it?", candidate.path.display());
        if !ctx.confirm(&prompt, false)? {
            ctx.print_info("Kept old directory, nothing removed");
            return Ok(Outcome::Kept {
                path: candidate.path,
            });
        }
    }

    fs::remove_dir_all(&candidate.path).map_err(|source| FixError::Remove {
        path: candidate.path.clone(),
        source,
    })?;

    ctx.print_success("Old directory removed");
    Ok(Outcome::Deleted {
        path: candidate.path,
        summary,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// Entry Point
// =============================================================================

/// Plan and apply one fix under the configured migrations root
pub fn fix(ctx: &AppContext, config: &FixerConfig) -> Result<Outcome, FixError> {
    let (plan, remaining) = plan(config)?;

    if remaining > 0 {
        ctx.print_warning(&format!(
            "{} more misnamed director(ies) left untouched; only the first is handled per run",
            remaining
        ));
    }

    apply(ctx, plan)
}
