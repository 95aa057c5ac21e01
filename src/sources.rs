use crate::error::Error;
use crate::model::{Candidate, FileHandle, Scope};
use std::path::{Path, PathBuf};

/// Converts a stored file into a line-oriented text rendering on disk.
/// Failure means "diff unavailable" for this resolution, never a fatal error.
pub trait TextConverter {
    fn convert_to_text(&self, file: &FileHandle) -> Result<PathBuf, Error>;
}

/// External line-diff primitive. The output must use the classic
/// range-operation header format (`3,5c2`, `5a6,7`, `10d8`).
pub trait LineDiffer {
    fn diff_lines(&self, first: &Path, second: &Path) -> Result<String, Error>;
}

/// Files flagged for deletion but still physically present, scoped to one
/// course section. Entries that cannot be materialized are returned as
/// errors so the caller can skip them individually.
pub trait PendingDeletionSource {
    fn pending_candidates(&self, scope: Scope) -> Vec<Result<Candidate, Error>>;
}

/// Finalized deletions retained temporarily in a backup area, each tagged
/// with the upload slot it originated from.
pub trait DeletionBackupSource {
    fn backup_candidates(&self, scope: Scope) -> Vec<Result<Candidate, Error>>;

    /// Consumption hook: remove a matched backup so the next upload cannot
    /// match it again.
    fn delete_candidate(&self, candidate: &Candidate) -> Result<(), Error>;
}
