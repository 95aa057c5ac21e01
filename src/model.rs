/// Identifying attributes of one stored file at comparison time.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Epoch seconds. For deletion candidates this is the deletion time.
    pub last_modified: i64,
}

/// Course and section a file belongs to. Candidate pools are scoped to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub course_id: i64,
    pub section_id: i64,
}

/// Opaque storage key, usable to retrieve file content or delete a backup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle(pub String);

/// Which candidate pool an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePool {
    /// Soft deleted, still physically present.
    Pending,
    /// Finalized deletion retained in the short-lived backup area.
    Backup,
}

/// A removed file being evaluated as the predecessor of a new upload.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub metadata: FileMetadata,
    pub content_hash: String,
    pub handle: FileHandle,
    pub scope: Scope,
    /// Upload slot the backup originated from. Pending deletions carry `None`;
    /// backups use it for the definite-predecessor check.
    pub origin_slot: Option<i64>,
    pub pool: CandidatePool,
}

/// The newly uploaded file a predecessor is sought for.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub metadata: FileMetadata,
    pub content_hash: String,
    pub handle: FileHandle,
    pub scope: Scope,
    /// Identifier of the upload slot being written, matched against
    /// [`Candidate::origin_slot`].
    pub slot: i64,
}

/// A candidate together with its metadata similarity.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub similarity: f64,
}
