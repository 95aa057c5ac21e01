use crate::config::AppConfig;
use crate::detector::UpdateDetector;
use crate::diff::{parse_diff, ChangeDistribution, DiffSummary, PageIndex};
use crate::error::Error;
use crate::model::{Candidate, CandidatePool, FileMetadata, UploadedFile};
use crate::sources::{DeletionBackupSource, LineDiffer, PendingDeletionSource, TextConverter};
use tracing::{debug, info, warn};

/// Page information attached to a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSummary {
    /// Rendered list, e.g. "Changed pages: 2, 4".
    Pages(String),
    /// Too many distinct pages changed to list; only the count is reported.
    PageCount(usize),
}

/// The changelog produced for one content-change event.
#[derive(Debug, Clone)]
pub struct ChangelogReport {
    pub predecessor: FileMetadata,
    pub similarity: f64,
    pub pages: Option<PageSummary>,
}

/// Runs one resolution request end to end:
/// 1. Gather the two candidate pools for the upload's course section
/// 2. Resolve the predecessor (or bail out with no changelog)
/// 3. Optionally diff the two documents into a page summary (size gated)
/// 4. Consume a matched backup so it cannot be matched twice
pub struct ChangelogEngine<'a> {
    config: &'a AppConfig,
    pending: &'a dyn PendingDeletionSource,
    backups: &'a dyn DeletionBackupSource,
    converter: Option<&'a dyn TextConverter>,
    differ: Option<&'a dyn LineDiffer>,
}

impl<'a> ChangelogEngine<'a> {
    pub fn new(
        config: &'a AppConfig,
        pending: &'a dyn PendingDeletionSource,
        backups: &'a dyn DeletionBackupSource,
    ) -> Self {
        Self {
            config,
            pending,
            backups,
            converter: None,
            differ: None,
        }
    }

    /// Attach the text-conversion and line-diff collaborators. Without them
    /// the engine still resolves predecessors but never reports page changes.
    pub fn with_diff(
        mut self,
        converter: &'a dyn TextConverter,
        differ: &'a dyn LineDiffer,
    ) -> Self {
        self.converter = Some(converter);
        self.differ = Some(differ);
        self
    }

    /// Like [`Self::process_upload`] with the current wall clock as the
    /// scoring time.
    pub fn process_upload_now(
        &self,
        upload: &UploadedFile,
    ) -> Result<Option<ChangelogReport>, Error> {
        self.process_upload(upload, chrono::Utc::now().timestamp())
    }

    /// Resolve the predecessor of `upload` and build its changelog. `Ok(None)`
    /// means "nothing to report"; a failed diff step only omits the page
    /// information, it never blocks the triggering operation.
    pub fn process_upload(
        &self,
        upload: &UploadedFile,
        now: i64,
    ) -> Result<Option<ChangelogReport>, Error> {
        if !self.config.changelog_enabled {
            return Ok(None);
        }

        let pending = gather(self.pending.pending_candidates(upload.scope));
        let backups = gather(self.backups.backup_candidates(upload.scope));
        debug!(
            "gathered {} pending and {} backup candidates for '{}'",
            pending.len(),
            backups.len(),
            upload.metadata.name,
        );

        let detector = UpdateDetector::new(upload, &pending, &backups, self.config);
        let resolution = match detector.is_update(now) {
            Some(resolution) => resolution,
            None => {
                debug!("no predecessor found for '{}'", upload.metadata.name);
                return Ok(None);
            }
        };
        info!(
            "'{}' is an update of '{}' (similarity {:.2})",
            upload.metadata.name, resolution.candidate.metadata.name, resolution.similarity,
        );

        let pages = self.generate_pages(upload, &resolution.candidate);
        self.consume(&resolution.candidate);

        Ok(Some(ChangelogReport {
            predecessor: resolution.candidate.metadata.clone(),
            similarity: resolution.similarity,
            pages,
        }))
    }

    /// The diff step is optional and size gated; every failure inside it
    /// degrades to "no page information".
    fn generate_pages(&self, upload: &UploadedFile, predecessor: &Candidate) -> Option<PageSummary> {
        if !self.config.diff_enabled {
            return None;
        }
        let converter = self.converter?;
        let differ = self.differ?;

        let limit = self.config.max_diff_filesize_mb.saturating_mul(1024 * 1024);
        if limit == 0
            || upload.metadata.size_bytes > limit
            || predecessor.metadata.size_bytes > limit
        {
            debug!(
                "skipping diff of '{}': beyond the {} MiB limit",
                upload.metadata.name, self.config.max_diff_filesize_mb,
            );
            return None;
        }

        let old_text = match converter.convert_to_text(&predecessor.handle) {
            Ok(path) => path,
            Err(e) => {
                warn!("cannot convert '{}' to text: {e}", predecessor.metadata.name);
                return None;
            }
        };
        let new_text = match converter.convert_to_text(&upload.handle) {
            Ok(path) => path,
            Err(e) => {
                warn!("cannot convert '{}' to text: {e}", upload.metadata.name);
                return None;
            }
        };

        let raw = match differ.diff_lines(&old_text, &new_text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("line diff failed: {e}");
                return None;
            }
        };

        let mut distribution = ChangeDistribution::new(
            PageIndex::from_path(&old_text),
            PageIndex::from_path(&new_text),
        );
        distribution.tally_all(&parse_diff(&raw));

        let summary = DiffSummary::new(
            &distribution,
            &self.config.diff_prefix,
            self.config.summary_max_chars,
        );
        let changed = summary.changed_page_count();
        if changed == 0 {
            return None;
        }
        if summary.has_acceptable_amount_of_changes() {
            Some(PageSummary::Pages(summary.render()))
        } else {
            Some(PageSummary::PageCount(changed))
        }
    }

    /// At-most-once consumption: a matched backup is removed so the next
    /// upload cannot match it again. Pending deletions are purged by their
    /// own flow and are left alone.
    fn consume(&self, candidate: &Candidate) {
        if candidate.pool != CandidatePool::Backup {
            return;
        }
        if let Err(e) = self.backups.delete_candidate(candidate) {
            warn!(
                "failed to delete consumed backup '{}': {e}",
                candidate.metadata.name
            );
        }
    }
}

/// Unreadable entries are skipped one by one, never aborting the resolution.
fn gather(entries: Vec<Result<Candidate, Error>>) -> Vec<Candidate> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                warn!("skipping unreadable candidate: {e}");
                None
            }
        })
        .collect()
}
