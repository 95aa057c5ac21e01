use super::scorer;
use crate::config::AppConfig;
use crate::model::{Candidate, ScoredCandidate, UploadedFile};
use tracing::debug;

/// Decides whether a newly uploaded file is an update of a recently removed
/// one, by scoring two candidate pools: pending deletions and backed-up
/// deletions. Synchronous and request scoped; pools are ordinary slices
/// gathered by the caller.
pub struct UpdateDetector<'a> {
    upload: &'a UploadedFile,
    pending: &'a [Candidate],
    backups: &'a [Candidate],
    config: &'a AppConfig,
}

/// A resolved predecessor. `definite` marks a match established by slot
/// identity rather than resemblance.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub candidate: Candidate,
    pub similarity: f64,
    pub definite: bool,
}

impl<'a> UpdateDetector<'a> {
    pub fn new(
        upload: &'a UploadedFile,
        pending: &'a [Candidate],
        backups: &'a [Candidate],
        config: &'a AppConfig,
    ) -> Self {
        Self {
            upload,
            pending,
            backups,
            config,
        }
    }

    /// Best predecessor regardless of the update threshold. Empty pools or
    /// fully gated-out pools yield `None`, never an error.
    pub fn best_candidate(&self, now: i64) -> Option<Resolution> {
        if let Some(definite) = self.definite_predecessor(now) {
            return Some(definite);
        }

        let best_pending = self.best_in_pool(self.pending, now);
        let best_backup = self.best_in_pool(self.backups, now);

        // Strict comparison against the backup pool: ties favor pending.
        let best = match (best_pending, best_backup) {
            (Some(pending), Some(backup)) => {
                if backup.similarity > pending.similarity {
                    Some(backup)
                } else {
                    Some(pending)
                }
            }
            (pending, backup) => pending.or(backup),
        };

        best.map(|scored| Resolution {
            candidate: scored.candidate,
            similarity: scored.similarity,
            definite: false,
        })
    }

    /// The public "is this an update" query. A general-pool winner must score
    /// strictly above the configured minimum; a definite predecessor bypasses
    /// that floor. Content-identical candidates are never updates: a pure
    /// metadata edit must not be reported as an update of itself.
    pub fn is_update(&self, now: i64) -> Option<Resolution> {
        let resolution = self.best_candidate(now)?;

        if resolution.candidate.content_hash == self.upload.content_hash {
            debug!(
                "candidate '{}' has identical content, not an update",
                resolution.candidate.metadata.name
            );
            return None;
        }

        if !resolution.definite && resolution.similarity <= self.config.min_similarity {
            debug!(
                "best similarity {:.3} does not exceed minimum {:.3}",
                resolution.similarity, self.config.min_similarity
            );
            return None;
        }

        Some(resolution)
    }

    /// A backup created from the very slot being written, in the same course
    /// section, establishes identity; weak resemblance above the floor is
    /// still a true positive. Below the floor the backup stays in the
    /// general pool. Slot ids are only unique within a section, so the scope
    /// comparison is part of the identity.
    fn definite_predecessor(&self, now: i64) -> Option<Resolution> {
        let backup = self.backups.iter().find(|candidate| {
            candidate.scope == self.upload.scope
                && candidate.origin_slot == Some(self.upload.slot)
        })?;

        let similarity = scorer::meta_similarity(&self.upload.metadata, &backup.metadata, now);
        if similarity > self.config.definite_floor {
            debug!(
                "definite predecessor '{}' for slot {} (similarity {:.3})",
                backup.metadata.name, self.upload.slot, similarity
            );
            return Some(Resolution {
                candidate: backup.clone(),
                similarity,
                definite: true,
            });
        }
        None
    }

    fn best_in_pool(&self, pool: &[Candidate], now: i64) -> Option<ScoredCandidate> {
        let mut best: Option<ScoredCandidate> = None;

        for candidate in pool {
            if candidate.scope != self.upload.scope {
                continue;
            }
            if self.config.mime_type_gating
                && candidate.metadata.mime_type != self.upload.metadata.mime_type
            {
                continue;
            }

            let similarity =
                scorer::meta_similarity(&self.upload.metadata, &candidate.metadata, now);

            // Strict comparison: the first-seen candidate wins a tie.
            if best
                .as_ref()
                .map_or(true, |current| similarity > current.similarity)
            {
                best = Some(ScoredCandidate {
                    candidate: candidate.clone(),
                    similarity,
                });
            }
        }

        best
    }
}
