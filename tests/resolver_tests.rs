use upload_changelog::config::AppConfig;
use upload_changelog::detector::{meta_similarity, UpdateDetector};
use upload_changelog::model::{
    Candidate, CandidatePool, FileHandle, FileMetadata, Scope, UploadedFile,
};

const NOW: i64 = 1_700_000_000;
const SCOPE: Scope = Scope {
    course_id: 7,
    section_id: 3,
};
const SLOT: i64 = 42;

fn metadata(name: &str, size: u64, mime: &str, modified: i64) -> FileMetadata {
    FileMetadata {
        name: name.to_string(),
        size_bytes: size,
        mime_type: mime.to_string(),
        last_modified: modified,
    }
}

fn upload(name: &str, size: u64, hash: &str) -> UploadedFile {
    UploadedFile {
        metadata: metadata(name, size, "application/pdf", NOW),
        content_hash: hash.to_string(),
        handle: FileHandle(format!("new-{name}")),
        scope: SCOPE,
        slot: SLOT,
    }
}

fn pending(name: &str, size: u64, deleted_ago: i64, hash: &str) -> Candidate {
    Candidate {
        metadata: metadata(name, size, "application/pdf", NOW - deleted_ago),
        content_hash: hash.to_string(),
        handle: FileHandle(format!("pending-{name}")),
        scope: SCOPE,
        origin_slot: None,
        pool: CandidatePool::Pending,
    }
}

fn backup(name: &str, size: u64, deleted_ago: i64, hash: &str, origin: Option<i64>) -> Candidate {
    Candidate {
        metadata: metadata(name, size, "application/pdf", NOW - deleted_ago),
        content_hash: hash.to_string(),
        handle: FileHandle(format!("backup-{name}")),
        scope: SCOPE,
        origin_slot: origin,
        pool: CandidatePool::Backup,
    }
}

#[test]
fn test_close_predecessor_is_detected() {
    let up = upload("report.pdf", 100_000, "h-new");
    let candidates = vec![pending("report_v1.pdf", 99_000, 10, "h-old")];

    let similarity = meta_similarity(&up.metadata, &candidates[0].metadata, NOW);
    assert!(similarity > 0.8, "similarity was {similarity}");

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &config);
    let resolution = detector.is_update(NOW).expect("predecessor expected");
    assert_eq!(resolution.candidate.metadata.name, "report_v1.pdf");
    assert!(!resolution.definite);
}

#[test]
fn test_unrelated_candidate_is_rejected() {
    let up = upload("report.pdf", 100_000, "h-new");
    let candidates = vec![pending("notes.pdf", 500, 3600, "h-notes")];

    let similarity = meta_similarity(&up.metadata, &candidates[0].metadata, NOW);
    assert!(similarity < 0.5, "similarity was {similarity}");

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &config);
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_update_threshold_is_strict() {
    let up = upload("report.pdf", 100_000, "h-new");
    let candidates = vec![pending("report_v1.pdf", 99_000, 10, "h-old")];
    let similarity = meta_similarity(&up.metadata, &candidates[0].metadata, NOW);

    // Winning similarity equal to the minimum is not enough.
    let at_threshold = AppConfig {
        min_similarity: similarity,
        ..AppConfig::default()
    };
    let detector = UpdateDetector::new(&up, &candidates, &[], &at_threshold);
    assert!(detector.is_update(NOW).is_none());
    assert!(detector.best_candidate(NOW).is_some());

    let below_threshold = AppConfig {
        min_similarity: similarity - 1e-9,
        ..AppConfig::default()
    };
    let detector = UpdateDetector::new(&up, &candidates, &[], &below_threshold);
    assert!(detector.is_update(NOW).is_some());
}

#[test]
fn test_definite_predecessor_bypasses_general_floor() {
    let up = upload("report.pdf", 100_000, "h-new");
    // Dissimilar name, half the size, deleted long ago: scores between the
    // definite floor (0.2) and the general minimum (0.5).
    let backups = vec![backup("zzzz", 60_000, 6000, "h-old", Some(SLOT))];

    let similarity = meta_similarity(&up.metadata, &backups[0].metadata, NOW);
    assert!(similarity > 0.2 && similarity < 0.5, "similarity was {similarity}");

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &[], &backups, &config);
    let resolution = detector.is_update(NOW).expect("definite predecessor expected");
    assert!(resolution.definite);
    assert_eq!(resolution.candidate.metadata.name, "zzzz");
}

#[test]
fn test_untagged_backup_needs_general_threshold() {
    let up = upload("report.pdf", 100_000, "h-new");
    // Same file as the definite-bypass test, but without the slot tag.
    let backups = vec![backup("zzzz", 60_000, 6000, "h-old", None)];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &[], &backups, &config);
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_tagged_backup_in_other_section_is_not_definite() {
    let up = upload("report.pdf", 100_000, "h-new");
    // Slot ids collide across sections; identity needs course and section too.
    let mut candidate = backup("report_v1.pdf", 99_000, 10, "h-old", Some(SLOT));
    candidate.scope = Scope {
        course_id: 99,
        section_id: 1,
    };
    let backups = vec![candidate];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &[], &backups, &config);
    assert!(detector.best_candidate(NOW).is_none());
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_definite_below_floor_falls_back_to_pool() {
    let up = upload("report.pdf", 100_000, "h-new");
    // Scores below the 0.2 floor, so slot identity alone does not carry it.
    let backups = vec![backup("zzzz", 40_000, 6000, "h-old", Some(SLOT))];

    let similarity = meta_similarity(&up.metadata, &backups[0].metadata, NOW);
    assert!(similarity <= 0.2, "similarity was {similarity}");

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &[], &backups, &config);
    let best = detector.best_candidate(NOW).expect("pool candidate expected");
    assert!(!best.definite);
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_identical_content_is_never_an_update() {
    // A pure metadata edit: same bytes under a new name.
    let hash = upload_changelog::hashing::content_hash(b"unchanged document body");
    let up = upload("report.pdf", 100_000, &hash);
    let candidates = vec![pending("report_old.pdf", 100_000, 10, &hash)];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &config);
    assert!(detector.is_update(NOW).is_none());

    // The hash check also guards the definite-predecessor path.
    let backups = vec![backup("report_old.pdf", 100_000, 10, &hash, Some(SLOT))];
    let detector = UpdateDetector::new(&up, &[], &backups, &config);
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_mime_gate_filters_candidates() {
    let up = upload("report.pdf", 100_000, "h-new");
    let mut candidate = pending("report_v1.pdf", 99_000, 10, "h-old");
    candidate.metadata.mime_type = "text/plain".to_string();
    let candidates = vec![candidate];

    let gated = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &gated);
    assert!(detector.is_update(NOW).is_none());

    let relaxed = AppConfig::default().without_mime_gating();
    let detector = UpdateDetector::new(&up, &candidates, &[], &relaxed);
    assert!(detector.is_update(NOW).is_some());
}

#[test]
fn test_candidates_outside_scope_are_ignored() {
    let up = upload("report.pdf", 100_000, "h-new");
    let mut candidate = pending("report_v1.pdf", 99_000, 10, "h-old");
    candidate.scope = Scope {
        course_id: 7,
        section_id: 4,
    };
    let candidates = vec![candidate];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &config);
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_pool_tie_favors_pending() {
    let up = upload("report.pdf", 100_000, "h-new");
    let pendings = vec![pending("report_v1.pdf", 99_000, 10, "h-p")];
    let backups = vec![backup("report_v1.pdf", 99_000, 10, "h-b", None)];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &pendings, &backups, &config);
    let resolution = detector.is_update(NOW).expect("predecessor expected");
    assert_eq!(resolution.candidate.pool, CandidatePool::Pending);
}

#[test]
fn test_in_pool_tie_favors_first_seen() {
    let up = upload("report.pdf", 100_000, "h-new");
    let candidates = vec![
        pending("report_v1.pdf", 99_000, 10, "h-first"),
        pending("report_v1.pdf", 99_000, 10, "h-second"),
    ];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &candidates, &[], &config);
    let resolution = detector.is_update(NOW).expect("predecessor expected");
    assert_eq!(resolution.candidate.content_hash, "h-first");
}

#[test]
fn test_empty_pools_resolve_to_nothing() {
    let up = upload("report.pdf", 100_000, "h-new");
    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &[], &[], &config);
    assert!(detector.best_candidate(NOW).is_none());
    assert!(detector.is_update(NOW).is_none());
}

#[test]
fn test_higher_scoring_pool_wins() {
    let up = upload("report.pdf", 100_000, "h-new");
    let pendings = vec![pending("old_draft.pdf", 20_000, 3000, "h-p")];
    let backups = vec![backup("report_v1.pdf", 99_000, 10, "h-b", None)];

    let config = AppConfig::default();
    let detector = UpdateDetector::new(&up, &pendings, &backups, &config);
    let resolution = detector.is_update(NOW).expect("predecessor expected");
    assert_eq!(resolution.candidate.pool, CandidatePool::Backup);
    assert_eq!(resolution.candidate.metadata.name, "report_v1.pdf");
}
