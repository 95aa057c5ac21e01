use crate::config::RECENCY_SATURATION_SECS;
use crate::model::FileMetadata;
use strsim::levenshtein;

const NAME_WEIGHT: f64 = 1.0;
const SIZE_WEIGHT: f64 = 1.0;
const RECENCY_WEIGHT: f64 = 0.5;

/// Metadata similarity between the new upload and one candidate, in [0, 1].
/// Weighted average of name, size and deletion-recency similarity; file
/// content is never inspected. `now` is the time of scoring.
pub fn meta_similarity(original: &FileMetadata, candidate: &FileMetadata, now: i64) -> f64 {
    let name = name_similarity(&original.name, &candidate.name);
    let size = size_similarity(original.size_bytes, candidate.size_bytes);
    let recency = recency_similarity(candidate.last_modified, now);

    (NAME_WEIGHT * name + SIZE_WEIGHT * size + RECENCY_WEIGHT * recency)
        / (NAME_WEIGHT + SIZE_WEIGHT + RECENCY_WEIGHT)
}

/// Edit distance relative to the longer name. Two empty names are identical.
pub fn name_similarity(first: &str, second: &str) -> f64 {
    let longest = first.chars().count().max(second.chars().count()).max(1);
    1.0 - levenshtein(first, second) as f64 / longest as f64
}

/// Relative difference between the two sizes. Two empty files are identical.
pub fn size_similarity(first: u64, second: u64) -> f64 {
    let largest = first.max(second);
    if largest == 0 {
        return 1.0;
    }
    1.0 - first.abs_diff(second) as f64 / largest as f64
}

/// 1.0 for candidates deleted within the last minute, decaying with age.
pub fn recency_similarity(candidate_modified: i64, now: i64) -> f64 {
    RECENCY_SATURATION_SECS as f64 / RECENCY_SATURATION_SECS.max(now - candidate_modified) as f64
}
