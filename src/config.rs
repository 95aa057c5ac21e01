use crate::error::Error;
use config::{Config, File as ConfigFile};
use serde::Deserialize;

/// Saturation window for the deletion-recency factor: deletions younger than
/// this score 1.0, older ones decay as `60 / age`.
pub const RECENCY_SATURATION_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Master switch for changelog generation.
    pub changelog_enabled: bool,
    /// Switch for the optional diff-to-pages step.
    pub diff_enabled: bool,
    /// A general-pool winner must score strictly above this to count as an update.
    pub min_similarity: f64,
    /// A definite predecessor (same upload slot) must score strictly above this.
    pub definite_floor: f64,
    /// Require candidates to carry the exact MIME type of the new upload.
    pub mime_type_gating: bool,
    /// Longest rendered page list that is still worth sending; longer lists
    /// fall back to a changed-page count.
    pub summary_max_chars: usize,
    /// Label prepended to the rendered page list.
    pub diff_prefix: String,
    /// Files larger than this are never diffed. Zero disables the diff step.
    pub max_diff_filesize_mb: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            changelog_enabled: true,
            diff_enabled: true,
            min_similarity: 0.5,
            definite_floor: 0.2,
            mime_type_gating: true,
            summary_max_chars: 50,
            diff_prefix: "Changed pages: ".to_string(),
            max_diff_filesize_mb: 100,
        }
    }
}

impl AppConfig {
    /// Reject malformed thresholds before any resolution runs.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.min_similarity.is_finite() || !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(Error::InvalidConfig(format!(
                "min_similarity must be in [0, 1], got {}",
                self.min_similarity
            )));
        }
        if !self.definite_floor.is_finite() || !(0.0..=1.0).contains(&self.definite_floor) {
            return Err(Error::InvalidConfig(format!(
                "definite_floor must be in [0, 1], got {}",
                self.definite_floor
            )));
        }
        if self.summary_max_chars == 0 {
            return Err(Error::InvalidConfig(
                "summary_max_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Drop the MIME gate. Meant for flows whose candidate pool is already
    /// filtered by identity, such as an explicit "replace this file" edit.
    pub fn without_mime_gating(mut self) -> Self {
        self.mime_type_gating = false;
        self
    }

    /// Lower (or raise) the definite-predecessor floor.
    pub fn with_definite_floor(mut self, floor: f64) -> Self {
        self.definite_floor = floor;
        self
    }
}

pub fn load_configuration() -> Result<AppConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Changelog").required(false))
        .build()?;
    let config = builder.try_deserialize::<AppConfig>()?;
    config.validate()?;
    Ok(config)
}
