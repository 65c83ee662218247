//! Sentinel values for descriptions and images the lookups did not find.

use super::EnrichedSpecies;

/// Replacement text for a missing or disambiguation-only description.
pub const DEFAULT_MISSING_DESCRIPTION: &str = "Description not available";

/// Placeholder image for species without one.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn4.vectorstock.com/i/1000x1000/76/48/photo-not-found-icon-symbol-sign-vector-22437648.jpg";

/// Suffix of a disambiguation page extract.
pub const DEFAULT_AMBIGUOUS_SUFFIX: &str = "may refer to:";

/// Backfill values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillConfig {
    /// Text written where a description is missing or ambiguous
    pub missing_description: String,
    /// Image URL written where one is missing
    pub default_image_url: String,
    /// Descriptions ending with this are treated as missing
    pub ambiguous_suffix: String,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            missing_description: DEFAULT_MISSING_DESCRIPTION.to_string(),
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            ambiguous_suffix: DEFAULT_AMBIGUOUS_SUFFIX.to_string(),
        }
    }
}

impl BackfillConfig {
    /// Set the missing-description text.
    pub fn with_missing_description(mut self, text: impl Into<String>) -> Self {
        self.missing_description = text.into();
        self
    }

    /// Set the placeholder image URL.
    pub fn with_default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = url.into();
        self
    }
}

/// What [`backfill`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Descriptions that were absent
    pub missing_descriptions: usize,
    /// Descriptions replaced because they were disambiguation stubs
    pub ambiguous_descriptions: usize,
    /// Image URLs that were absent
    pub missing_images: usize,
}

/// Replace absent or ambiguous descriptions and absent images.
pub fn backfill(rows: &mut [EnrichedSpecies], config: &BackfillConfig) -> BackfillReport {
    let mut report = BackfillReport::default();

    for row in rows.iter_mut() {
        match row.description.as_deref() {
            None => {
                report.missing_descriptions += 1;
                row.description = Some(config.missing_description.clone());
            },
            Some(text) if text.ends_with(config.ambiguous_suffix.as_str()) => {
                report.ambiguous_descriptions += 1;
                log::debug!("Replacing ambiguous description for {}", row.unique_id);
                row.description = Some(config.missing_description.clone());
            },
            Some(_) => {},
        }

        if row.image_url.is_none() {
            report.missing_images += 1;
            row.image_url = Some(config.default_image_url.clone());
        }
    }

    log::info!(
        "Backfilled {} missing descriptions, {} ambiguous descriptions, {} missing images",
        report.missing_descriptions,
        report.ambiguous_descriptions,
        report.missing_images
    );
    report
}
