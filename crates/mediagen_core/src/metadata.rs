//! Metadata records and the builder that fills them.
//!
//! Downstream tooling consumes metadata as an ordered flag sequence, so the
//! record keeps a fixed field order: title, album, artist, comment,
//! description, genre, composer, copyright, synopsis.

use crate::models::{MetadataPolicy, TagOverrides};
use crate::textgen::TextGenerator;

/// Longest generated value for core and short fields.
const MAX_FIELD_LEN: usize = 12;
/// Longest generated value for long-form fields.
const MAX_TEXT_LEN: usize = 32;

/// A complete, ordered set of the nine tag fields.
///
/// Every field is always present; unset fields were filled by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub comment: String,
    pub description: String,
    pub genre: String,
    pub composer: String,
    pub copyright: String,
    pub synopsis: String,
}

impl MetadataRecord {
    /// The nine fields in their fixed flag order.
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("title", &self.title),
            ("album", &self.album),
            ("artist", &self.artist),
            ("comment", &self.comment),
            ("description", &self.description),
            ("genre", &self.genre),
            ("composer", &self.composer),
            ("copyright", &self.copyright),
            ("synopsis", &self.synopsis),
        ]
    }
}

/// Builds complete metadata records from partial caller input.
pub struct MetadataBuilder {
    textgen: TextGenerator,
}

impl MetadataBuilder {
    /// Builder with entropy-seeded text generation.
    pub fn new() -> Self {
        Self {
            textgen: TextGenerator::new(),
        }
    }

    /// Builder with a fixed seed for reproducible records.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            textgen: TextGenerator::with_seed(seed),
        }
    }

    /// Fill a complete record.
    ///
    /// Pinned core fields are taken verbatim; unpinned core fields are
    /// generated. Non-core fields follow the policy: random text, or the
    /// field's own name as a predictable placeholder.
    pub fn build(&mut self, tags: &TagOverrides, policy: MetadataPolicy) -> MetadataRecord {
        let title = self.core_field(&tags.title);
        let album = self.core_field(&tags.album);
        let artist = self.core_field(&tags.artist);

        match policy {
            MetadataPolicy::Random => MetadataRecord {
                title,
                album,
                artist,
                comment: self.textgen.generate(1, MAX_TEXT_LEN),
                description: self.textgen.generate(1, MAX_TEXT_LEN),
                genre: self.textgen.generate(1, MAX_FIELD_LEN),
                composer: self.textgen.generate(1, MAX_FIELD_LEN),
                copyright: self.textgen.generate(1, MAX_FIELD_LEN),
                synopsis: self.textgen.generate(1, MAX_TEXT_LEN),
            },
            MetadataPolicy::Placeholder => MetadataRecord {
                title,
                album,
                artist,
                comment: "comment".to_string(),
                description: "description".to_string(),
                genre: "genre".to_string(),
                composer: "composer".to_string(),
                copyright: "copyright".to_string(),
                synopsis: "synopsis".to_string(),
            },
        }
    }

    fn core_field(&mut self, pinned: &Option<String>) -> String {
        match pinned {
            Some(value) => value.clone(),
            None => self.textgen.generate(1, MAX_FIELD_LEN),
        }
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}
