//! PII matches attributed to source files

use super::entity::EntityType;
use serde::Serialize;

/// A detected PII entity tied to its source file and page
///
/// Offsets are character offsets within the page text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PiiMatch {
    /// Source file display name
    pub file: String,
    /// 1-based page number
    pub page: u32,
    /// Entity type
    pub entity_type: EntityType,
    /// Matched text as found in the document
    pub text: String,
    /// First character of the match within the page
    pub begin_offset: usize,
    /// One past the last character of the match within the page
    pub end_offset: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
}

impl PiiMatch {
    /// Key identifying the same span reported twice from overlapping chunks
    pub fn span_key(&self) -> (u32, usize, usize, &EntityType) {
        (
            self.page,
            self.begin_offset,
            self.end_offset,
            &self.entity_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_key_ignores_score_and_text() {
        let a = PiiMatch {
            file: "a.pdf".to_string(),
            page: 1,
            entity_type: EntityType::Ssn,
            text: "123-45-6789".to_string(),
            begin_offset: 10,
            end_offset: 21,
            score: 0.9,
        };
        let mut b = a.clone();
        b.score = 0.99;
        assert_eq!(a.span_key(), b.span_key());

        b.page = 2;
        assert_ne!(a.span_key(), b.span_key());
    }
}
