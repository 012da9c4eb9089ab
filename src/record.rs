//! The paper record produced by the crawler

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single extracted paper
///
/// Records are built in one shot by the detail extractor and are immutable
/// once returned; ownership passes entirely to the caller. The `url` field is
/// always the canonical detail-page URL and doubles as the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Canonical detail-page URL
    pub url: String,

    /// Paper title, never empty
    pub title: String,

    /// Author-supplied comment line; empty when the page carries none
    #[serde(default)]
    pub comment: String,

    /// Abstract text with newlines collapsed to spaces
    ///
    /// `None` when the detail page has no abstract block.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,

    /// Sectioned full text keyed by section id
    ///
    /// `None` when no HTML rendering is linked from the detail page (or its
    /// retrieval failed); an empty map when the rendering exists but contains
    /// no identified sections. The two are distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<BTreeMap<String, Section>>,
}

/// One section of a paper's full text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading with numbering labels removed
    pub title: String,

    /// Paragraph texts joined by newlines
    pub content: String,
}

impl PaperRecord {
    /// Returns true when the record carries sectioned full text
    pub fn has_full_content(&self) -> bool {
        self.full_content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PaperRecord {
        PaperRecord {
            url: "https://arxiv.org/abs/2401.00001".to_string(),
            title: "A Sample Paper".to_string(),
            comment: "10 pages, 3 figures".to_string(),
            abstract_text: Some("We study things.".to_string()),
            full_content: None,
        }
    }

    #[test]
    fn test_abstract_serializes_under_reserved_name() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"abstract\":\"We study things.\""));
        assert!(!json.contains("abstract_text"));
    }

    #[test]
    fn test_absent_full_content_omitted() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(!json.contains("full_content"));
    }

    #[test]
    fn test_empty_full_content_serialized_as_empty_map() {
        let mut record = sample_record();
        record.full_content = Some(BTreeMap::new());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"full_content\":{}"));
    }

    #[test]
    fn test_roundtrip_preserves_empty_map_distinction() {
        let mut record = sample_record();
        record.full_content = Some(BTreeMap::new());

        let json = serde_json::to_string(&record).unwrap();
        let parsed: PaperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.full_content, Some(BTreeMap::new()));

        let absent = sample_record();
        let json = serde_json::to_string(&absent).unwrap();
        let parsed: PaperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.full_content, None);
    }

    #[test]
    fn test_roundtrip_with_sections() {
        let mut sections = BTreeMap::new();
        sections.insert(
            "S1".to_string(),
            Section {
                title: "Introduction".to_string(),
                content: "First paragraph.\nSecond paragraph.".to_string(),
            },
        );
        let mut record = sample_record();
        record.full_content = Some(sections.clone());

        let json = serde_json::to_string(&record).unwrap();
        let parsed: PaperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.full_content, Some(sections));
        assert!(parsed.has_full_content());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"url":"https://arxiv.org/abs/1","title":"T"}"#;
        let parsed: PaperRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.comment, "");
        assert_eq!(parsed.abstract_text, None);
        assert_eq!(parsed.full_content, None);
    }
}
