//! Subject canonicalization
//!
//! Raw subject names arrive from the academy table in many spellings. Filters
//! and map markers group them onto ten canonical subjects through a static
//! alias table; results are ordered by [`SUBJECT_LIST`].

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical subject. Variant order is the declared display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Subject {
    English,
    Math,
    Science,
    Korean,
    Essay,
    Coding,
    Music,
    Art,
    Sports,
    Dance,
}

/// Canonical subjects in declared order
pub const SUBJECT_LIST: [Subject; 10] = [
    Subject::English,
    Subject::Math,
    Subject::Science,
    Subject::Korean,
    Subject::Essay,
    Subject::Coding,
    Subject::Music,
    Subject::Art,
    Subject::Sports,
    Subject::Dance,
];

/// Alias → canonical subject. Every canonical name also maps to itself.
const ALIASES: &[(&str, Subject)] = &[
    ("영어", Subject::English),
    ("수학", Subject::Math),
    ("과학", Subject::Science),
    ("국어", Subject::Korean),
    ("논술", Subject::Essay),
    ("코딩", Subject::Coding),
    ("로봇", Subject::Coding),
    ("음악", Subject::Music),
    ("피아노", Subject::Music),
    ("미술", Subject::Art),
    ("디자인", Subject::Art),
    ("스포츠", Subject::Sports),
    ("축구", Subject::Sports),
    ("농구", Subject::Sports),
    ("수영", Subject::Sports),
    ("체육", Subject::Sports),
    ("무용", Subject::Dance),
    ("발레", Subject::Dance),
    ("현대무용", Subject::Dance),
    ("댄스", Subject::Dance),
];

impl Subject {
    /// Display label as stored in the backend
    pub fn label(&self) -> &'static str {
        match self {
            Subject::English => "영어",
            Subject::Math => "수학",
            Subject::Science => "과학",
            Subject::Korean => "국어",
            Subject::Essay => "논술",
            Subject::Coding => "코딩",
            Subject::Music => "음악",
            Subject::Art => "미술",
            Subject::Sports => "스포츠",
            Subject::Dance => "무용",
        }
    }

    /// Fold a raw subject name (canonical label or alias) onto its canonical
    /// subject. Matching is exact.
    pub fn canonical(raw: &str) -> Option<Subject> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, subject)| *subject)
    }

    /// Position in [`SUBJECT_LIST`]
    pub fn order(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subject {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        Subject::canonical(s).ok_or_else(|| CatalogError::UnknownSubject(s.to_string()))
    }
}

impl TryFrom<String> for Subject {
    type Error = CatalogError;

    fn try_from(value: String) -> CatalogResult<Self> {
        value.parse()
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.label().to_string()
    }
}

/// True for canonical labels and aliases alike
pub fn is_valid_subject(raw: &str) -> bool {
    Subject::canonical(raw).is_some()
}

/// Raw subjects worth showing on cards: recognized names only, original
/// spelling and order preserved
pub fn display_subjects<S: AsRef<str>>(raws: &[S]) -> Vec<String> {
    raws.iter()
        .map(AsRef::as_ref)
        .filter(|raw| is_valid_subject(raw))
        .map(str::to_string)
        .collect()
}

/// Canonical subjects for filters and map markers: deduplicated, in
/// [`SUBJECT_LIST`] order
pub fn canonical_subjects<S: AsRef<str>>(raws: &[S]) -> Vec<Subject> {
    raws.iter()
        .filter_map(|raw| Subject::canonical(raw.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Representative subject for a map marker: the first raw subject, folded
pub fn primary_subject<S: AsRef<str>>(raws: &[S]) -> Option<Subject> {
    raws.first().and_then(|raw| Subject::canonical(raw.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_canonical_label_maps_to_itself() {
        for subject in SUBJECT_LIST {
            assert_eq!(Subject::canonical(subject.label()), Some(subject));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Subject::canonical("로봇"), Some(Subject::Coding));
        assert_eq!(Subject::canonical("피아노"), Some(Subject::Music));
        assert_eq!(Subject::canonical("수영"), Some(Subject::Sports));
        assert_eq!(Subject::canonical("현대무용"), Some(Subject::Dance));
        assert_eq!(Subject::canonical("바둑"), None);
        assert_eq!(Subject::canonical(" 영어"), None);
    }

    #[test]
    fn test_canonical_subjects_dedup_and_order() {
        let raws = ["축구", "피아노", "영어", "수영", "바둑", "로봇"];
        assert_eq!(
            canonical_subjects(&raws),
            vec![Subject::English, Subject::Coding, Subject::Music, Subject::Sports]
        );
        assert!(canonical_subjects::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_display_subjects_keeps_raw_names() {
        let raws = ["바둑", "로봇", "영어"];
        assert_eq!(display_subjects(&raws), vec!["로봇".to_string(), "영어".to_string()]);
    }

    #[test]
    fn test_primary_subject() {
        assert_eq!(primary_subject(&["발레", "영어"]), Some(Subject::Dance));
        assert_eq!(primary_subject(&["바둑", "영어"]), None);
        assert_eq!(primary_subject::<&str>(&[]), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_value(Subject::Coding).unwrap();
        assert_eq!(json, serde_json::json!("코딩"));
        let parsed: Subject = serde_json::from_value(serde_json::json!("로봇")).unwrap();
        assert_eq!(parsed, Subject::Coding);
        assert!(serde_json::from_value::<Subject>(serde_json::json!("바둑")).is_err());
    }
}
