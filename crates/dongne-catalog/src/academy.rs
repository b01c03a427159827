//! Academy rows and listing filters
//!
//! An academy appears in the neighborhood listing when its coordinates fall
//! inside the neighborhood boundary. Address text plays no part in the match.

use crate::age::AgeGroup;
use crate::subjects::{canonical_subjects, Subject};
use dongne_geo::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Academy row as stored in the backend `academies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Academy {
    pub id: String,
    pub name: String,
    /// Lot-number address, display only
    pub address: String,
    #[serde(default)]
    pub address_road: Option<String>,
    #[serde(default)]
    pub address_sido: Option<String>,
    #[serde(default)]
    pub address_gugun: Option<String>,
    #[serde(default)]
    pub address_dong: Option<String>,
    /// Raw subject names
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Raw age group labels
    #[serde(default)]
    pub age_group: Option<Vec<String>>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
}

impl Academy {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn canonical_subjects(&self) -> Vec<Subject> {
        canonical_subjects(&self.subjects)
    }

    /// Recognized age groups; unknown labels are skipped
    pub fn age_groups(&self) -> Vec<AgeGroup> {
        self.age_group
            .iter()
            .flatten()
            .filter_map(|label| AgeGroup::parse(label))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Subject + age + area filter. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcademyFilter {
    pub subjects: BTreeSet<Subject>,
    pub age_groups: BTreeSet<AgeGroup>,
    pub boundary: Option<BoundingBox>,
}

impl AcademyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.insert(subject);
        self
    }

    pub fn with_age_group(mut self, group: AgeGroup) -> Self {
        self.age_groups.insert(group);
        self
    }

    pub fn within(mut self, boundary: BoundingBox) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn matches(&self, academy: &Academy) -> bool {
        if let Some(boundary) = &self.boundary {
            if !boundary.contains(&academy.position()) {
                return false;
            }
        }

        if !self.subjects.is_empty()
            && !academy
                .canonical_subjects()
                .iter()
                .any(|s| self.subjects.contains(s))
        {
            return false;
        }

        if !self.age_groups.is_empty()
            && !academy
                .age_groups()
                .iter()
                .any(|g| self.age_groups.contains(g))
        {
            return false;
        }

        true
    }

    /// Matching academies, input order preserved
    pub fn apply<'a>(&self, academies: &'a [Academy]) -> Vec<&'a Academy> {
        let matched: Vec<&Academy> = academies.iter().filter(|a| self.matches(a)).collect();
        tracing::debug!(
            total = academies.len(),
            matched = matched.len(),
            "Applied academy filter"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn academy(id: &str, lat: f64, lng: f64, subjects: &[&str], ages: &[&str]) -> Academy {
        Academy {
            id: id.to_string(),
            name: format!("학원 {}", id),
            address: "인천 연수구 송도동".to_string(),
            address_road: None,
            address_sido: Some("인천".to_string()),
            address_gugun: Some("연수구".to_string()),
            address_dong: Some("송도동".to_string()),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            age_group: Some(ages.iter().map(|s| s.to_string()).collect()),
            lat,
            lng,
            image_url: None,
            ai_analysis: None,
        }
    }

    fn songdo() -> BoundingBox {
        BoundingBox::from_nominatim(&["37.37", "37.39", "126.64", "126.66"]).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let rows = vec![academy("a", 0.0, 0.0, &[], &[])];
        assert_eq!(AcademyFilter::new().apply(&rows).len(), 1);
    }

    #[test]
    fn test_boundary_filter_ignores_address_text() {
        let rows = vec![
            academy("inside", 37.38, 126.65, &["영어"], &["초등"]),
            academy("outside", 37.50, 127.00, &["영어"], &["초등"]),
        ];
        let filter = AcademyFilter::new().within(songdo());
        let ids: Vec<_> = filter.apply(&rows).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[test]
    fn test_subject_filter_uses_aliases() {
        let rows = vec![
            academy("robot", 37.38, 126.65, &["로봇"], &[]),
            academy("piano", 37.38, 126.65, &["피아노"], &[]),
        ];
        let filter = AcademyFilter::new().with_subject(Subject::Coding);
        let ids: Vec<_> = filter.apply(&rows).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["robot"]);
    }

    #[test]
    fn test_combined_filters() {
        let rows = vec![
            academy("match", 37.38, 126.65, &["수학"], &["중등", "고등"]),
            academy("wrong-age", 37.38, 126.65, &["수학"], &["유치"]),
            academy("no-ages", 37.38, 126.65, &["수학"], &[]),
        ];
        let filter = AcademyFilter::new()
            .within(songdo())
            .with_subject(Subject::Math)
            .with_age_group(AgeGroup::Middle);
        let ids: Vec<_> = filter.apply(&rows).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["match"]);
    }

    #[test]
    fn test_deserialize_sparse_row() {
        let row: Academy = serde_json::from_value(serde_json::json!({
            "id": "x1",
            "name": "송도 수학",
            "address": "인천 연수구 송도동 1-1",
            "lat": 37.38,
            "lng": 126.65
        }))
        .unwrap();
        assert!(row.subjects.is_empty());
        assert!(row.age_groups().is_empty());
        assert_eq!(row.position(), GeoPoint::new(37.38, 126.65));
    }
}
