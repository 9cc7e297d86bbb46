//! Job posting model and its normalization pass.
//!
//! Callers hand in whatever they collected from a posting; `normalize`
//! produces the canonical form the scorer and planner consume. Skill sets
//! are `BTreeSet` so iteration order (and therefore every downstream score
//! detail list) is deterministic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Minimum education credential a posting asks for. Variant order is
/// ascending, so `derive(Ord)` gives credential comparison for free.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

/// A job posting. Absent optional fields mean "unconstrained", not "zero":
/// a posting without `experience_years` matches any amount of experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobModel {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
    #[serde(default)]
    pub preferred_skills: BTreeSet<String>,
    #[serde(default)]
    pub experience_years: Option<f32>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
}

impl JobModel {
    /// Canonicalizes the posting:
    /// - trims title/company/description whitespace
    /// - lowercases, trims, and de-duplicates both skill sets, dropping empties
    /// - removes required skills from the preferred set, so "preferred" always
    ///   means "preferred only"
    /// - clears nonsensical experience requirements (negative or non-finite),
    ///   leaving the field unconstrained
    pub fn normalize(mut self) -> JobModel {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();
        self.description = self.description.trim().to_string();

        self.required_skills = normalize_skill_set(&self.required_skills);
        self.preferred_skills = normalize_skill_set(&self.preferred_skills)
            .into_iter()
            .filter(|s| !self.required_skills.contains(s))
            .collect();

        self.experience_years = self
            .experience_years
            .filter(|y| y.is_finite() && *y >= 0.0);

        self
    }

    /// True when the posting names no skills at all. The skills sub-score
    /// falls back to its neutral value in this case.
    pub fn has_no_skill_requirements(&self) -> bool {
        self.required_skills.is_empty() && self.preferred_skills.is_empty()
    }
}

fn normalize_skill_set(skills: &BTreeSet<String>) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job() -> JobModel {
        JobModel {
            title: "  Backend Engineer ".to_string(),
            company: "Initech".to_string(),
            description: "We build things.".to_string(),
            required_skills: ["Rust", "  PostgreSQL  ", "rust", ""]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preferred_skills: ["Kubernetes", "RUST"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            experience_years: Some(3.0),
            education_level: Some(EducationLevel::Bachelor),
        }
    }

    #[test]
    fn test_normalize_lowercases_and_dedupes_skills() {
        let job = make_job().normalize();
        let required: Vec<&str> = job.required_skills.iter().map(String::as_str).collect();
        assert_eq!(required, vec!["postgresql", "rust"]);
    }

    #[test]
    fn test_normalize_removes_required_from_preferred() {
        let job = make_job().normalize();
        assert!(!job.preferred_skills.contains("rust"));
        assert!(job.preferred_skills.contains("kubernetes"));
    }

    #[test]
    fn test_normalize_trims_title() {
        let job = make_job().normalize();
        assert_eq!(job.title, "Backend Engineer");
    }

    #[test]
    fn test_normalize_clears_negative_experience_years() {
        let mut job = make_job();
        job.experience_years = Some(-2.0);
        assert_eq!(job.normalize().experience_years, None);
    }

    #[test]
    fn test_normalize_keeps_absent_fields_absent() {
        let job = JobModel {
            title: "Engineer".to_string(),
            ..Default::default()
        }
        .normalize();
        assert_eq!(job.experience_years, None);
        assert_eq!(job.education_level, None);
        assert!(job.has_no_skill_requirements());
    }

    #[test]
    fn test_education_levels_are_ordered() {
        assert!(EducationLevel::Master > EducationLevel::Bachelor);
        assert!(EducationLevel::HighSchool < EducationLevel::Doctorate);
    }

    #[test]
    fn test_job_deserializes_with_missing_optional_fields() {
        let job: JobModel =
            serde_json::from_str(r#"{"title": "Data Engineer"}"#).unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert!(job.required_skills.is_empty());
        assert_eq!(job.experience_years, None);
    }
}
