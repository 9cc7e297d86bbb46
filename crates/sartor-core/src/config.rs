//! Run configuration: heuristic dictionaries and tuning knobs.
//!
//! Every vocabulary the parser, scorer, and patcher consult lives here as
//! data, with embedded defaults. Deployments can replace any list from a
//! JSON file without touching code; omitted fields keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::SectionKind;

// ────────────────────────────────────────────────────────────────────────────
// Default dictionaries
// ────────────────────────────────────────────────────────────────────────────

const SUMMARY_HEADERS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "objective",
    "about",
    "about me",
];

const SKILLS_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "technologies",
    "areas of expertise",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "employment history",
    "work history",
];

const EDUCATION_HEADERS: &[&str] = &["education", "academic background"];

const CERTIFICATION_HEADERS: &[&str] = &[
    "certifications",
    "certificates",
    "licenses",
    "licenses & certifications",
];

/// Technology terms recognized in job descriptions when ranking rewrite
/// keywords. Lowercase; matched as substrings of lowercased description text.
const TECH_TERMS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "golang",
    "c++",
    "c#",
    "ruby",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "elasticsearch",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "linux",
    "react",
    "angular",
    "vue",
    "node",
    "django",
    "flask",
    "spring",
    "rails",
    "graphql",
    "grpc",
    "rest",
    "microservices",
    "ci/cd",
    "jenkins",
    "airflow",
    "spark",
    "hadoop",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "machine learning",
    "data pipelines",
];

/// Words excluded from keyword frequency analysis and title token overlap.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can",
    "for", "from", "has", "have", "if", "in", "into", "is", "it", "its",
    "more", "not", "of", "on", "or", "our", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "to", "was", "we",
    "were", "will", "with", "you", "your", "able", "about", "across",
    "after", "all", "also", "any", "both", "each", "job", "new", "other",
    "per", "plus", "role", "some", "such", "team", "us", "what", "when",
    "which", "while", "who", "work", "working", "years",
];

/// Role-domain words used for the title domain boost.
const TITLE_DOMAIN_KEYWORDS: &[&str] = &[
    "software",
    "engineer",
    "developer",
    "engineering",
    "data",
    "product",
    "designer",
    "design",
    "manager",
    "analyst",
    "scientist",
    "architect",
    "devops",
    "security",
    "frontend",
    "backend",
    "fullstack",
    "mobile",
    "cloud",
    "platform",
    "qa",
    "test",
    "machine",
    "learning",
    "research",
    "support",
    "network",
    "systems",
    "site",
    "reliability",
];

/// Seniority markers, used for the title seniority fallback.
const SENIORITY_KEYWORDS: &[&str] = &[
    "intern",
    "junior",
    "associate",
    "mid",
    "senior",
    "staff",
    "principal",
    "lead",
    "head",
    "director",
    "vp",
    "chief",
];

/// Verbs that typically open an accomplishment bullet. A line starting with
/// one of these is never treated as a company or title line.
const IMPERATIVE_VERBS: &[&str] = &[
    "led",
    "built",
    "managed",
    "developed",
    "designed",
    "created",
    "implemented",
    "improved",
    "reduced",
    "increased",
    "launched",
    "delivered",
    "owned",
    "architected",
    "maintained",
    "collaborated",
    "drove",
    "shipped",
    "spearheaded",
    "established",
    "automated",
    "optimized",
    "migrated",
    "mentored",
    "partnered",
    "scaled",
    "wrote",
    "tested",
    "deployed",
    "supported",
];

/// Characters that mark a bullet line after trimming.
const BULLET_GLYPHS: &[&str] = &["-", "*", "•", "●", "▪", "‣", "·", "◦", "–", "—", ">"];

/// Section labels that close an experience block when patching: once one of
/// these appears, no later text node belongs to any company window.
const TERMINAL_LABELS: &[&str] = &[
    "education",
    "certifications",
    "certificates",
    "projects",
    "publications",
    "awards",
    "volunteer",
    "references",
    "additional information",
];

const EMAIL_PLACEHOLDERS: &[&str] = &[
    "email@example.com",
    "your.email@example.com",
    "youremail@example.com",
    "name@email.com",
    "firstname.lastname@email.com",
];

const PHONE_PLACEHOLDERS: &[&str] = &[
    "(000) 000-0000",
    "000-000-0000",
    "(123) 456-7890",
    "123-456-7890",
    "555-555-5555",
];

const LINK_PLACEHOLDERS: &[&str] = &[
    "linkedin.com/in/yourname",
    "linkedin.com/in/username",
    "github.com/username",
    "yourwebsite.com",
];

// ────────────────────────────────────────────────────────────────────────────
// Heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Placeholder contact strings that templates carry before personalization.
/// The patcher replaces any of these with the parsed resume's real values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPlaceholders {
    #[serde(default = "default_email_placeholders")]
    pub email: Vec<String>,
    #[serde(default = "default_phone_placeholders")]
    pub phone: Vec<String>,
    #[serde(default = "default_link_placeholders")]
    pub link: Vec<String>,
}

impl Default for ContactPlaceholders {
    fn default() -> Self {
        ContactPlaceholders {
            email: default_email_placeholders(),
            phone: default_phone_placeholders(),
            link: default_link_placeholders(),
        }
    }
}

/// All heuristic dictionaries, loadable as one JSON document. A file that
/// sets only some fields inherits the embedded defaults for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    #[serde(default = "default_summary_headers")]
    pub summary_headers: Vec<String>,
    #[serde(default = "default_skills_headers")]
    pub skills_headers: Vec<String>,
    #[serde(default = "default_experience_headers")]
    pub experience_headers: Vec<String>,
    #[serde(default = "default_education_headers")]
    pub education_headers: Vec<String>,
    #[serde(default = "default_certification_headers")]
    pub certification_headers: Vec<String>,
    #[serde(default = "default_tech_terms")]
    pub tech_terms: Vec<String>,
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    #[serde(default = "default_title_domain_keywords")]
    pub title_domain_keywords: Vec<String>,
    #[serde(default = "default_seniority_keywords")]
    pub seniority_keywords: Vec<String>,
    #[serde(default = "default_imperative_verbs")]
    pub imperative_verbs: Vec<String>,
    #[serde(default = "default_bullet_glyphs")]
    pub bullet_glyphs: Vec<String>,
    #[serde(default = "default_terminal_labels")]
    pub terminal_labels: Vec<String>,
    #[serde(default)]
    pub contact_placeholders: ContactPlaceholders,
}

impl Default for Heuristics {
    fn default() -> Self {
        Heuristics {
            summary_headers: default_summary_headers(),
            skills_headers: default_skills_headers(),
            experience_headers: default_experience_headers(),
            education_headers: default_education_headers(),
            certification_headers: default_certification_headers(),
            tech_terms: default_tech_terms(),
            stop_words: default_stop_words(),
            title_domain_keywords: default_title_domain_keywords(),
            seniority_keywords: default_seniority_keywords(),
            imperative_verbs: default_imperative_verbs(),
            bullet_glyphs: default_bullet_glyphs(),
            terminal_labels: default_terminal_labels(),
            contact_placeholders: ContactPlaceholders::default(),
        }
    }
}

impl Heuristics {
    pub fn from_json_str(json: &str) -> Result<Heuristics, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Heuristics, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Maps a heading line to its section kind via the header vocabularies.
    /// The line is normalized first (trimmed, trailing colon stripped,
    /// lowercased); `None` means the line is not a recognized heading.
    pub fn section_kind_of(&self, line: &str) -> Option<SectionKind> {
        let normalized = normalize_header(line);
        if normalized.is_empty() {
            return None;
        }
        let lists = [
            (&self.summary_headers, SectionKind::Summary),
            (&self.skills_headers, SectionKind::Skills),
            (&self.experience_headers, SectionKind::Experience),
            (&self.education_headers, SectionKind::Education),
            (&self.certification_headers, SectionKind::Certifications),
        ];
        for (vocabulary, kind) in lists {
            if vocabulary.iter().any(|h| h == &normalized) {
                return Some(kind);
            }
        }
        None
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.iter().any(|w| w == word)
    }
}

/// Canonical form for heading comparison: trimmed, trailing colon stripped,
/// lowercased.
pub fn normalize_header(line: &str) -> String {
    line.trim().trim_end_matches(':').trim().to_lowercase()
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_summary_headers() -> Vec<String> {
    to_strings(SUMMARY_HEADERS)
}
fn default_skills_headers() -> Vec<String> {
    to_strings(SKILLS_HEADERS)
}
fn default_experience_headers() -> Vec<String> {
    to_strings(EXPERIENCE_HEADERS)
}
fn default_education_headers() -> Vec<String> {
    to_strings(EDUCATION_HEADERS)
}
fn default_certification_headers() -> Vec<String> {
    to_strings(CERTIFICATION_HEADERS)
}
fn default_tech_terms() -> Vec<String> {
    to_strings(TECH_TERMS)
}
fn default_stop_words() -> Vec<String> {
    to_strings(STOP_WORDS)
}
fn default_title_domain_keywords() -> Vec<String> {
    to_strings(TITLE_DOMAIN_KEYWORDS)
}
fn default_seniority_keywords() -> Vec<String> {
    to_strings(SENIORITY_KEYWORDS)
}
fn default_imperative_verbs() -> Vec<String> {
    to_strings(IMPERATIVE_VERBS)
}
fn default_bullet_glyphs() -> Vec<String> {
    to_strings(BULLET_GLYPHS)
}
fn default_terminal_labels() -> Vec<String> {
    to_strings(TERMINAL_LABELS)
}
fn default_email_placeholders() -> Vec<String> {
    to_strings(EMAIL_PLACEHOLDERS)
}
fn default_phone_placeholders() -> Vec<String> {
    to_strings(PHONE_PLACEHOLDERS)
}
fn default_link_placeholders() -> Vec<String> {
    to_strings(LINK_PLACEHOLDERS)
}

// ────────────────────────────────────────────────────────────────────────────
// Score weights and options
// ────────────────────────────────────────────────────────────────────────────

const WEIGHT_SUM_TOLERANCE: f32 = 1e-6;

/// Sub-score weights for the overall match score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f32,
    pub experience: f32,
    pub title: f32,
    pub keywords: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            skills: 0.40,
            experience: 0.25,
            title: 0.20,
            keywords: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Builds a custom weight set, rejecting any that does not sum to 1.0
    /// within tolerance. Weight problems surface here, at configuration
    /// time, never mid-pipeline.
    pub fn custom(
        skills: f32,
        experience: f32,
        title: f32,
        keywords: f32,
    ) -> Result<ScoreWeights, ConfigError> {
        let weights = ScoreWeights {
            skills,
            experience,
            title,
            keywords,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.skills + self.experience + self.title + self.keywords;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights { sum });
        }
        Ok(())
    }
}

/// Per-run scoring knobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    pub weights: ScoreWeights,
    /// Job titles the candidate explicitly wants. A posting whose title
    /// matches one of these scores the title dimension at maximum even if
    /// the resume's current title differs.
    #[serde(default)]
    pub desired_titles: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Planner and patcher options
// ────────────────────────────────────────────────────────────────────────────

/// Retry and timeout policy for external rewrite calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    /// Total attempts per experience batch, first try included.
    pub max_attempts: u32,
    /// First retry delay; doubles per subsequent retry (1s, 2s, 4s).
    pub backoff_base: Duration,
    /// Per-attempt deadline for one rewrite call.
    pub rewrite_timeout: Duration,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            rewrite_timeout: Duration::from_secs(30),
        }
    }
}

/// What to do when a plan carries more bullets for a company than the
/// document has bullet slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraBulletPolicy {
    /// Discard the extras and record a warning.
    #[default]
    Drop,
    /// Clone the company's last bullet paragraph once per extra bullet.
    /// Falls back to `Drop` (with a warning) when the paragraph markup
    /// cannot be scoped safely.
    Append,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchOptions {
    pub extra_bullets: ExtraBulletPolicy,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
