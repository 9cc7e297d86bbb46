//! Value objects shared across the pipeline stages.
//!
//! `ResumeModel` is produced once by the parser and then only read; the
//! scorer, planner, and patcher all borrow it. `JobModel` arrives from the
//! caller and is normalized before use.

pub mod job;
pub mod resume;

pub use job::{EducationLevel, JobModel};
pub use resume::{
    ContactInfo, EducationEntry, ResumeModel, Section, SectionKind, SkillCategory, WorkExperience,
};
