//! Experience sub-score — stepped decay per year of shortfall.

/// Score per whole year of shortfall: covered → 100, within a year → 80,
/// within two → 60, within three → 40, anything beyond → 20.
pub(crate) fn score_experience(resume_years: f32, required_years: Option<f32>) -> (u32, f32) {
    let Some(required) = required_years else {
        // No requirement stated: unconstrained.
        return (100, 0.0);
    };

    let gap = required - resume_years;
    let score = if gap <= 0.0 {
        100
    } else if gap <= 1.0 {
        80
    } else if gap <= 2.0 {
        60
    } else if gap <= 3.0 {
        40
    } else {
        20
    };

    (score, gap.max(0.0))
}
