//! Aggregation engine.
//!
//! Pure functions over [`SessionState`]: each operation borrows the current
//! state and returns a new one, so a rejected input never leaves a
//! half-applied mutation behind. Derived values are kept at full precision;
//! rounding happens only in [`format_gpa`].

use crate::catalog;
use crate::error::ValidationError;
use crate::model::{
    CourseRecord, GradingSystemId, SemesterSummary, SessionState, MAX_CREDIT_HOURS,
};

/// Append a course and recompute the semester GPA.
///
/// Inputs are validated in field order (course, grade, credit) and the first
/// failure is returned. On success the new GPA is the credit-weighted mean
/// over every course in the returned state.
pub fn add_course(
    state: &SessionState,
    course_name: &str,
    grade_label: &str,
    credit_text: &str,
    system_id: &str,
) -> Result<(SessionState, f64), ValidationError> {
    let course_name = course_name.trim();
    if course_name.is_empty() {
        return Err(ValidationError::EmptyCourseName);
    }

    let system: GradingSystemId = system_id.parse()?;
    let grade_point = catalog::resolve(grade_label, system)?;
    let credit_hours = parse_credit(credit_text)?;

    let grade_label = grade_label.trim();
    let mut next = state.clone();
    next.grading_system = Some(system);
    next.courses.push(CourseRecord {
        course_name: course_name.to_string(),
        grade_label: grade_label.to_string(),
        credit_hours,
        grade_point,
    });

    // The course just pushed has credit > 0, so the total is never zero.
    let (quality_points, credits) = totals(&next.courses);
    let gpa = quality_points / credits;
    if !gpa.is_finite() {
        return Err(ValidationError::InvalidCredit(credit_text.trim().to_string()));
    }
    next.gpa = Some(gpa);

    tracing::debug!(
        "added {course_name} ({grade_label} = {grade_point}, {credit_hours} cr) under {system}; \
         gpa {gpa}"
    );
    Ok((next, gpa))
}

/// File a semester pairing `prior_gpa_text` with `current_gpa` and recompute
/// the CGPA as the mean of every declared and computed value.
///
/// `current_gpa` is the engine's last computed GPA; filing before any course
/// exists is rejected.
pub fn add_semester(
    state: &SessionState,
    prior_gpa_text: &str,
    current_gpa: Option<f64>,
) -> Result<(SessionState, f64), ValidationError> {
    let prior_gpa = parse_gpa(prior_gpa_text)?;
    let computed_gpa = current_gpa.ok_or(ValidationError::MissingCurrentGpa)?;

    let mut next = state.clone();
    next.semesters.push(SemesterSummary {
        prior_gpa,
        computed_gpa,
    });

    // Never empty after the push above.
    let cgpa = cumulative_gpa(&next.semesters).unwrap_or(computed_gpa);
    if !cgpa.is_finite() {
        return Err(ValidationError::InvalidPriorGpa(prior_gpa_text.trim().to_string()));
    }
    next.cgpa = Some(cgpa);

    tracing::debug!(
        "filed semester {} (prior {prior_gpa}, computed {computed_gpa}); cgpa {cgpa}",
        next.semesters.len()
    );
    Ok((next, cgpa))
}

/// Drop every course, semester, derived value, and the chosen grading system.
pub fn clear_all(_state: &SessionState) -> SessionState {
    SessionState::default()
}

/// `(Σ point × credit, Σ credit)` over `courses`.
pub fn totals(courses: &[CourseRecord]) -> (f64, f64) {
    courses.iter().fold((0.0, 0.0), |(points, credits), c| {
        (points + c.quality_points(), credits + c.credit_hours)
    })
}

/// Credit-weighted GPA, or `None` when there are no credits.
pub fn weighted_gpa(courses: &[CourseRecord]) -> Option<f64> {
    let (points, credits) = totals(courses);
    (credits > 0.0).then(|| points / credits)
}

/// Mean of every prior and computed GPA, or `None` with no semesters.
pub fn cumulative_gpa(semesters: &[SemesterSummary]) -> Option<f64> {
    if semesters.is_empty() {
        return None;
    }
    let sum: f64 = semesters.iter().map(|s| s.prior_gpa + s.computed_gpa).sum();
    Some(sum / (2 * semesters.len()) as f64)
}

/// Total credit hours across `courses`.
pub fn total_credits(courses: &[CourseRecord]) -> f64 {
    totals(courses).1
}

/// Parse credit hours: a strictly positive number no greater than
/// [`MAX_CREDIT_HOURS`].
pub fn parse_credit(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| *v > 0.0 && *v <= MAX_CREDIT_HOURS)
        .ok_or_else(|| ValidationError::InvalidCredit(text.trim().to_string()))
}

/// Parse a declared GPA: a finite, non-negative number.
pub fn parse_gpa(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ValidationError::InvalidPriorGpa(text.trim().to_string()))
}

/// Two-decimal display form used for every GPA/CGPA shown to a user.
pub fn format_gpa(value: f64) -> String {
    format!("{value:.2}")
}
