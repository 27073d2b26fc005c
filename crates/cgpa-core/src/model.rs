//! Core data model types for cgpa.
//!
//! These are the value objects the engine operates on: grading-system
//! identifiers, course records, semester summaries, and the session state
//! that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// Registered grading-system identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradingSystemId {
    Pub,
    Nsu,
    Iub,
    Brac,
    Uiu,
    Ulab,
    Edu,
    Aiub,
    Pri,
}

impl GradingSystemId {
    /// All identifiers, in presentation order.
    pub const ALL: [GradingSystemId; 9] = [
        GradingSystemId::Pub,
        GradingSystemId::Nsu,
        GradingSystemId::Iub,
        GradingSystemId::Brac,
        GradingSystemId::Uiu,
        GradingSystemId::Ulab,
        GradingSystemId::Edu,
        GradingSystemId::Aiub,
        GradingSystemId::Pri,
    ];

    /// The canonical upper-case code (e.g. "NSU").
    pub fn code(self) -> &'static str {
        match self {
            GradingSystemId::Pub => "PUB",
            GradingSystemId::Nsu => "NSU",
            GradingSystemId::Iub => "IUB",
            GradingSystemId::Brac => "BRAC",
            GradingSystemId::Uiu => "UIU",
            GradingSystemId::Ulab => "ULAB",
            GradingSystemId::Edu => "EDU",
            GradingSystemId::Aiub => "AIUB",
            GradingSystemId::Pri => "PRI",
        }
    }
}

impl fmt::Display for GradingSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GradingSystemId {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LookupError::NoSystem);
        }
        GradingSystemId::ALL
            .into_iter()
            .find(|id| id.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LookupError::UnknownSystem(trimmed.to_string()))
    }
}

/// Largest credit-hour value a single course may carry.
pub const MAX_CREDIT_HOURS: f64 = 100.0;

/// A single graded course. Immutable once appended to a session.
///
/// Serialized with the short field names of the persisted `courseList`
/// layout: `{course, grade, credit, point}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course name as entered (e.g. "CSE220").
    #[serde(rename = "course")]
    pub course_name: String,
    /// Grade label as typed by the user; matching is case-insensitive.
    #[serde(rename = "grade")]
    pub grade_label: String,
    /// Credit hours (positive, may be fractional).
    #[serde(rename = "credit")]
    pub credit_hours: f64,
    /// Grade point resolved when the record was created.
    #[serde(rename = "point")]
    pub grade_point: f64,
}

impl CourseRecord {
    /// Credit-weighted contribution of this course (`point × credit`).
    pub fn quality_points(&self) -> f64 {
        self.grade_point * self.credit_hours
    }

    /// Whether the record satisfies the model invariants. Used to filter
    /// hand-edited or corrupted persisted data.
    pub fn is_well_formed(&self) -> bool {
        !self.course_name.trim().is_empty()
            && self.credit_hours.is_finite()
            && self.credit_hours > 0.0
            && self.credit_hours <= MAX_CREDIT_HOURS
            && self.grade_point.is_finite()
            && self.grade_point >= 0.0
    }
}

/// A filed semester: the user-declared previous GPA and the GPA computed at
/// the time of filing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub prior_gpa: f64,
    pub computed_gpa: f64,
}

/// The in-memory source of truth for one running session.
///
/// Fields are only mutated by the functions in [`crate::engine`]; everything
/// else gets read-only access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) grading_system: Option<GradingSystemId>,
    pub(crate) courses: Vec<CourseRecord>,
    pub(crate) semesters: Vec<SemesterSummary>,
    pub(crate) gpa: Option<f64>,
    pub(crate) cgpa: Option<f64>,
}

impl SessionState {
    /// An empty state with nothing selected or computed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grading_system(&self) -> Option<GradingSystemId> {
        self.grading_system
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn semesters(&self) -> &[SemesterSummary] {
        &self.semesters
    }

    /// Full-precision semester GPA, if any course has been added.
    pub fn gpa(&self) -> Option<f64> {
        self.gpa
    }

    /// Full-precision CGPA, if any semester has been filed or restored.
    pub fn cgpa(&self) -> Option<f64> {
        self.cgpa
    }

    /// True when there is nothing to show or persist.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
            && self.semesters.is_empty()
            && self.gpa.is_none()
            && self.cgpa.is_none()
    }
}
