//! Transcript export with JSON persistence and markdown rendering.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog;
use crate::engine::{format_gpa, total_credits};
use crate::model::{CourseRecord, GradingSystemId, SemesterSummary, SessionState};

/// A point-in-time export of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique transcript identifier.
    pub id: Uuid,
    /// When the transcript was created.
    pub created_at: DateTime<Utc>,
    /// Grading system chosen in the session, if any.
    pub grading_system: Option<GradingSystemId>,
    /// Courses in insertion order.
    pub courses: Vec<CourseRecord>,
    /// Semesters filed in this session.
    pub semesters: Vec<SemesterSummary>,
    /// Sum of credit hours over `courses`.
    pub total_credits: f64,
    /// Full-precision GPA.
    pub gpa: Option<f64>,
    /// Full-precision CGPA.
    pub cgpa: Option<f64>,
}

impl Transcript {
    /// Capture the current session state.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            grading_system: state.grading_system(),
            courses: state.courses().to_vec(),
            semesters: state.semesters().to_vec(),
            total_credits: total_credits(state.courses()),
            gpa: state.gpa(),
            cgpa: state.cgpa(),
        }
    }

    /// Save the transcript as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize transcript")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        Ok(())
    }

    /// Load a transcript from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript from {}", path.display()))?;
        let transcript: Transcript =
            serde_json::from_str(&content).context("failed to parse transcript JSON")?;
        Ok(transcript)
    }

    /// Format the transcript as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Transcript\n\n");
        let _ = writeln!(md, "Generated {}\n", self.created_at.format("%Y-%m-%d %H:%M UTC"));
        if let Some(id) = self.grading_system {
            let _ = writeln!(md, "**Grading system:** {} ({})\n", catalog::system(id).name, id);
        }

        if !self.courses.is_empty() {
            md.push_str("| Course | Grade | Credit | Point |\n");
            md.push_str("|--------|-------|--------|-------|\n");
            for c in &self.courses {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {:.2} |",
                    c.course_name, c.grade_label, c.credit_hours, c.grade_point
                );
            }
            md.push('\n');
        }

        if !self.semesters.is_empty() {
            md.push_str("| Semester | Previous GPA | Computed GPA |\n");
            md.push_str("|----------|--------------|--------------|\n");
            for (i, s) in self.semesters.iter().enumerate() {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} |",
                    i + 1,
                    format_gpa(s.prior_gpa),
                    format_gpa(s.computed_gpa)
                );
            }
            md.push('\n');
        }

        let _ = writeln!(md, "**Total credits:** {}", self.total_credits);
        let _ = writeln!(md, "**GPA:** {}", display(self.gpa));
        let _ = writeln!(md, "**CGPA:** {}", display(self.cgpa));
        md
    }
}

fn display(value: Option<f64>) -> String {
    value.map(format_gpa).unwrap_or_else(|| "-".to_string())
}
