//! The `cgpa show` command.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use serde::Serialize;

use cgpa_core::engine::{format_gpa, total_credits};
use cgpa_core::{CourseRecord, SessionState};

use super::{close_session, open_session, Globals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    courses: &'a [CourseRecord],
    total_credits: f64,
    gpa: Option<f64>,
    cgpa: Option<f64>,
}

pub async fn execute(globals: &Globals, format: ShowFormat) -> Result<()> {
    let config = globals.load_config()?;
    let session = open_session(&config).await?;
    let state = session.state();

    match format {
        ShowFormat::Text => print!("{}", render_text(state)),
        ShowFormat::Json => {
            let output = ShowOutput {
                courses: state.courses(),
                total_credits: total_credits(state.courses()),
                gpa: state.gpa(),
                cgpa: state.cgpa(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    close_session(session).await;
    Ok(())
}

/// Course table followed by the GPA and CGPA lines.
pub fn render_text(state: &SessionState) -> String {
    let mut out = String::new();

    if state.courses().is_empty() {
        out.push_str("No courses recorded.\n");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Course", "Grade", "Credit", "Point"]);
        for course in state.courses() {
            table.add_row(vec![
                Cell::new(&course.course_name),
                Cell::new(&course.grade_label),
                Cell::new(course.credit_hours),
                Cell::new(format!("{:.2}", course.grade_point)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    out.push_str(&format!("GPA: {}\n", display(state.gpa())));
    out.push_str(&format!("CGPA: {}\n", display(state.cgpa())));
    out
}

fn display(value: Option<f64>) -> String {
    value.map(format_gpa).unwrap_or_else(|| "-".to_string())
}
