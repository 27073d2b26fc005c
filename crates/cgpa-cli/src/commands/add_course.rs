//! The `cgpa add-course` command.

use anyhow::Result;

use cgpa_core::engine::format_gpa;

use super::{close_session, open_session, Globals};

pub async fn execute(
    globals: &Globals,
    name: String,
    grade: String,
    credit: String,
    system: Option<String>,
) -> Result<()> {
    let config = globals.load_config()?;
    let system = config.system_or_default(system.as_deref()).unwrap_or_default();

    let mut session = open_session(&config).await?;
    let gpa = session.add_course(&name, &grade, &credit, &system)?;

    println!("GPA: {}", format_gpa(gpa));
    close_session(session).await;
    Ok(())
}
