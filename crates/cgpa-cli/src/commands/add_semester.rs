//! The `cgpa add-semester` command.

use anyhow::Result;

use cgpa_core::engine::format_gpa;

use super::{close_session, open_session, Globals};

pub async fn execute(globals: &Globals, previous: String) -> Result<()> {
    let config = globals.load_config()?;
    let mut session = open_session(&config).await?;
    // Semesters are not saved, so a new invocation starts a fresh CGPA.
    let saved_cgpa = session.state().cgpa();
    let cgpa = session.add_semester(&previous)?;

    println!("CGPA: {}", format_gpa(cgpa));
    if let Some(saved) = saved_cgpa {
        eprintln!(
            "Note: replaced saved CGPA {}. Semesters only accumulate within `cgpa shell`.",
            format_gpa(saved)
        );
    }
    close_session(session).await;
    Ok(())
}
