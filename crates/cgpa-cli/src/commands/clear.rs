//! The `cgpa clear` command.

use anyhow::Result;

use super::{close_session, open_session, Globals};

pub async fn execute(globals: &Globals) -> Result<()> {
    let config = globals.load_config()?;
    let mut session = open_session(&config).await?;
    session.clear()?;
    close_session(session).await;

    println!("Cleared all courses and results.");
    Ok(())
}
