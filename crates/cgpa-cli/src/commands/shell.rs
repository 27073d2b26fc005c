//! The `cgpa shell` command: one session driven by stdin, a line at a time.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use cgpa_core::catalog;
use cgpa_core::engine::format_gpa;
use cgpa_core::{GradingSystemId, Session, SessionError};

use super::show::render_text;
use super::{close_session, open_session, warn_failures, Globals};

const HELP: &str = "Commands:
  system <ID>                     choose a grading system (see `cgpa systems`)
  course <NAME> <GRADE> <CREDIT>  add a course
  semester <PREVIOUS_GPA>         file a semester against the current GPA
  show                            list courses, GPA and CGPA
  clear                           remove all courses and results
  help                            show this message
  quit                            leave the shell";

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    session: Session,
    system: String,
}

pub async fn execute(globals: &Globals, system: Option<String>) -> Result<()> {
    let config = globals.load_config()?;
    let mut shell = Shell {
        session: open_session(&config).await?,
        system: String::new(),
    };
    if let Some(raw) = config.system_or_default(system.as_deref()) {
        shell.select_system(&raw);
    }
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell.handle(&line).await {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    close_session(shell.session).await;
    Ok(())
}

impl Shell {
    async fn handle(&mut self, line: &str) -> Flow {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Flow::Continue;
        };
        let args: Vec<&str> = words.collect();

        match command.to_ascii_lowercase().as_str() {
            "system" => match args.as_slice() {
                [id] => self.select_system(id),
                _ => println!("Usage: system <ID>"),
            },
            "course" => match args.as_slice() {
                [name @ .., grade, credit] if !name.is_empty() => {
                    let name = name.join(" ");
                    let outcome = self.session.add_course(&name, grade, credit, &self.system);
                    self.report(outcome, "GPA").await;
                }
                _ => println!("Usage: course <NAME> <GRADE> <CREDIT>"),
            },
            "semester" => match args.as_slice() {
                [previous] => {
                    let outcome = self.session.add_semester(previous);
                    self.report(outcome, "CGPA").await;
                }
                _ => println!("Usage: semester <PREVIOUS_GPA>"),
            },
            "show" => print!("{}", render_text(self.session.state())),
            "clear" => match self.session.clear() {
                Ok(()) => {
                    println!("Cleared all courses and results.");
                    warn_failures(&self.session.flush().await);
                }
                Err(e) => print_error(&e),
            },
            "help" | "?" => println!("{HELP}"),
            "quit" | "exit" => return Flow::Quit,
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
        Flow::Continue
    }

    fn select_system(&mut self, raw: &str) {
        match raw.parse::<GradingSystemId>() {
            Ok(id) => {
                self.system = id.code().to_string();
                println!("Grading system: {} ({})", catalog::system(id).name, id);
            }
            Err(e) => println!("Invalid input: {e}"),
        }
    }

    async fn report(&self, outcome: Result<f64, SessionError>, label: &str) {
        match outcome {
            Ok(value) => {
                println!("{label}: {}", format_gpa(value));
                warn_failures(&self.session.flush().await);
            }
            Err(e) => print_error(&e),
        }
    }
}

fn print_error(err: &SessionError) {
    match err.as_validation() {
        Some(v) => println!("Invalid input: {v}"),
        None => println!("Error: {err}"),
    }
}
