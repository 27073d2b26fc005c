//! The `cgpa systems` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use cgpa_core::catalog;
use cgpa_core::GradingSystemId;

pub fn execute(system: Option<String>) -> Result<()> {
    match system {
        Some(id) => {
            let id: GradingSystemId = id.parse()?;
            let system = catalog::system(id);
            println!("{} ({})", system.name, system.id);

            let mut table = Table::new();
            table.set_header(vec!["Grade", "Point"]);
            for (label, point) in system.scale {
                table.add_row(vec![Cell::new(label), Cell::new(format!("{point:.2}"))]);
            }
            println!("{table}");
        }
        None => {
            let mut table = Table::new();
            table.set_header(vec!["Code", "Name", "Grades"]);
            for system in catalog::systems() {
                table.add_row(vec![
                    Cell::new(system.id),
                    Cell::new(system.name),
                    Cell::new(system.labels().collect::<Vec<_>>().join(" ")),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
