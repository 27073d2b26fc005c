//! The `cgpa init` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cgpa_core::GradingSystemId;
use cgpa_store::{CgpaConfig, StoreConfig};

const CONFIG_FILE: &str = "cgpa.toml";

pub fn execute(system: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    let default_system = match system {
        Some(raw) => raw.parse::<GradingSystemId>()?,
        None => GradingSystemId::Nsu,
    };
    let config = CgpaConfig {
        default_system: Some(default_system.code().to_string()),
        store: StoreConfig::File {
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from("${HOME}/.local/share/cgpa")),
        },
    };

    let body = toml::to_string_pretty(&config).context("failed to serialize config")?;
    std::fs::write(CONFIG_FILE, format!("{HEADER}{body}"))
        .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Run: cgpa systems --system {default_system}");
    println!("  2. Run: cgpa add-course --name CSE220 --grade A- --credit 3");
    println!("  3. Run: cgpa show");

    Ok(())
}

const HEADER: &str = "# cgpa configuration
#
# default_system: grading system used when --system is omitted
#   (PUB, NSU, IUB, BRAC, UIU, ULAB, EDU, AIUB, PRI)
# [store] type: \"file\" (keeps data in data_dir) or \"memory\" (nothing saved)

";
