//! File upkeep commands (fmt, backup, edit, config)

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde_json::json;

use super::app::Session;
use crate::storage::Config;

pub fn fmt(session: &Session) -> Result<()> {
    let mut month = session.archive.load(session.month, session.year)?;
    let before = session.archive.raw(session.month, session.year)?;

    month.cleanup();
    session.archive.store(&month)?;
    let after = session.archive.raw(session.month, session.year)?;

    if session.output.is_json() {
        session.output.data(&json!({
            "path": session.archive.month_path(session.month, session.year),
            "changed": before != after,
        }));
    } else {
        println!("Before formatting:\n");
        print!("{before}");
        println!("\nAfter formatting:\n");
        print!("{after}");
    }
    Ok(())
}

pub fn backup(session: &Session, dest: &Path) -> Result<()> {
    session.archive.load(session.month, session.year)?;
    session.archive.backup(session.month, session.year, dest)?;

    let path = session.archive.month_path(session.month, session.year);
    if session.output.is_json() {
        session.output.data(&json!({ "from": path, "to": dest }));
    } else {
        session
            .output
            .success(&format!("Copied {} to {}", path.display(), dest.display()));
    }
    Ok(())
}

pub fn edit(session: &Session) -> Result<()> {
    // materialize the file before handing it to the editor
    session.archive.load(session.month, session.year)?;
    let path = session.archive.month_path(session.month, session.year);
    open_in_editor(&session.config.editor(), &path)
}

pub fn config_cmd(session: &Session, reset: bool) -> Result<()> {
    let path = Config::path().context("Could not determine config directory")?;
    if reset || !path.exists() {
        Config::generate(&path)?;
        session
            .output
            .success(&format!("Wrote default config to {}", path.display()));
    }

    if session.output.is_json() {
        session.output.data(&json!({ "path": path }));
        return Ok(());
    }
    open_in_editor(&session.config.editor(), &path)
}

fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor}'"))?;
    if !status.success() {
        bail!("Editor '{editor}' exited with {status}");
    }
    Ok(())
}
