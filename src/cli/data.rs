//! Export and reset commands

use anyhow::Result;
use std::path::Path;

use habit_quest::store::SnapshotStore;

use super::Session;

/// Write an indented JSON copy of all data
pub fn export_command(session: &Session, dest: &Path) -> Result<()> {
    SnapshotStore::export(&session.tracker, dest)?;
    println!("Exported habit data to {}", dest.display());
    Ok(())
}

/// Delete all habits, achievements and progress. Requires `--yes`.
pub fn reset_command(session: &mut Session, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!("This will delete all habits, achievements, and progress. This cannot be undone.");
        println!("Run again with --yes to confirm.");
        return Ok(());
    }

    session.tracker.reset_all();
    session.store.remove()?;
    println!("All data has been reset. The next run starts fresh.");
    Ok(())
}
