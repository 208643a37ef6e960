use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::snapshot::RosterSnapshot;

/// Reads a roster snapshot exported from the hosted tables.
pub fn load_snapshot(path: &Path) -> AppResult<RosterSnapshot> {
    if !path.exists() {
        return Err(AppError::not_found());
    }

    let raw = std::fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&raw)?;

    info!(
        target: "app::snapshot",
        path = %path.display(),
        users = snapshot.users.len(),
        tasks = snapshot.tasks.len(),
        "snapshot loaded"
    );

    Ok(snapshot)
}

pub fn parse_snapshot(raw: &str) -> AppResult<RosterSnapshot> {
    let snapshot: RosterSnapshot = serde_json::from_str(raw)?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// Rejects rosters that list the same user twice.
pub fn validate_snapshot(snapshot: &RosterSnapshot) -> AppResult<()> {
    let mut seen = HashSet::new();
    for user in &snapshot.users {
        if user.id.trim().is_empty() {
            return Err(AppError::validation("roster entry has an empty user id"));
        }
        if !seen.insert(user.id.as_str()) {
            return Err(AppError::validation(format!(
                "duplicate roster entry: {}",
                user.id
            )));
        }
    }

    let orphaned = snapshot.orphaned_task_count();
    if orphaned > 0 {
        debug!(target: "app::snapshot", orphaned, "tasks not assigned to a rostered user");
    }

    Ok(())
}
