//! Handler functions for migration CLI commands.
//!
//! Implements `showcase migrations {list,plan,schema}` against the built-in
//! catalog migrations. Nothing here talks to the CMS.

use showcase_core::schema::{Migration, Migrator, Schema, catalog_migrations};
use showcase_core::{Error, Result};

use crate::cli::MigrationsAction;

/// Direction of a planned migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply the forward change.
    Up,
    /// Apply the inverse change.
    Down,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a migrations subcommand.
pub fn handle_migrations_command(action: MigrationsAction) -> Result<()> {
    let migrator = Migrator::new(catalog_migrations())?;
    match action {
        MigrationsAction::List => {
            for migration in migrator.migrations() {
                println!("{}  {}", migration.label(), migration.change.describe());
            }
            Ok(())
        }
        MigrationsAction::Plan { from, to } => {
            let steps = plan(&migrator, from, to)?;
            if steps.is_empty() {
                println!("Nothing to do");
            }
            for (direction, migration) in steps {
                let change = match direction {
                    Direction::Up => migration.change.describe(),
                    Direction::Down => migration.change.inverse().describe(),
                };
                println!("{:<4} {}  {}", direction.as_str(), migration.label(), change);
            }
            Ok(())
        }
        MigrationsAction::Schema { at } => {
            let schema = schema_at(&migrator, at)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Steps that move a schema at version `from` to version `to`.
///
/// `None` for `from` means an empty schema; `None` for `to` means the latest
/// migration. Moving backwards lists the rollbacks newest first.
pub fn plan(
    migrator: &Migrator,
    from: Option<u64>,
    to: Option<u64>,
) -> Result<Vec<(Direction, &Migration)>> {
    ensure_known(migrator, from)?;
    ensure_known(migrator, to)?;

    let to = to.or_else(|| migrator.migrations().last().map(|m| m.version));
    let within = |m: &Migration, low: Option<u64>, high: Option<u64>| {
        low.is_none_or(|low| m.version > low) && high.is_some_and(|high| m.version <= high)
    };

    if to < from {
        Ok(migrator
            .migrations()
            .iter()
            .rev()
            .filter(|m| within(m, to, from))
            .map(|m| (Direction::Down, m))
            .collect())
    } else {
        Ok(migrator
            .migrations()
            .iter()
            .filter(|m| within(m, from, to))
            .map(|m| (Direction::Up, m))
            .collect())
    }
}

/// The schema after applying every migration up to and including `at`.
pub fn schema_at(migrator: &Migrator, at: Option<u64>) -> Result<Schema> {
    ensure_known(migrator, at)?;
    let mut schema = Schema::new();
    for migration in migrator
        .migrations()
        .iter()
        .take_while(|m| at.is_none_or(|at| m.version <= at))
    {
        migration.up(&mut schema)?;
    }
    Ok(schema)
}

fn ensure_known(migrator: &Migrator, version: Option<u64>) -> Result<()> {
    match version {
        Some(v) if !migrator.migrations().iter().any(|m| m.version == v) => {
            Err(Error::schema(format!("Unknown migration version {v}")))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
