use clap::Subcommand;

use super::open_config_strict;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Append an exercise
    Add {
        name: String,
    },
    /// Rename the exercise at a position (1-based)
    Update {
        position: usize,
        name: String,
    },
    /// Remove the exercise at a position (1-based)
    Remove {
        position: usize,
    },
    /// Move an exercise to another position (both 1-based)
    Move {
        from: usize,
        to: usize,
    },
    /// List the exercise slots
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Positions are shown 1-based; 0 maps past the end so it is rejected
/// as out of bounds like any other bad position.
fn index(position: usize) -> usize {
    position.checked_sub(1).unwrap_or(usize::MAX)
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut persisted = open_config_strict(None)?;

    match action {
        ExerciseAction::Add { name } => {
            persisted.edit(|config| config.add_exercise(&name))?;
            println!("ok");
        }
        ExerciseAction::Update { position, name } => {
            persisted.edit(|config| config.update_exercise(index(position), &name))?;
            println!("ok");
        }
        ExerciseAction::Remove { position } => {
            persisted.edit(|config| config.remove_exercise(index(position)))?;
            println!("ok");
        }
        ExerciseAction::Move { from, to } => {
            persisted.edit(|config| config.reorder_exercises(index(from), index(to)))?;
            println!("ok");
        }
        ExerciseAction::List { json } => {
            let exercises = &persisted.config().exercises;
            if json {
                println!("{}", serde_json::to_string_pretty(exercises)?);
            } else {
                for (i, name) in exercises.iter().enumerate() {
                    let name = if name.trim().is_empty() { "(empty)" } else { name };
                    println!("{:>2}. {name}", i + 1);
                }
            }
        }
    }
    Ok(())
}
