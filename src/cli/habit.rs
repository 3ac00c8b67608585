//! Habit commands: list, add, edit, delete, toggle

use anyhow::Result;
use std::io::{self, BufRead, Write};

use habit_ledger::{
    parse_date, HabitCategory, HabitLedger, HabitUpdate, LedgerEvent, NewHabit, format_date,
};

use super::{resolve_id, short_id};

/// Arguments for `add`
pub struct AddArgs {
    pub name: String,
    pub category: HabitCategory,
    pub description: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub days: Option<Vec<u8>>,
}

/// List all habits with today's status
pub fn list_command(ledger: &HabitLedger) -> Result<()> {
    let habits = ledger.habits();
    if habits.is_empty() {
        println!("No habits yet. Create one with `habit-ledger add <name>`.");
        return Ok(());
    }

    let today = ledger.today();
    println!("Habits for {} ({}):\n", format_date(today), habits.len());

    for habit in habits {
        let mark = if habit.is_completed_on(today) { "x" } else { " " };
        println!(
            "  [{}] {} {} ({})  {}",
            mark,
            habit.icon,
            habit.name,
            habit.category.label(),
            short_id(&habit.id)
        );
        println!(
            "      streak {} (best {}), {} pts",
            habit.streak, habit.longest_streak, habit.points
        );
        if !habit.description.is_empty() {
            println!("      {}", habit.description);
        }
    }

    Ok(())
}

/// Create a habit from form-style arguments
pub fn add_command(ledger: &mut HabitLedger, args: AddArgs) -> Result<()> {
    let mut data = NewHabit::new(args.name, args.category).with_description(args.description);
    if let Some(color) = args.color {
        data.color = color;
    }
    if let Some(icon) = args.icon {
        data.icon = icon;
    }
    if let Some(days) = args.days {
        data.target_days = days;
    }

    let unlocked_before = ledger.user().achievements.len();
    let id = ledger.add_habit(data)?;

    if let Some(habit) = ledger.habit(&id) {
        println!("Added {} {} ({})", habit.icon, habit.name, short_id(&id));
    }
    for achievement in &ledger.user().achievements[unlocked_before..] {
        println!(
            "Achievement unlocked: {} {} (+{} points)",
            achievement.icon, achievement.name, achievement.points
        );
    }

    Ok(())
}

/// Apply a partial edit
pub fn edit_command(ledger: &mut HabitLedger, query: &str, update: HabitUpdate) -> Result<()> {
    let id = resolve_id(ledger, query)?;
    if update.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    ledger.update_habit(&id, update)?;
    if let Some(habit) = ledger.habit(&id) {
        println!("Updated {} {}", habit.icon, habit.name);
    }
    Ok(())
}

/// Delete after confirmation
pub fn delete_command(ledger: &mut HabitLedger, query: &str, yes: bool) -> Result<()> {
    let id = resolve_id(ledger, query)?;
    let name = ledger
        .habit(&id)
        .map(|h| h.name.clone())
        .unwrap_or_default();

    if !yes && !confirm(&format!("Delete habit '{}'? Earned points are kept.", name))? {
        println!("Cancelled.");
        return Ok(());
    }

    ledger.delete_habit(&id)?;
    println!("Deleted {}", name);
    Ok(())
}

/// Toggle a day's completion and report what changed
pub fn toggle_command(ledger: &mut HabitLedger, query: &str, date: Option<&str>) -> Result<()> {
    let id = resolve_id(ledger, query)?;
    let date = match date {
        Some(raw) => parse_date(raw)?,
        None => ledger.today(),
    };

    let outcome = ledger.toggle_completion(&id, date)?;
    let name = ledger.habit(&id).map(|h| h.name.as_str()).unwrap_or_default();
    println!(
        "{} {} for {} (streak {})",
        if outcome.completed { "Completed" } else { "Unmarked" },
        name,
        format_date(date),
        outcome.streak
    );

    for event in &outcome.events {
        match event {
            LedgerEvent::PointsAwarded { amount } => println!("  +{} points", amount),
            LedgerEvent::PointsDeducted { amount } => println!("  -{} points", amount),
            LedgerEvent::AchievementUnlocked(a) => {
                println!("  Achievement unlocked: {} {} (+{} points)", a.icon, a.name, a.points)
            }
            LedgerEvent::LevelChanged { new_level, .. } => println!("  Now level {}", new_level),
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
