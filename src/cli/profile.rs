//! Profile and theme commands

use anyhow::Result;

use habit_ledger::HabitLedger;

/// Flip the theme
pub fn theme_command(ledger: &mut HabitLedger) -> Result<()> {
    let theme = ledger.toggle_theme()?;
    println!("Theme set to {}", theme);
    Ok(())
}

/// Show the profile
pub fn profile_command(ledger: &HabitLedger) -> Result<()> {
    let user = ledger.user();
    println!("{} <{}>", user.name, user.email);
    println!("  Level {} ({} points)", user.level, user.total_points);
    println!("  Achievements: {}", user.achievements.len());
    println!("  Theme: {}", user.theme);
    Ok(())
}
