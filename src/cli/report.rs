//! Read-only reports: stats, overview, achievements

use anyhow::Result;

use habit_ledger::ledger::achievements::ACHIEVEMENTS;
use habit_ledger::{format_date, HabitLedger};

use super::resolve_id;

fn bar(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| if *v > 0 { '■' } else { '·' })
        .collect()
}

const LEVEL_BAR_WIDTH: usize = 20;

fn level_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * LEVEL_BAR_WIDTH as f32).round() as usize)
        .min(LEVEL_BAR_WIDTH);
    format!("{}{}", "■".repeat(filled), "·".repeat(LEVEL_BAR_WIDTH - filled))
}

/// Per-habit statistics
pub fn stats_command(ledger: &HabitLedger, query: &str) -> Result<()> {
    let id = resolve_id(ledger, query)?;
    let stats = ledger.habit_stats(&id)?;
    let name = ledger.habit(&id).map(|h| h.name.as_str()).unwrap_or_default();

    println!("{}\n", name);
    println!("  Completion rate: {:.0}%", stats.completion_rate);
    println!(
        "  Days tracked:    {} ({} completed)",
        stats.total_days_tracked, stats.completed_days
    );
    println!("  Current streak:  {}", stats.current_streak);
    println!("  Longest streak:  {}", stats.longest_streak);
    println!("  Last 7 days:     {}", bar(&stats.weekly_progress));
    println!("  Last 30 days:    {}", bar(&stats.monthly_progress));

    Ok(())
}

/// Ledger-wide summary
pub fn overview_command(ledger: &HabitLedger) -> Result<()> {
    let overview = ledger.overview();

    println!("Overview for {}\n", format_date(ledger.today()));
    println!(
        "  Today's progress:  {}/{} ({:.0}%)",
        overview.completed_today,
        overview.total_habits,
        overview.today_ratio() * 100.0
    );
    println!("  Average streak:    {}", overview.average_streak);
    println!("  Total completions: {}", overview.total_completions);
    println!(
        "  Level {} - {} points ({} to next level)",
        overview.level.level,
        overview.level.total_points,
        overview.level.points_to_next()
    );
    println!(
        "  Level progress:    {} {:.0}%",
        level_bar(overview.level.progress_to_next()),
        overview.level.progress_to_next() * 100.0
    );

    if !overview.recent_achievements.is_empty() {
        println!("\n  Recent achievements:");
        for a in &overview.recent_achievements {
            println!("    {} {} - {} (+{} points)", a.icon, a.name, a.description, a.points);
        }
    }

    Ok(())
}

/// Unlocked achievements first, then the ones still locked
pub fn achievements_command(ledger: &HabitLedger) -> Result<()> {
    let user = ledger.user();

    println!("Achievements ({}/{}):\n", user.achievements.len(), ACHIEVEMENTS.len());
    for a in &user.achievements {
        println!(
            "  {} {} - {} (unlocked {})",
            a.icon,
            a.name,
            a.description,
            a.unlocked_at.format("%Y-%m-%d")
        );
    }
    for a in ACHIEVEMENTS.iter().filter(|a| !user.has_achievement(a.id)) {
        println!("  🔒 {} - {} (+{} points)", a.name, a.description, a.points);
    }

    Ok(())
}
