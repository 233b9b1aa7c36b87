//! Terminal formatting helpers shared by the report commands

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

pub const WIDTH: usize = 60;

/// Section header framed by double rules
pub fn divider(title: &str) -> String {
    let rule = "═".repeat(WIDTH);
    if title.is_empty() {
        return format!("\n{}\n", rule.cyan());
    }
    format!(
        "\n{}\n{}\n{}\n",
        rule.cyan(),
        format!("  {title}").cyan().bold(),
        rule.cyan()
    )
}

/// Horizontal bar for a percentage, `width` cells wide
pub fn bar(rate: f64, width: usize) -> String {
    let filled = ((rate.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(width - filled).bright_black()
    )
}

/// Rate with `decimals` places, colored by how healthy it is
pub fn colored_rate(rate: f64, decimals: usize) -> ColoredString {
    let text = format!("{rate:.decimals$}%");
    if rate >= 90.0 {
        text.green()
    } else if rate >= 70.0 {
        text.yellow()
    } else {
        text.red()
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Cut `text` to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        colored::control::set_override(false);

        assert_eq!(bar(100.0, 4), "████");
        assert_eq!(bar(50.0, 4), "██░░");
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(250.0, 2), "██");
    }

    #[test]
    fn test_colored_rate_text() {
        colored::control::set_override(false);

        assert_eq!(colored_rate(100.0, 2).to_string(), "100.00%");
        assert_eq!(colored_rate(33.3, 1).to_string(), "33.3%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("CRS-20", 10), "CRS-20");
        assert_eq!(truncate("Starlink-15 (v1.0)", 8), "Starlin…");
        assert_eq!(truncate("Ñandú", 5), "Ñandú");
    }

    #[test]
    fn test_or_dash_and_yes_no() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("Florida")), "Florida");
        assert_eq!(yes_no(Some(true)), "yes");
        assert_eq!(yes_no(None), "-");
    }

    #[test]
    fn test_format_date() {
        let date = DateTime::parse_from_rfc3339("2020-05-30T19:22:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(&date), "2020-05-30");
    }
}
