use crate::prelude::{println, *};
use colored::Colorize;
use landfall_core::fleet::{analyze_fleet, FleetStats};

use crate::api::{ApiConfig, SpaceXClient};

#[derive(Debug, clap::Parser)]
#[command(name = "overview")]
#[command(about = "Quick summary of the booster fleet")]
pub struct App {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let client = SpaceXClient::new(&ApiConfig::from_global(&global))?;

    if global.verbose {
        println!("SpaceX API Base: {}", client.base_url());
    }

    let spinner = new_spinner("Fetching cores...");
    let stats = fleet_stats_data(&client).await;
    spinner.finish_and_clear();
    let stats = stats?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", format_overview_text(&stats));
    }

    Ok(())
}

/// Fetch cores and reduce them to fleet statistics
pub async fn fleet_stats_data(client: &SpaceXClient) -> Result<FleetStats> {
    let cores = client.cores().await?;
    Ok(analyze_fleet(&cores))
}

fn format_overview_text(stats: &FleetStats) -> String {
    let mut result = String::new();
    let rule = "━".repeat(50);

    result.push_str(&f!(
        "\n{}\n\n",
        "SPACEX BOOSTER RECOVERY - OVERVIEW".bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n\n", rule.white()));
    result.push_str(&f!(
        "  {}: {}\n",
        "Cores".green(),
        stats.total.to_string().bold()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Active".green(),
        stats.active.to_string().green().bold()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Landing success rate".green(),
        f!("{:.2}%", stats.landing_success_rate).green().bold()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Most reuses".green(),
        stats.max_reuse.to_string().yellow().bold()
    ));

    if let Some(champion) = &stats.most_reused_core {
        result.push_str(&f!(
            "  {}: {}\n",
            "Reuse champion".green(),
            champion.label().magenta().bold()
        ));
    }

    result.push_str(&f!("\n{}\n", rule.white()));
    result.push_str(&f!("\n{}:\n", "More reports".bright_white().bold()));
    result.push_str(&f!("  {}\n", "landfall dashboard  - full dashboard".cyan()));
    result.push_str(&f!("  {}\n", "landfall analyze    - deep analysis".cyan()));
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfall_core::records::{Core, CoreStatus};

    fn create_test_stats(champion: Option<&str>) -> FleetStats {
        FleetStats {
            total: 12,
            active: 7,
            retired: 3,
            lost: 2,
            total_flights: 40,
            total_landing_attempts: 30,
            total_landing_successes: 27,
            landing_success_rate: 90.0,
            max_reuse: 6,
            most_reused_core: champion.map(|serial| Core {
                id: "5e9e28a6f35918c0803b265c".to_string(),
                serial: Some(serial.to_string()),
                status: CoreStatus::Active,
                reuse_count: 6,
                rtls_attempts: 0,
                rtls_landings: 0,
                asds_attempts: 7,
                asds_landings: 7,
                last_update: None,
            }),
        }
    }

    #[test]
    fn test_format_overview_text_basic() {
        let formatted = format_overview_text(&create_test_stats(Some("B1049")));

        assert!(formatted.contains("OVERVIEW"));
        assert!(formatted.contains("12"));
        assert!(formatted.contains("90.00%"));
        assert!(formatted.contains("Reuse champion"));
        assert!(formatted.contains("B1049"));
    }

    #[test]
    fn test_format_overview_text_without_champion() {
        let formatted = format_overview_text(&create_test_stats(None));

        assert!(!formatted.contains("Reuse champion"));
        assert!(formatted.contains("Most reuses"));
    }

    #[test]
    fn test_format_overview_text_usage_hints() {
        let formatted = format_overview_text(&create_test_stats(None));

        assert!(formatted.contains("landfall dashboard"));
        assert!(formatted.contains("landfall analyze"));
    }

    #[test]
    fn test_fleet_stats_json_keys() {
        let json = serde_json::to_value(create_test_stats(Some("B1049"))).unwrap();

        assert_eq!(json["landingSuccessRate"], 90.0);
        assert_eq!(json["mostReusedCore"]["serial"], "B1049");
        assert_eq!(json["mostReusedCore"]["status"], "active");
    }
}
