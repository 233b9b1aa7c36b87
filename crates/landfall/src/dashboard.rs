use crate::prelude::{println, *};
use colored::Colorize;
use landfall_core::fleet::{CoreDetail, FleetStats};
use landfall_core::landpads::LandpadStats;
use landfall_core::launches::{extract_recoveries, RecoveryAttempt};
use landfall_core::report::{build_dashboard, DashboardReport};
use prettytable::row;

use crate::api::{ApiConfig, SpaceXClient};
use crate::render::{colored_rate, divider, format_date, or_dash, truncate, yes_no};

#[derive(Debug, clap::Parser)]
#[command(name = "dashboard")]
#[command(about = "Fleet, landing pad, and recent recovery dashboard")]
pub struct App {
    /// Number of recent recovery attempts to show
    #[arg(short, long, env = "LANDFALL_RECENT", default_value = "10")]
    pub recent: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let client = SpaceXClient::new(&ApiConfig::from_global(&global))?;

    if global.verbose {
        println!("SpaceX API Base: {}", client.base_url());
    }

    let spinner = new_spinner("Fetching cores, landpads and launches...");
    let report = dashboard_data(&client, app.recent).await;
    spinner.finish_and_clear();
    let report = report?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_dashboard_text(&report));
    }

    Ok(())
}

/// Fetches all three collections and builds the dashboard snapshot
pub async fn dashboard_data(client: &SpaceXClient, recent: usize) -> Result<DashboardReport> {
    let snapshot = client.snapshot().await?;
    let recoveries = extract_recoveries(&snapshot.launches);

    Ok(build_dashboard(
        &snapshot.cores,
        &snapshot.landpads,
        &recoveries,
        recent,
    ))
}

fn format_dashboard_text(report: &DashboardReport) -> String {
    let mut result = String::new();

    result.push_str(&format_fleet_section(&report.fleet));
    result.push_str(&format_landpads_section(&report.landpads));
    result.push_str(&format_active_cores_section(&report.active_cores));
    result.push_str(&format_recent_section(&report.recent_recoveries));
    result.push_str(&divider(""));
    result.push_str(&f!(
        "\n  {}\n\n",
        "Data source: SpaceX API (api.spacexdata.com)".bright_black()
    ));

    result
}

fn format_fleet_section(stats: &FleetStats) -> String {
    let mut result = divider("SPACEX BOOSTER RECOVERY - FLEET");

    result.push_str(&f!("\n{}\n", "Cores".yellow().bold()));
    result.push_str(&f!("   Total:   {}\n", stats.total.to_string().bold()));
    result.push_str(&f!("   Active:  {}\n", stats.active.to_string().green()));
    result.push_str(&f!(
        "   Retired: {}\n",
        stats.retired.to_string().bright_black()
    ));
    result.push_str(&f!("   Lost:    {}\n", stats.lost.to_string().red()));

    result.push_str(&f!("\n{}\n", "Recovery".yellow().bold()));
    result.push_str(&f!("   Flights:           {}\n", stats.total_flights));
    result.push_str(&f!(
        "   Landing attempts:  {}\n",
        stats.total_landing_attempts
    ));
    result.push_str(&f!(
        "   Landings:          {}\n",
        stats.total_landing_successes.to_string().green()
    ));
    result.push_str(&f!(
        "   Success rate:      {}\n",
        colored_rate(stats.landing_success_rate, 2)
    ));

    result.push_str(&f!("\n{}\n", "Reuse record".yellow().bold()));
    result.push_str(&f!(
        "   Most reuses:       {}\n",
        stats.max_reuse.to_string().magenta().bold()
    ));
    if let Some(champion) = &stats.most_reused_core {
        result.push_str(&f!(
            "   Champion:          {}\n",
            champion.label().magenta().bold()
        ));
    }

    result
}

fn format_landpads_section(landpads: &[LandpadStats]) -> String {
    let mut result = divider("LANDING PADS");

    if landpads.is_empty() {
        result.push_str(&f!("\n{}\n", "No landing pads reported.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row![
        "Name", "Type", "Locality", "Attempts", "Landings", "Rate", "Status"
    ]);
    for pad in landpads {
        let name = or_dash(pad.name.as_deref());
        let pad_type = or_dash(pad.pad_type.map(|t| t.as_str()));
        let locality = or_dash(pad.locality.as_deref());
        let rate = f!("{:.2}%", pad.success_rate);
        let status = or_dash(pad.status.map(|s| s.as_str()));
        table.add_row(row![
            name,
            pad_type,
            locality,
            pad.landing_attempts,
            pad.landing_successes,
            rate,
            status
        ]);
    }

    result.push_str(&f!("\n{table}"));
    result
}

fn format_active_cores_section(cores: &[CoreDetail]) -> String {
    let mut result = divider("ACTIVE CORES");

    if cores.is_empty() {
        result.push_str(&f!("\n{}\n", "No active cores.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row!["Serial", "Flights", "Reuses", "Attempts", "Landings"]);
    for core in cores {
        let serial = core.serial.as_deref().unwrap_or(&core.id);
        table.add_row(row![
            serial,
            core.total_flights,
            core.reuse_count,
            core.landing_attempts,
            core.landing_successes
        ]);
    }

    result.push_str(&f!("\n{table}"));
    result.push_str(&f!(
        "\n   {}\n",
        f!("{} active cores", cores.len()).bright_black()
    ));
    result
}

/// Recent attempts arrive oldest first; the table shows newest first
fn format_recent_section(recent: &[RecoveryAttempt]) -> String {
    let mut result = divider("RECENT RECOVERIES");

    if recent.is_empty() {
        result.push_str(&f!("\n{}\n", "No recovery attempts recorded.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row!["Mission", "Date", "Landing", "Reused", "Result"]);
    for attempt in recent.iter().rev() {
        let mission = truncate(&attempt.launch_name, 28);
        let date = format_date(&attempt.launch_date);
        let landing = or_dash(attempt.landing_type.map(|t| t.as_str()));
        let reused = yes_no(attempt.reused);
        let outcome = if attempt.succeeded() {
            "✓ landed"
        } else {
            "✗ lost"
        };
        table.add_row(row![mission, date, landing, reused, outcome]);
    }

    result.push_str(&f!("\n{table}"));
    result
}
