use crate::prelude::{println, *};
use colored::Colorize;
use landfall_core::launches::{extract_recoveries, FailureSummary};
use landfall_core::report::{build_analysis, AnalysisOptions, AnalysisReport, ReuseSummary};
use landfall_core::trends::{LandingTypeCount, YearlyTrend};
use prettytable::row;

use crate::api::{ApiConfig, SpaceXClient};
use crate::render::{bar, divider, format_date, or_dash, truncate, yes_no};

#[derive(Debug, clap::Parser)]
#[command(name = "analyze")]
#[command(about = "Recovery trends, landing types, reuse and failure analysis")]
#[command(after_help = "EXAMPLES:
  # Full report:
  landfall analyze

  # Only the per-year success trend:
  landfall analyze --section yearly

  # Ten most reused cores, as JSON:
  landfall analyze --section reuse --top 10 --json")]
pub struct App {
    /// Only print one section of the report
    #[arg(short, long, value_enum)]
    pub section: Option<Section>,

    /// Number of cores in the reuse leaderboard
    #[arg(short, long, default_value = "5")]
    pub top: usize,

    /// Number of recent failures to list
    #[arg(short, long, default_value = "10")]
    pub failures: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Section {
    Yearly,
    Types,
    Reuse,
    Failures,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let client = SpaceXClient::new(&ApiConfig::from_global(&global))?;

    if global.verbose {
        println!("SpaceX API Base: {}", client.base_url());
    }

    let options = AnalysisOptions {
        top_reused: app.top,
        recent_failures: app.failures,
    };

    let spinner = new_spinner("Fetching cores and launches...");
    let report = analysis_data(&client, options).await;
    spinner.finish_and_clear();
    let report = report?;

    if app.json {
        println!("{}", format_analysis_json(&report, app.section)?);
    } else {
        print!("{}", format_analysis_text(&report, app.section));
    }

    Ok(())
}

/// Fetches cores and past launches and runs every analysis over them
pub async fn analysis_data(
    client: &SpaceXClient,
    options: AnalysisOptions,
) -> Result<AnalysisReport> {
    let (cores, launches) = futures::try_join!(client.cores(), client.past_launches())?;
    let recoveries = extract_recoveries(&launches);

    Ok(build_analysis(&cores, &recoveries, options))
}

fn format_analysis_json(report: &AnalysisReport, section: Option<Section>) -> Result<String> {
    let value = match section {
        None => serde_json::to_value(report)?,
        Some(Section::Yearly) => serde_json::to_value(&report.yearly_trend)?,
        Some(Section::Types) => serde_json::to_value(&report.landing_types)?,
        Some(Section::Reuse) => serde_json::to_value(&report.reuse)?,
        Some(Section::Failures) => serde_json::to_value(&report.failures)?,
    };

    serde_json::to_string_pretty(&value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_analysis_text(report: &AnalysisReport, section: Option<Section>) -> String {
    let wanted = |candidate: Section| section.is_none() || section == Some(candidate);
    let mut result = String::new();

    if wanted(Section::Yearly) {
        result.push_str(&format_yearly_text(&report.yearly_trend));
    }
    if wanted(Section::Types) {
        result.push_str(&format_landing_types_text(&report.landing_types));
    }
    if wanted(Section::Reuse) {
        result.push_str(&format_reuse_text(&report.reuse));
    }
    if wanted(Section::Failures) {
        result.push_str(&format_failures_text(&report.failures));
    }

    result.push('\n');
    result
}

fn format_yearly_text(trend: &[YearlyTrend]) -> String {
    let mut result = divider("YEARLY LANDING SUCCESS TREND");

    if trend.is_empty() {
        result.push_str(&f!("\n{}\n", "No recovery attempts recorded.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row!["Year", "Attempts", "Landings", "Rate", "Trend"]);
    for year in trend {
        let rate = f!("{:.1}%", year.success_rate);
        let trend_bar = bar(year.success_rate, 20);
        table.add_row(row![
            year.year,
            year.attempts,
            year.successes,
            rate,
            trend_bar
        ]);
    }

    result.push_str(&f!("\n{table}"));
    result
}

fn format_landing_types_text(types: &[LandingTypeCount]) -> String {
    let mut result = divider("LANDING TYPES");

    let mut table = new_table();
    table.set_titles(row!["Type", "Description", "Attempts", "Landings", "Rate"]);
    for entry in types {
        let name = entry.landing_type.as_str();
        let description = entry.landing_type.description();
        let rate = f!("{:.1}%", entry.success_rate);
        table.add_row(row![
            name,
            description,
            entry.attempts,
            entry.successes,
            rate
        ]);
    }

    result.push_str(&f!("\n{table}"));
    result.push_str(&f!(
        "\n  {}\n",
        "Attempts without a recorded landing type are counted as Ocean.".bright_black()
    ));
    result
}

fn format_reuse_text(reuse: &ReuseSummary) -> String {
    let mut result = divider("CORE REUSE");

    if reuse.distribution.is_empty() {
        result.push_str(&f!("\n{}\n", "No cores reported.".yellow()));
        return result;
    }

    result.push_str(&f!("\n  {}\n\n", "Reuse distribution".yellow().bold()));
    for bucket in &reuse.distribution {
        let label = if bucket.reuse_count == 0 {
            "single flight".to_string()
        } else {
            f!("reused {}x", bucket.reuse_count)
        };
        result.push_str(&f!(
            "  {:<14} {} {}\n",
            label,
            "█".repeat(bucket.cores).cyan(),
            bucket.cores
        ));
    }

    result.push_str(&f!("\n  {}\n\n", "Most reused cores".yellow().bold()));
    if reuse.top_reused.is_empty() {
        result.push_str(&f!("  {}\n", "No core has flown more than once.".bright_black()));
    }
    for (idx, core) in reuse.top_reused.iter().enumerate() {
        let serial = core.serial.as_deref().unwrap_or(&core.id);
        result.push_str(&f!(
            "  {} {} - {} reuses ({} flights)\n",
            f!("[{}]", idx + 1).yellow().bold(),
            serial.white().bold(),
            core.reuse_count.to_string().yellow().bold(),
            core.total_flights
        ));
    }

    result.push_str(&f!(
        "\n  {}\n",
        f!("Average reuse: {:.2} per core", reuse.average_reuse).bright_black()
    ));
    result
}

fn format_failures_text(failures: &FailureSummary) -> String {
    let mut result = divider("LANDING FAILURES");

    if failures.failures == 0 {
        result.push_str(&f!("\n  {}\n", "No failed landings recorded.".green()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(row!["Mission", "Date", "Landing", "Reused"]);
    for failure in &failures.recent {
        let mission = truncate(&failure.launch_name, 33);
        let date = format_date(&failure.launch_date);
        let landing = or_dash(failure.landing_type.map(|t| t.as_str()));
        let reused = yes_no(failure.reused);
        table.add_row(row![mission, date, landing, reused]);
    }

    result.push_str(&f!("\n{table}"));
    result.push_str(&f!(
        "\n  {}\n",
        f!(
            "Failures: {} of {} attempts",
            failures.failures,
            failures.attempts
        )
        .bright_black()
    ));
    result.push_str(&f!(
        "  {} {}\n",
        "Failure rate:".bright_black(),
        f!("{:.2}%", failures.failure_rate).red()
    ));
    result
}
