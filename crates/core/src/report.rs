//! Report snapshots
//!
//! Bundles the individual reductions into the two views the shell renders:
//! the dashboard and the deep analysis. Both are plain serializable values so
//! the same snapshot backs the terminal output, `--json`, and the HTTP API.

use serde::Serialize;

use crate::fleet::{
    active_cores, analyze_fleet, average_reuse, reuse_distribution, top_reused, CoreDetail,
    FleetStats, ReuseBucket,
};
use crate::landpads::{analyze_landpads, LandpadStats};
use crate::launches::{summarize_failures, FailureSummary, RecoveryAttempt};
use crate::ranking::last_n;
use crate::records::{Core, Landpad};
use crate::trends::{landing_type_distribution, yearly_trend, LandingTypeCount, YearlyTrend};

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub fleet: FleetStats,
    pub landpads: Vec<LandpadStats>,
    pub active_cores: Vec<CoreDetail>,
    /// Most recent attempts, oldest first
    pub recent_recoveries: Vec<RecoveryAttempt>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReuseSummary {
    pub distribution: Vec<ReuseBucket>,
    pub top_reused: Vec<CoreDetail>,
    pub average_reuse: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub yearly_trend: Vec<YearlyTrend>,
    pub landing_types: Vec<LandingTypeCount>,
    pub reuse: ReuseSummary,
    pub failures: FailureSummary,
}

/// How many rows the ranked sections keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub top_reused: usize,
    pub recent_failures: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_reused: 5,
            recent_failures: 10,
        }
    }
}

pub fn build_dashboard(
    cores: &[Core],
    landpads: &[Landpad],
    recoveries: &[RecoveryAttempt],
    recent: usize,
) -> DashboardReport {
    DashboardReport {
        fleet: analyze_fleet(cores),
        landpads: analyze_landpads(landpads),
        active_cores: active_cores(cores),
        recent_recoveries: last_n(recoveries, recent).to_vec(),
    }
}

pub fn build_reuse_summary(cores: &[Core], top: usize) -> ReuseSummary {
    ReuseSummary {
        distribution: reuse_distribution(cores),
        top_reused: top_reused(cores, top),
        average_reuse: average_reuse(cores),
    }
}

pub fn build_analysis(
    cores: &[Core],
    recoveries: &[RecoveryAttempt],
    options: AnalysisOptions,
) -> AnalysisReport {
    AnalysisReport {
        yearly_trend: yearly_trend(recoveries),
        landing_types: landing_type_distribution(recoveries),
        reuse: build_reuse_summary(cores, options.top_reused),
        failures: summarize_failures(recoveries, options.recent_failures),
    }
}
