//! Fleet-wide booster statistics
//!
//! Reductions over the full core collection: status counts, flight and
//! landing totals, the reuse champion, and the per-core views used by the
//! reuse analysis.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::ranking::{percentage, rank_by, round_to};
use crate::records::{Core, CoreStatus};

/// Aggregate statistics for the whole fleet
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: usize,
    pub active: usize,
    pub retired: usize,
    pub lost: usize,
    pub total_flights: u64,
    pub total_landing_attempts: u64,
    pub total_landing_successes: u64,
    pub landing_success_rate: f64,
    pub max_reuse: u32,
    pub most_reused_core: Option<Core>,
}

/// Per-core view with the derived counters filled in
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoreDetail {
    pub id: String,
    pub serial: Option<String>,
    pub status: CoreStatus,
    pub reuse_count: u32,
    pub total_flights: u32,
    pub landing_attempts: u32,
    pub landing_successes: u32,
    pub rtls_attempts: u32,
    pub rtls_landings: u32,
    pub asds_attempts: u32,
    pub asds_landings: u32,
    pub last_update: Option<String>,
}

impl From<&Core> for CoreDetail {
    fn from(core: &Core) -> Self {
        CoreDetail {
            id: core.id.clone(),
            serial: core.serial.clone(),
            status: core.status,
            reuse_count: core.reuse_count,
            total_flights: core.total_flights(),
            landing_attempts: core.landing_attempts(),
            landing_successes: core.landing_successes(),
            rtls_attempts: core.rtls_attempts,
            rtls_landings: core.rtls_landings,
            asds_attempts: core.asds_attempts,
            asds_landings: core.asds_landings,
            last_update: core.last_update.clone(),
        }
    }
}

/// Number of cores that flew `reuse_count + 1` times
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReuseBucket {
    pub reuse_count: u32,
    pub cores: usize,
}

/// Reduce the fleet in a single pass
///
/// The reuse champion is the first core whose `reuse_count` is strictly
/// greater than every core before it, so ties go to the earlier core. A fleet
/// where nobody has been reused has no champion.
pub fn analyze_fleet(cores: &[Core]) -> FleetStats {
    let mut stats = FleetStats {
        total: cores.len(),
        active: 0,
        retired: 0,
        lost: 0,
        total_flights: 0,
        total_landing_attempts: 0,
        total_landing_successes: 0,
        landing_success_rate: 0.0,
        max_reuse: 0,
        most_reused_core: None,
    };

    for core in cores {
        match core.status {
            CoreStatus::Active => stats.active += 1,
            CoreStatus::Retired => stats.retired += 1,
            CoreStatus::Lost => stats.lost += 1,
            CoreStatus::Unknown => {}
        }

        stats.total_flights += u64::from(core.total_flights());
        stats.total_landing_attempts += u64::from(core.landing_attempts());
        stats.total_landing_successes += u64::from(core.landing_successes());

        if core.reuse_count > stats.max_reuse {
            stats.max_reuse = core.reuse_count;
            stats.most_reused_core = Some(core.clone());
        }
    }

    stats.landing_success_rate = percentage(
        stats.total_landing_successes,
        stats.total_landing_attempts,
        2,
    );

    stats
}

pub fn core_details(cores: &[Core]) -> Vec<CoreDetail> {
    cores.iter().map(CoreDetail::from).collect()
}

/// Active cores, most reused first
pub fn active_cores(cores: &[Core]) -> Vec<CoreDetail> {
    let active: Vec<&Core> = cores
        .iter()
        .filter(|core| core.status == CoreStatus::Active)
        .collect();

    rank_by(&active, active.len(), |core| core.reuse_count)
        .into_iter()
        .map(|core| CoreDetail::from(*core))
        .collect()
}

/// The `limit` most reused cores; cores that never flew twice are left out
pub fn top_reused(cores: &[Core], limit: usize) -> Vec<CoreDetail> {
    let reused: Vec<&Core> = cores.iter().filter(|core| core.reuse_count > 0).collect();

    rank_by(&reused, limit, |core| core.reuse_count)
        .into_iter()
        .map(|core| CoreDetail::from(*core))
        .collect()
}

/// Reuse counts up to this value are always listed, even with no cores
pub const DENSE_REUSE_LIMIT: u32 = 100;

/// Cores per reuse count, from 0 to the fleet maximum with gaps filled in.
/// Gaps above [`DENSE_REUSE_LIMIT`] are skipped; only populated counts appear.
pub fn reuse_distribution(cores: &[Core]) -> Vec<ReuseBucket> {
    let Some(max) = cores.iter().map(|core| core.reuse_count).max() else {
        return Vec::new();
    };

    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for core in cores {
        *counts.entry(core.reuse_count).or_default() += 1;
    }

    let dense = (0..=max.min(DENSE_REUSE_LIMIT)).map(|reuse_count| ReuseBucket {
        reuse_count,
        cores: counts.get(&reuse_count).copied().unwrap_or(0),
    });
    let sparse = counts
        .range(DENSE_REUSE_LIMIT.saturating_add(1)..)
        .map(|(&reuse_count, &cores)| ReuseBucket { reuse_count, cores });

    dense.chain(sparse).collect()
}

/// Mean reuse per core, 2 decimals
pub fn average_reuse(cores: &[Core]) -> f64 {
    if cores.is_empty() {
        return 0.0;
    }
    let total: u64 = cores.iter().map(|core| u64::from(core.reuse_count)).sum();
    round_to(total as f64 / cores.len() as f64, 2)
}
