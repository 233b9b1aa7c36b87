//! Recovery attempts extracted from launch history
//!
//! A launch carries zero or more per-core entries. Every entry that attempted
//! a landing becomes one [`RecoveryAttempt`]. The output keeps launch order
//! and, within a launch, core order: the launch feed is chronological, so
//! position doubles as recency for the "most recent N" views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ranking::{last_n, percentage};
use crate::records::{LandingType, Launch};

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryAttempt {
    pub launch_name: String,
    pub launch_date: DateTime<Utc>,
    pub core_id: Option<String>,
    pub flight_number: Option<u32>,
    pub gridfins: Option<bool>,
    pub legs: Option<bool>,
    pub reused: Option<bool>,
    pub landing_attempt: bool,
    pub landing_success: Option<bool>,
    pub landing_type: Option<LandingType>,
    pub landpad_id: Option<String>,
}

impl RecoveryAttempt {
    pub fn succeeded(&self) -> bool {
        self.landing_success == Some(true)
    }

    /// Landing type used for grouping; an unspecified type counts as `Ocean`
    pub fn bucket(&self) -> LandingType {
        self.landing_type.unwrap_or(LandingType::Ocean)
    }
}

/// Failed landings over all attempts
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FailureSummary {
    pub failures: usize,
    pub attempts: usize,
    pub failure_rate: f64,
    pub recent: Vec<RecoveryAttempt>,
}

pub fn extract_recoveries(launches: &[Launch]) -> Vec<RecoveryAttempt> {
    launches
        .iter()
        .flat_map(|launch| {
            launch
                .cores
                .iter()
                .filter(|core| core.landing_attempt == Some(true))
                .map(move |core| RecoveryAttempt {
                    launch_name: launch.name.clone(),
                    launch_date: launch.date_utc,
                    core_id: core.core_id.clone(),
                    flight_number: core.flight_number,
                    gridfins: core.gridfins,
                    legs: core.legs,
                    reused: core.reused,
                    landing_attempt: true,
                    landing_success: core.landing_success,
                    landing_type: core.landing_type,
                    landpad_id: core.landpad_id.clone(),
                })
        })
        .collect()
}

/// Count failed landings and keep the last `recent` of them in source order
///
/// An attempt whose outcome is not recorded as a success is a failure.
pub fn summarize_failures(recoveries: &[RecoveryAttempt], recent: usize) -> FailureSummary {
    let failures: Vec<RecoveryAttempt> = recoveries
        .iter()
        .filter(|attempt| !attempt.succeeded())
        .cloned()
        .collect();

    FailureSummary {
        failures: failures.len(),
        attempts: recoveries.len(),
        failure_rate: percentage(failures.len() as u64, recoveries.len() as u64, 2),
        recent: last_n(&failures, recent).to_vec(),
    }
}
