//! Yearly and per-landing-type breakdowns of recovery attempts
//!
//! Both views run over the flattened attempts from [`crate::launches`]. Rates
//! are percentages with one decimal.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::launches::RecoveryAttempt;
use crate::ranking::percentage;
use crate::records::LandingType;

/// Landing outcomes for one calendar year
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTrend {
    pub year: i32,
    pub attempts: usize,
    pub successes: usize,
    pub success_rate: f64,
}

/// Landing outcomes for one landing type
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandingTypeCount {
    pub landing_type: LandingType,
    pub attempts: usize,
    pub successes: usize,
    pub success_rate: f64,
}

#[derive(Default)]
struct Tally {
    attempts: usize,
    successes: usize,
}

impl Tally {
    fn record(&mut self, attempt: &RecoveryAttempt) {
        self.attempts += 1;
        if attempt.succeeded() {
            self.successes += 1;
        }
    }

    fn rate(&self) -> f64 {
        percentage(self.successes as u64, self.attempts as u64, 1)
    }
}

/// Group attempts by the UTC year of their launch, oldest year first
pub fn yearly_trend(recoveries: &[RecoveryAttempt]) -> Vec<YearlyTrend> {
    let mut years: BTreeMap<i32, Tally> = BTreeMap::new();

    for attempt in recoveries {
        years
            .entry(attempt.launch_date.year())
            .or_default()
            .record(attempt);
    }

    years
        .into_iter()
        .map(|(year, tally)| YearlyTrend {
            year,
            attempts: tally.attempts,
            successes: tally.successes,
            success_rate: tally.rate(),
        })
        .collect()
}

/// Split attempts across ASDS, RTLS and Ocean
///
/// All three buckets are always present, in that order. Attempts without a
/// landing type land in `Ocean`.
pub fn landing_type_distribution(recoveries: &[RecoveryAttempt]) -> Vec<LandingTypeCount> {
    let mut tallies: [Tally; 3] = Default::default();

    for attempt in recoveries {
        let slot = match attempt.bucket() {
            LandingType::Asds => 0,
            LandingType::Rtls => 1,
            LandingType::Ocean => 2,
        };
        tallies[slot].record(attempt);
    }

    LandingType::ALL
        .iter()
        .zip(tallies.iter())
        .map(|(landing_type, tally)| LandingTypeCount {
            landing_type: *landing_type,
            attempts: tally.attempts,
            successes: tally.successes,
            success_rate: tally.rate(),
        })
        .collect()
}
