//! Per-pad landing success rates

use serde::Serialize;

use crate::ranking::percentage;
use crate::records::{Landpad, PadStatus, PadType};

/// Landing pad with its success rate
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandpadStats {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub pad_type: Option<PadType>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub landing_attempts: u32,
    pub landing_successes: u32,
    pub success_rate: f64,
    pub status: Option<PadStatus>,
}

/// Attach a success rate to every pad, keeping the input order
pub fn analyze_landpads(landpads: &[Landpad]) -> Vec<LandpadStats> {
    landpads
        .iter()
        .map(|pad| LandpadStats {
            id: pad.id.clone(),
            name: pad.name.clone(),
            full_name: pad.full_name.clone(),
            pad_type: pad.pad_type,
            locality: pad.locality.clone(),
            region: pad.region.clone(),
            landing_attempts: pad.landing_attempts,
            landing_successes: pad.landing_successes,
            success_rate: percentage(
                u64::from(pad.landing_successes),
                u64::from(pad.landing_attempts),
                2,
            ),
            status: pad.status,
        })
        .collect()
}
