//! Record normalization
//!
//! Upstream collections are loosely typed: numeric counters may be missing,
//! enumerations may carry values we do not know about, and nested launch
//! records may be `null`. The `Raw*` types mirror the wire shape (snake_case,
//! everything optional) and the `normalize_*` functions turn them into the
//! canonical domain types used by every aggregator.
//!
//! Missing counters become `0` here and nowhere else. Non-numeric optionals
//! stay `Option` so presentation can tell "absent" from a real value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MalformedReason, RecordKind, RecoveryError, Result};

/// Core (first-stage booster) as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawCore {
    pub id: Option<String>,
    pub serial: Option<String>,
    pub status: Option<String>,
    pub reuse_count: Option<u32>,
    pub rtls_attempts: Option<u32>,
    pub rtls_landings: Option<u32>,
    pub asds_attempts: Option<u32>,
    pub asds_landings: Option<u32>,
    pub last_update: Option<String>,
}

/// Landing pad or drone ship as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawLandpad {
    pub id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub pad_type: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub landing_attempts: Option<u32>,
    pub landing_successes: Option<u32>,
    pub status: Option<String>,
}

/// Launch as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawLaunch {
    pub name: Option<String>,
    pub date_utc: Option<String>,
    pub cores: Option<Vec<RawLaunchCore>>,
}

/// Per-core entry nested inside a launch
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawLaunchCore {
    pub core: Option<String>,
    pub flight: Option<u32>,
    pub gridfins: Option<bool>,
    pub legs: Option<bool>,
    pub reused: Option<bool>,
    pub landing_attempt: Option<bool>,
    pub landing_success: Option<bool>,
    pub landing_type: Option<String>,
    pub landpad: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreStatus {
    Active,
    Retired,
    Lost,
    Unknown,
}

impl CoreStatus {
    /// Anything other than the three tracked states is `Unknown`
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("active") => CoreStatus::Active,
            Some("retired") => CoreStatus::Retired,
            Some("lost") => CoreStatus::Lost,
            _ => CoreStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoreStatus::Active => "active",
            CoreStatus::Retired => "retired",
            CoreStatus::Lost => "lost",
            CoreStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PadType {
    #[serde(rename = "RTLS")]
    Rtls,
    #[serde(rename = "ASDS")]
    Asds,
}

impl PadType {
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "RTLS" => Some(PadType::Rtls),
            "ASDS" => Some(PadType::Asds),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PadType::Rtls => "RTLS",
            PadType::Asds => "ASDS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PadStatus {
    Active,
    Retired,
    #[serde(rename = "under construction")]
    UnderConstruction,
    Unknown,
}

impl PadStatus {
    pub fn from_api(value: &str) -> Self {
        match value {
            "active" => PadStatus::Active,
            "retired" => PadStatus::Retired,
            "under construction" => PadStatus::UnderConstruction,
            _ => PadStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PadStatus::Active => "active",
            PadStatus::Retired => "retired",
            PadStatus::UnderConstruction => "under construction",
            PadStatus::Unknown => "unknown",
        }
    }
}

/// How a booster attempted to come back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LandingType {
    #[serde(rename = "ASDS")]
    Asds,
    #[serde(rename = "RTLS")]
    Rtls,
    Ocean,
}

impl LandingType {
    /// Fixed reporting order for per-type breakdowns
    pub const ALL: [LandingType; 3] = [LandingType::Asds, LandingType::Rtls, LandingType::Ocean];

    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "ASDS" => Some(LandingType::Asds),
            "RTLS" => Some(LandingType::Rtls),
            "Ocean" => Some(LandingType::Ocean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LandingType::Asds => "ASDS",
            LandingType::Rtls => "RTLS",
            LandingType::Ocean => "Ocean",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LandingType::Asds => "Autonomous Spaceport Drone Ship",
            LandingType::Rtls => "Return To Launch Site",
            LandingType::Ocean => "Ocean splashdown (not recovered)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Core {
    pub id: String,
    pub serial: Option<String>,
    pub status: CoreStatus,
    pub reuse_count: u32,
    pub rtls_attempts: u32,
    pub rtls_landings: u32,
    pub asds_attempts: u32,
    pub asds_landings: u32,
    pub last_update: Option<String>,
}

// Totals saturate. `normalize_core` rejects records whose totals overflow.
impl Core {
    pub fn total_flights(&self) -> u32 {
        self.reuse_count.saturating_add(1)
    }

    pub fn landing_attempts(&self) -> u32 {
        self.rtls_attempts.saturating_add(self.asds_attempts)
    }

    pub fn landing_successes(&self) -> u32 {
        self.rtls_landings.saturating_add(self.asds_landings)
    }

    /// Serial if known, otherwise the opaque id
    pub fn label(&self) -> &str {
        self.serial.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Landpad {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub pad_type: Option<PadType>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub landing_attempts: u32,
    pub landing_successes: u32,
    pub status: Option<PadStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub name: String,
    pub date_utc: DateTime<Utc>,
    pub cores: Vec<LaunchCore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchCore {
    pub core_id: Option<String>,
    pub flight_number: Option<u32>,
    pub gridfins: Option<bool>,
    pub legs: Option<bool>,
    pub reused: Option<bool>,
    pub landing_attempt: Option<bool>,
    pub landing_success: Option<bool>,
    pub landing_type: Option<LandingType>,
    pub landpad_id: Option<String>,
}

fn check_landings(landings: u32, attempts: u32) -> std::result::Result<(), MalformedReason> {
    if landings > attempts {
        return Err(MalformedReason::LandingsExceedAttempts { landings, attempts });
    }
    Ok(())
}

fn checked_total(
    field: &'static str,
    left: u32,
    right: u32,
) -> std::result::Result<u32, MalformedReason> {
    left.checked_add(right).ok_or_else(|| MalformedReason::InvalidField {
        field,
        message: format!("{left} + {right} does not fit in a 32-bit counter"),
    })
}

pub fn normalize_core(raw: RawCore) -> std::result::Result<Core, MalformedReason> {
    let id = raw.id.ok_or(MalformedReason::MissingField("id"))?;

    let core = Core {
        id,
        serial: raw.serial,
        status: CoreStatus::from_api(raw.status.as_deref()),
        reuse_count: raw.reuse_count.unwrap_or(0),
        rtls_attempts: raw.rtls_attempts.unwrap_or(0),
        rtls_landings: raw.rtls_landings.unwrap_or(0),
        asds_attempts: raw.asds_attempts.unwrap_or(0),
        asds_landings: raw.asds_landings.unwrap_or(0),
        last_update: raw.last_update,
    };

    checked_total("reuse_count", core.reuse_count, 1)?;
    let attempts = checked_total("landing_attempts", core.rtls_attempts, core.asds_attempts)?;
    let landings = checked_total("landing_successes", core.rtls_landings, core.asds_landings)?;
    check_landings(landings, attempts)?;

    Ok(core)
}

pub fn normalize_landpad(raw: RawLandpad) -> std::result::Result<Landpad, MalformedReason> {
    let id = raw.id.ok_or(MalformedReason::MissingField("id"))?;
    let landing_attempts = raw.landing_attempts.unwrap_or(0);
    let landing_successes = raw.landing_successes.unwrap_or(0);

    check_landings(landing_successes, landing_attempts)?;

    Ok(Landpad {
        id,
        name: raw.name,
        full_name: raw.full_name,
        pad_type: raw.pad_type.as_deref().and_then(PadType::from_api),
        locality: raw.locality,
        region: raw.region,
        landing_attempts,
        landing_successes,
        status: raw.status.as_deref().map(PadStatus::from_api),
    })
}

/// Parse an RFC 3339 timestamp such as `2020-01-07T02:19:00.000Z`
pub fn parse_launch_date(value: &str) -> std::result::Result<DateTime<Utc>, MalformedReason> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MalformedReason::InvalidField {
            field: "date_utc",
            message: format!("{value:?} is not an RFC 3339 timestamp ({e})"),
        })
}

pub fn normalize_launch_core(raw: RawLaunchCore) -> LaunchCore {
    LaunchCore {
        core_id: raw.core,
        flight_number: raw.flight,
        gridfins: raw.gridfins,
        legs: raw.legs,
        reused: raw.reused,
        landing_attempt: raw.landing_attempt,
        landing_success: raw.landing_success,
        landing_type: raw.landing_type.as_deref().and_then(LandingType::from_api),
        landpad_id: raw.landpad,
    }
}

pub fn normalize_launch(raw: RawLaunch) -> std::result::Result<Launch, MalformedReason> {
    let name = raw.name.ok_or(MalformedReason::MissingField("name"))?;
    let date = raw
        .date_utc
        .ok_or(MalformedReason::MissingField("date_utc"))?;

    Ok(Launch {
        name,
        date_utc: parse_launch_date(&date)?,
        cores: raw
            .cores
            .unwrap_or_default()
            .into_iter()
            .map(normalize_launch_core)
            .collect(),
    })
}

/// Decode and normalize every element of a JSON array, failing on the first
/// bad record
fn parse_collection<R, T>(
    value: Value,
    kind: RecordKind,
    normalize: impl Fn(R) -> std::result::Result<T, MalformedReason>,
) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
{
    let Value::Array(items) = value else {
        return Err(RecoveryError::MissingCollection(kind));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<R>(item)
                .map_err(|e| MalformedReason::Decode(e.to_string()))
                .and_then(&normalize)
                .map_err(|reason| RecoveryError::MalformedRecord {
                    kind,
                    index,
                    reason,
                })
        })
        .collect()
}

pub fn parse_cores(value: Value) -> Result<Vec<Core>> {
    parse_collection(value, RecordKind::Core, normalize_core)
}

pub fn parse_landpads(value: Value) -> Result<Vec<Landpad>> {
    parse_collection(value, RecordKind::Landpad, normalize_landpad)
}

pub fn parse_launches(value: Value) -> Result<Vec<Launch>> {
    parse_collection(value, RecordKind::Launch, normalize_launch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_normalize_core_full() {
        let raw = RawCore {
            id: Some("5e9e28a6f35918c0803b265c".to_string()),
            serial: Some("B1051".to_string()),
            status: Some("active".to_string()),
            reuse_count: Some(9),
            rtls_attempts: Some(2),
            rtls_landings: Some(2),
            asds_attempts: Some(8),
            asds_landings: Some(7),
            last_update: Some("Landed on OCISLY".to_string()),
        };

        let core = normalize_core(raw).unwrap();

        assert_eq!(core.serial.as_deref(), Some("B1051"));
        assert_eq!(core.status, CoreStatus::Active);
        assert_eq!(core.total_flights(), 10);
        assert_eq!(core.landing_attempts(), 10);
        assert_eq!(core.landing_successes(), 9);
    }

    #[test]
    fn test_normalize_core_missing_counts_default_to_zero() {
        let raw = RawCore {
            id: Some("c1".to_string()),
            ..Default::default()
        };

        let core = normalize_core(raw).unwrap();

        assert_eq!(core.reuse_count, 0);
        assert_eq!(core.rtls_attempts, 0);
        assert_eq!(core.asds_landings, 0);
        assert_eq!(core.total_flights(), 1);
        assert_eq!(core.serial, None);
        assert_eq!(core.last_update, None);
        assert_eq!(core.status, CoreStatus::Unknown);
    }

    #[test]
    fn test_normalize_core_missing_id() {
        let raw = RawCore {
            serial: Some("B1049".to_string()),
            ..Default::default()
        };

        assert_eq!(
            normalize_core(raw).unwrap_err(),
            MalformedReason::MissingField("id")
        );
    }

    #[test]
    fn test_normalize_core_rejects_more_landings_than_attempts() {
        let raw = RawCore {
            id: Some("c1".to_string()),
            asds_attempts: Some(1),
            asds_landings: Some(2),
            ..Default::default()
        };

        assert_eq!(
            normalize_core(raw).unwrap_err(),
            MalformedReason::LandingsExceedAttempts {
                landings: 2,
                attempts: 1
            }
        );
    }

    #[test]
    fn test_normalize_core_rejects_overflowing_landings() {
        let raw = RawCore {
            id: Some("c1".to_string()),
            rtls_attempts: Some(u32::MAX),
            asds_attempts: Some(u32::MAX),
            rtls_landings: Some(4_000_000_000),
            asds_landings: Some(4_000_000_000),
            ..Default::default()
        };

        assert!(matches!(
            normalize_core(raw).unwrap_err(),
            MalformedReason::InvalidField {
                field: "landing_attempts",
                ..
            }
        ));
    }

    #[test]
    fn test_normalize_core_rejects_max_reuse_count() {
        let raw = RawCore {
            id: Some("c1".to_string()),
            reuse_count: Some(u32::MAX),
            ..Default::default()
        };

        assert!(matches!(
            normalize_core(raw).unwrap_err(),
            MalformedReason::InvalidField {
                field: "reuse_count",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_cores_overflowing_landings_is_malformed() {
        let value = json!([{
            "id": "a",
            "rtls_attempts": 1,
            "rtls_landings": 4_000_000_000u64,
            "asds_landings": 4_000_000_000u64
        }]);

        assert!(matches!(
            parse_cores(value).unwrap_err(),
            RecoveryError::MalformedRecord {
                kind: RecordKind::Core,
                index: 0,
                reason: MalformedReason::InvalidField {
                    field: "landing_successes",
                    ..
                },
            }
        ));
    }

    #[test]
    fn test_core_totals_saturate() {
        let core = Core {
            id: "c1".to_string(),
            serial: None,
            status: CoreStatus::Active,
            reuse_count: u32::MAX,
            rtls_attempts: u32::MAX,
            rtls_landings: 0,
            asds_attempts: 1,
            asds_landings: 0,
            last_update: None,
        };

        assert_eq!(core.total_flights(), u32::MAX);
        assert_eq!(core.landing_attempts(), u32::MAX);
    }

    #[test]
    fn test_core_status_mapping() {
        assert_eq!(CoreStatus::from_api(Some("retired")), CoreStatus::Retired);
        assert_eq!(CoreStatus::from_api(Some("lost")), CoreStatus::Lost);
        assert_eq!(CoreStatus::from_api(Some("expended")), CoreStatus::Unknown);
        assert_eq!(CoreStatus::from_api(None), CoreStatus::Unknown);
    }

    #[test]
    fn test_normalize_landpad() {
        let raw = RawLandpad {
            id: Some("lz1".to_string()),
            name: Some("LZ-1".to_string()),
            full_name: Some("Landing Zone 1".to_string()),
            pad_type: Some("RTLS".to_string()),
            locality: Some("Cape Canaveral".to_string()),
            region: Some("Florida".to_string()),
            landing_attempts: Some(15),
            landing_successes: Some(14),
            status: Some("retired".to_string()),
        };

        let pad = normalize_landpad(raw).unwrap();

        assert_eq!(pad.pad_type, Some(PadType::Rtls));
        assert_eq!(pad.status, Some(PadStatus::Retired));
        assert_eq!(pad.landing_attempts, 15);
        assert_eq!(pad.landing_successes, 14);
    }

    #[test]
    fn test_normalize_landpad_rejects_more_landings_than_attempts() {
        let raw = RawLandpad {
            id: Some("ocisly".to_string()),
            pad_type: Some("ASDS".to_string()),
            landing_attempts: Some(3),
            landing_successes: Some(4),
            ..Default::default()
        };

        assert_eq!(
            normalize_landpad(raw).unwrap_err(),
            MalformedReason::LandingsExceedAttempts {
                landings: 4,
                attempts: 3
            }
        );
    }

    #[test]
    fn test_normalize_landpad_absent_fields() {
        let raw = RawLandpad {
            id: Some("pad".to_string()),
            ..Default::default()
        };

        let pad = normalize_landpad(raw).unwrap();

        assert_eq!(pad.name, None);
        assert_eq!(pad.pad_type, None);
        assert_eq!(pad.status, None);
        assert_eq!(pad.landing_attempts, 0);
        assert_eq!(pad.landing_successes, 0);
    }

    #[test]
    fn test_normalize_launch() {
        let raw = RawLaunch {
            name: Some("CRS-20".to_string()),
            date_utc: Some("2020-03-07T04:50:31.000Z".to_string()),
            cores: Some(vec![RawLaunchCore {
                core: Some("c1".to_string()),
                flight: Some(2),
                landing_attempt: Some(true),
                landing_success: Some(true),
                landing_type: Some("RTLS".to_string()),
                landpad: Some("lz1".to_string()),
                ..Default::default()
            }]),
        };

        let launch = normalize_launch(raw).unwrap();

        assert_eq!(launch.name, "CRS-20");
        assert_eq!(launch.date_utc.year(), 2020);
        assert_eq!(launch.cores.len(), 1);
        assert_eq!(launch.cores[0].landing_type, Some(LandingType::Rtls));
        assert_eq!(launch.cores[0].flight_number, Some(2));
    }

    #[test]
    fn test_normalize_launch_missing_date() {
        let raw = RawLaunch {
            name: Some("FalconSat".to_string()),
            ..Default::default()
        };

        assert_eq!(
            normalize_launch(raw).unwrap_err(),
            MalformedReason::MissingField("date_utc")
        );
    }

    #[test]
    fn test_normalize_launch_bad_date() {
        let raw = RawLaunch {
            name: Some("FalconSat".to_string()),
            date_utc: Some("yesterday".to_string()),
            cores: None,
        };

        assert!(matches!(
            normalize_launch(raw).unwrap_err(),
            MalformedReason::InvalidField {
                field: "date_utc",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_landing_type_is_absent() {
        let raw = RawLaunchCore {
            landing_type: Some("Parachute".to_string()),
            ..Default::default()
        };

        assert_eq!(normalize_launch_core(raw).landing_type, None);
    }

    #[test]
    fn test_parse_cores_from_json() {
        let value = json!([
            {
                "id": "a",
                "serial": "B1046",
                "status": "lost",
                "reuse_count": 3,
                "rtls_attempts": 0,
                "rtls_landings": 0,
                "asds_attempts": 4,
                "asds_landings": 4,
                "last_update": null,
                "launches": ["x", "y"]
            },
            { "id": "b", "serial": "B0003", "status": "expended", "reuse_count": 0 }
        ]);

        let cores = parse_cores(value).unwrap();

        assert_eq!(cores.len(), 2);
        assert_eq!(cores[0].status, CoreStatus::Lost);
        assert_eq!(cores[0].landing_successes(), 4);
        assert_eq!(cores[1].status, CoreStatus::Unknown);
        assert_eq!(cores[1].landing_attempts(), 0);
    }

    #[test]
    fn test_parse_cores_empty_array() {
        assert!(parse_cores(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_collection_not_a_list() {
        assert_eq!(
            parse_landpads(Value::Null).unwrap_err(),
            RecoveryError::MissingCollection(RecordKind::Landpad)
        );
        assert_eq!(
            parse_launches(json!({ "docs": [] })).unwrap_err(),
            RecoveryError::MissingCollection(RecordKind::Launch)
        );
    }

    #[test]
    fn test_parse_collection_reports_index_of_bad_record() {
        let value = json!([
            { "id": "a" },
            { "serial": "B1060" }
        ]);

        assert_eq!(
            parse_cores(value).unwrap_err(),
            RecoveryError::MalformedRecord {
                kind: RecordKind::Core,
                index: 1,
                reason: MalformedReason::MissingField("id"),
            }
        );
    }

    #[test]
    fn test_parse_landpads_rejects_more_landings_than_attempts() {
        let value = json!([
            { "id": "lz1", "type": "RTLS", "landing_attempts": 15, "landing_successes": 14 },
            { "id": "jrti", "type": "ASDS", "landing_attempts": 0, "landing_successes": 1 }
        ]);

        assert_eq!(
            parse_landpads(value).unwrap_err(),
            RecoveryError::MalformedRecord {
                kind: RecordKind::Landpad,
                index: 1,
                reason: MalformedReason::LandingsExceedAttempts {
                    landings: 1,
                    attempts: 0
                },
            }
        );
    }

    #[test]
    fn test_parse_collection_decode_error() {
        let value = json!([{ "id": "a", "reuse_count": -1 }]);

        let err = parse_cores(value).unwrap_err();

        assert!(matches!(
            err,
            RecoveryError::MalformedRecord {
                index: 0,
                reason: MalformedReason::Decode(_),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_launches_null_cores() {
        let value = json!([
            { "name": "Starlink-1", "date_utc": "2019-11-11T14:56:00.000Z", "cores": null },
            {
                "name": "Starlink-2",
                "date_utc": "2020-01-07T02:19:21.000Z",
                "cores": [{ "core": null, "landing_attempt": null, "landing_type": null }]
            }
        ]);

        let launches = parse_launches(value).unwrap();

        assert!(launches[0].cores.is_empty());
        assert_eq!(launches[1].cores[0].core_id, None);
        assert_eq!(launches[1].cores[0].landing_attempt, None);
    }
}
