//! Map the API's vessel list onto the dashboard's `AisDataset` record.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use harbor_core::constants::MAX_RECENT_ARRIVALS;
use harbor_core::fixtures::{AisDataset, VesselRecord};

use crate::client::ApiPayload;

/// One vessel as the API reports it. All fields are optional, and numeric
/// fields may arrive as JSON numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiVessel {
    pub mmsi: Option<Value>,
    pub name: Option<String>,
    pub flag: Option<String>,
    pub arrived: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub dwt: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gt: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub built: Option<i32>,
    #[serde(deserialize_with = "lenient_number")]
    pub length: Option<f64>,
    pub vessel_type: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub vtype: Option<i64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lng: Option<f64>,
}

/// Accept `75000`, `"75000"` or `null`. Anything unparseable becomes `None`
/// so one odd field never drops the whole vessel.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed)
}

/// Vessel type label for the API's numeric `vtype` code.
pub fn vessel_type_label(vtype: Option<i64>) -> Option<&'static str> {
    let label = match vtype? {
        0 => "Unknown",
        3 => "Tug / Pilot",
        4 => "High Speed",
        6 => "Passenger",
        7 => "Cargo",
        8 => "Tanker",
        9 => "Yacht/Other",
        10 => "Fishing",
        _ => return None,
    };
    Some(label)
}

/// RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn normalize_vessel(vessel: ApiVessel) -> VesselRecord {
    let vessel_name = non_empty(vessel.name).unwrap_or_else(|| {
        let mmsi = match &vessel.mmsi {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "unknown".to_string(),
        };
        format!("MMSI {mmsi}")
    });
    let vessel_type = non_empty(vessel.vessel_type).unwrap_or_else(|| {
        vessel_type_label(vessel.vtype)
            .unwrap_or("Vessel")
            .to_string()
    });

    VesselRecord {
        vessel_name,
        flag: non_empty(vessel.flag).unwrap_or_else(|| "NA".to_string()),
        arrival_time: vessel.arrived.as_deref().and_then(parse_timestamp),
        dwt: vessel.dwt,
        grt: vessel.gt,
        built_year: vessel.built,
        length_m: vessel.length,
        vessel_type,
        lat: vessel.lat,
        lng: vessel.lng,
    }
}

/// Build the dataset written to disk. `now` stands in for a missing or
/// unreadable payload timestamp.
pub fn normalize(payload: &ApiPayload, port: &str, now: DateTime<Utc>) -> AisDataset {
    let raw: &[Value] = match &payload.data {
        Some(Value::Array(items)) => items,
        _ => &[],
    };

    let recent_arrivals = raw
        .iter()
        .take(MAX_RECENT_ARRIVALS)
        .enumerate()
        .filter_map(|(index, item)| match ApiVessel::deserialize(item) {
            Ok(vessel) => Some(normalize_vessel(vessel)),
            Err(err) => {
                warn!(index, %err, "skipping unreadable vessel");
                None
            }
        })
        .collect();

    AisDataset {
        port: port.to_string(),
        timestamp: payload
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now),
        vessels_in_port: u32::try_from(raw.len()).unwrap_or(u32::MAX),
        recent_arrivals,
        expected_arrivals: Vec::new(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
