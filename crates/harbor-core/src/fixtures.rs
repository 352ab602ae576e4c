//! Static dashboard fixtures: port layout, AIS vessel list, KPIs, scenarios.
//!
//! These records are loaded once at startup. The built-in set is the
//! Alexandria dataset embedded from `data/*.json`; each file can be
//! overridden from disk through [`DataConfig`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::DataConfig;
use crate::error::FixtureError;
use crate::types::GeoPoint;

const BUILTIN_PORT_LAYOUT: &str = include_str!("../../../data/port-gis.json");
const BUILTIN_AIS: &str = include_str!("../../../data/ais-data.json");
const BUILTIN_KPIS: &str = include_str!("../../../data/kpi-data.json");
const BUILTIN_SCENARIOS: &str = include_str!("../../../data/scenario-data.json");

// --- Port layout ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortLayout {
    pub port_name: String,
    /// Projection origin for the session.
    pub center_coordinates: GeoPoint,
    /// Port boundary polygon (open; the renderer closes it).
    #[serde(default)]
    pub boundaries: Vec<GeoPoint>,
    #[serde(default)]
    pub berths: Vec<Berth>,
    #[serde(default)]
    pub container_yards: Vec<ContainerYard>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub traffic_lanes: Vec<TrafficLane>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Berth {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub length_m: f64,
    #[serde(rename = "type")]
    pub berth_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerYard {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub capacity_teu: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub area_sqm: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLane {
    pub name: String,
    pub points: Vec<GeoPoint>,
}

// --- AIS dataset ---

/// Normalized vessel list, as written by the offline AIS refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisDataset {
    pub port: String,
    pub timestamp: DateTime<Utc>,
    pub vessels_in_port: u32,
    #[serde(default)]
    pub recent_arrivals: Vec<VesselRecord>,
    #[serde(default)]
    pub expected_arrivals: Vec<ExpectedArrival>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub vessel_name: String,
    pub flag: String,
    pub arrival_time: Option<DateTime<Utc>>,
    pub dwt: Option<f64>,
    pub grt: Option<f64>,
    pub built_year: Option<i32>,
    pub length_m: Option<f64>,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedArrival {
    pub mmsi: String,
    pub vessel_name: String,
    pub flag: String,
    pub eta: DateTime<Utc>,
}

// --- KPIs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortKpis {
    /// Percent.
    pub berth_occupancy: f64,
    /// Moves per hour.
    pub crane_productivity: f64,
    pub container_throughput: ContainerThroughput,
    /// Hours.
    pub vessel_turnaround_time: f64,
    /// Percent.
    pub yard_utilization: f64,
    /// Trucks per hour.
    pub gate_traffic: f64,
    pub weather_constraints: WeatherConstraints,
}

/// TEU counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerThroughput {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConstraints {
    pub wind_limit_knots: f64,
    pub wave_limit_m: f64,
    pub visibility_limit_nm: f64,
}

// --- Scenarios ---

/// A timestamped geographic sample along a vessel's route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteWaypoint {
    pub time: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_knots: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A named scenario the operator can play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub vessel: Option<ScenarioVessel>,
    #[serde(default)]
    pub route: Option<Vec<RouteWaypoint>>,
    #[serde(default)]
    pub berth_assignment: Option<BerthAssignment>,
    #[serde(default)]
    pub congestion_level: Option<String>,
    #[serde(default)]
    pub affected_berths: Vec<String>,
    #[serde(default)]
    pub waiting_vessels: Vec<WaitingVessel>,
    #[serde(default)]
    pub kpi_impact: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVessel {
    pub name: String,
    pub mmsi: u64,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub length_m: f64,
    pub dwt: f64,
    pub draft_m: f64,
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerthAssignment {
    pub berth_id: String,
    pub berth_name: String,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingVessel {
    pub name: String,
    pub mmsi: u64,
    pub waiting_time_hours: f64,
    pub scheduled_berth: String,
    pub reason: String,
}

// --- Bundle ---

/// Everything the dashboard loads at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    pub layout: PortLayout,
    pub ais: AisDataset,
    pub kpis: PortKpis,
    pub scenarios: BTreeMap<String, Scenario>,
}

impl Fixtures {
    /// The embedded Alexandria dataset.
    pub fn builtin() -> Result<Self, FixtureError> {
        Ok(Self {
            layout: parse("port layout", BUILTIN_PORT_LAYOUT)?,
            ais: parse("AIS", BUILTIN_AIS)?,
            kpis: parse("KPI", BUILTIN_KPIS)?,
            scenarios: parse("scenario", BUILTIN_SCENARIOS)?,
        })
    }

    /// Built-in dataset with any file overrides from `data` applied.
    pub fn load(data: &DataConfig) -> Result<Self, FixtureError> {
        let mut fixtures = Self::builtin()?;
        if let Some(path) = &data.port_layout {
            fixtures.layout = read("port layout", path)?;
        }
        if let Some(path) = &data.ais {
            fixtures.ais = read_ais(path)?;
        }
        if let Some(path) = &data.kpis {
            fixtures.kpis = read("KPI", path)?;
        }
        if let Some(path) = &data.scenarios {
            fixtures.scenarios = read("scenario", path)?;
        }
        Ok(fixtures)
    }
}

/// Read a normalized AIS dataset file.
pub fn read_ais(path: &Path) -> Result<AisDataset, FixtureError> {
    read("AIS", path)
}

fn read<T: DeserializeOwned>(name: &'static str, path: &Path) -> Result<T, FixtureError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| FixtureError::Io { name, source })?;
    parse(name, &contents)
}

fn parse<T: DeserializeOwned>(name: &'static str, contents: &str) -> Result<T, FixtureError> {
    serde_json::from_str(contents).map_err(|source| FixtureError::Json { name, source })
}
