//! Panel renderers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use harbor_core::fixtures::{Fixtures, PortKpis, Scenario, WeatherConstraints};
use harbor_core::format::{format_number, format_timestamp, label_for_scenario};

use crate::panel::{Panel, PanelSection};

/// "Port KPIs": headline cards plus container throughput.
pub fn render_kpis(kpis: &PortKpis) -> Panel {
    let mut panel = Panel::new("Port KPIs");
    panel.sections.push(
        PanelSection::default()
            .item("Berth Occupancy", format!("{}%", kpis.berth_occupancy))
            .item(
                "Crane Productivity",
                format!("{} moves/hr", kpis.crane_productivity),
            )
            .item(
                "Vessel Turnaround",
                format!("{} hrs", kpis.vessel_turnaround_time),
            )
            .item("Yard Utilization", format!("{}%", kpis.yard_utilization))
            .item("Gate Traffic", format!("{} trucks/hr", kpis.gate_traffic)),
    );

    let throughput = &kpis.container_throughput;
    panel.sections.push(
        PanelSection::headed("Container Throughput")
            .item("Daily", format!("{} TEU", format_number(throughput.daily)))
            .item("Monthly", format!("{} TEU", format_number(throughput.monthly)))
            .item("Yearly", format!("{} TEU", format_number(throughput.yearly))),
    );
    panel
}

/// "Scenario Controls": available scenarios and, when one is playing,
/// its narration.
pub fn render_scenarios(scenarios: &BTreeMap<String, Scenario>, active: Option<&str>) -> Panel {
    let mut panel = Panel::new("Scenario Controls");

    let mut available = PanelSection::headed("Scenarios");
    for key in scenarios.keys() {
        available = available.item(key.as_str(), label_for_scenario(key));
    }
    panel.sections.push(available);

    match active.and_then(|key| scenarios.get_key_value(key)) {
        Some((key, scenario)) => {
            panel.status = Some(format!(
                "Playing {} ({})",
                label_for_scenario(key),
                format_timestamp(&scenario.timestamp)
            ));
            panel.sections.extend(scenario_details(scenario));
        }
        None => panel.status = Some("Select a scenario".to_string()),
    }
    panel
}

fn scenario_details(scenario: &Scenario) -> Vec<PanelSection> {
    let mut sections = Vec::new();

    if let Some(vessel) = &scenario.vessel {
        sections.push(PanelSection {
            heading: Some(vessel.name.clone()),
            text: Some(format!(
                "{} • {} m • Draft {} m",
                vessel.vessel_type, vessel.length_m, vessel.draft_m
            )),
            items: Vec::new(),
        });
    }

    if !scenario.waiting_vessels.is_empty() {
        let mut waiting = PanelSection::headed("Waiting Vessels");
        for vessel in &scenario.waiting_vessels {
            waiting = waiting.item(
                vessel.name.as_str(),
                format!("{} hrs", vessel.waiting_time_hours),
            );
        }
        sections.push(waiting);
    }

    if let Some(impact) = &scenario.kpi_impact {
        let mut section = PanelSection::headed("KPI Impact");
        for (label, value) in impact {
            section = section.item(label.replace('_', " "), impact_value(value));
        }
        sections.push(section);
    }

    sections
}

fn impact_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// "Port Weather & Limits" with an update time footer.
pub fn render_weather(constraints: &WeatherConstraints, updated: DateTime<Utc>) -> Panel {
    let mut panel = Panel::new("Port Weather & Limits");
    panel.sections.push(
        PanelSection::default()
            .item("Wind Limit", format!("{} kn", constraints.wind_limit_knots))
            .item("Wave Limit", format!("{} m", constraints.wave_limit_m))
            .item(
                "Visibility",
                format!("{} nm", constraints.visibility_limit_nm),
            ),
    );
    panel.meta = Some(format!("Updated {}", updated.format("%H:%M")));
    panel
}

/// Every overlay panel for the loaded fixtures.
pub fn render_dashboard(
    fixtures: &Fixtures,
    active_scenario: Option<&str>,
    updated: DateTime<Utc>,
) -> Vec<Panel> {
    vec![
        render_kpis(&fixtures.kpis),
        render_scenarios(&fixtures.scenarios, active_scenario),
        render_weather(&fixtures.kpis.weather_constraints, updated),
    ]
}
