//! Static scene layout: the port's fixed infrastructure as placed markers.
//!
//! Nothing here moves. Every marker is a projected fixture point or polyline
//! with a shape the renderer can draw directly.

use serde::{Deserialize, Serialize};

use harbor_core::enums::MarkerKind;
use harbor_core::fixtures::{Berth, ContainerYard, PortLayout, TrafficLane, Warehouse};
use harbor_core::format::{format_number, group_digits};
use harbor_core::types::ScenePoint;

use crate::projection::ScenePlaneProjection;

/// Side length of the square ground plane.
const GROUND_SIZE: f64 = 600.0;
/// Elevation of the boundary outline, just above the ground.
const BOUNDARY_Y: f64 = 0.1;
/// Elevation of traffic lane lines.
const LANE_Y: f64 = 0.2;
/// Berth marker width per meter of berth length.
const BERTH_WIDTH_PER_METER: f64 = 0.05;
/// Sun elevation above the ground plane.
const SUN_HEIGHT: f64 = 200.0;

/// A placed, non-animated scene marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMarker {
    pub name: String,
    pub kind: MarkerKind,
    pub shape: MarkerShape,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum MarkerShape {
    /// Horizontal square plane centred at the origin.
    Plane { size: f64 },
    /// Axis-aligned box; `center.y` is half the height so it sits on the ground.
    Box {
        center: ScenePoint,
        width: f64,
        height: f64,
        depth: f64,
    },
    /// Polyline through the given points. Closed outlines repeat the first point.
    Polyline { points: Vec<ScenePoint>, dashed: bool },
}

/// Build every static marker for a port layout.
pub fn build_layout(layout: &PortLayout, projection: &ScenePlaneProjection) -> Vec<SceneMarker> {
    let mut markers = vec![SceneMarker {
        name: "PortGround".to_string(),
        kind: MarkerKind::Ground,
        shape: MarkerShape::Plane { size: GROUND_SIZE },
        tooltip: None,
    }];

    if let Some(boundary) = boundary_marker(layout, projection) {
        markers.push(boundary);
    }
    markers.extend(layout.berths.iter().map(|b| berth_marker(b, projection)));
    markers.extend(layout.container_yards.iter().map(|y| yard_marker(y, projection)));
    markers.extend(layout.warehouses.iter().map(|w| warehouse_marker(w, projection)));
    markers.extend(layout.traffic_lanes.iter().map(|l| lane_marker(l, projection)));
    markers
}

/// Directional light placement: slightly north-west of the port centre.
pub fn sun_position(layout: &PortLayout, projection: &ScenePlaneProjection) -> ScenePoint {
    let centre = layout.center_coordinates;
    projection
        .project(centre.lat + 0.01, centre.lng - 0.02)
        .with_y(SUN_HEIGHT)
}

fn boundary_marker(layout: &PortLayout, projection: &ScenePlaneProjection) -> Option<SceneMarker> {
    let first = layout.boundaries.first()?;
    let mut points: Vec<ScenePoint> = projection
        .line(&layout.boundaries)
        .into_iter()
        .map(|p| p.with_y(BOUNDARY_Y))
        .collect();
    points.push(projection.project_point(first).with_y(BOUNDARY_Y));

    Some(SceneMarker {
        name: "PortBoundary".to_string(),
        kind: MarkerKind::Boundary,
        shape: MarkerShape::Polyline {
            points,
            dashed: true,
        },
        tooltip: None,
    })
}

fn berth_marker(berth: &Berth, projection: &ScenePlaneProjection) -> SceneMarker {
    SceneMarker {
        name: berth.name.clone(),
        kind: MarkerKind::Berth,
        shape: box_at(
            projection.project(berth.lat, berth.lng),
            berth.length_m * BERTH_WIDTH_PER_METER,
            3.0,
            12.0,
        ),
        tooltip: Some(format!(
            "Berth {}\nType: {}\nLength: {} m",
            berth.id,
            berth.berth_type,
            format_number(berth.length_m)
        )),
    }
}

fn yard_marker(yard: &ContainerYard, projection: &ScenePlaneProjection) -> SceneMarker {
    SceneMarker {
        name: yard.name.clone(),
        kind: MarkerKind::ContainerYard,
        shape: box_at(projection.project(yard.lat, yard.lng), 40.0, 2.0, 25.0),
        tooltip: Some(format!(
            "{}\nCapacity: {} TEU",
            yard.name,
            group_digits(yard.capacity_teu)
        )),
    }
}

fn warehouse_marker(warehouse: &Warehouse, projection: &ScenePlaneProjection) -> SceneMarker {
    SceneMarker {
        name: warehouse.name.clone(),
        kind: MarkerKind::Warehouse,
        shape: box_at(
            projection.project(warehouse.lat, warehouse.lng),
            25.0,
            4.0,
            15.0,
        ),
        tooltip: Some(format!(
            "{}\nArea: {} m²",
            warehouse.name,
            group_digits(warehouse.area_sqm)
        )),
    }
}

fn lane_marker(lane: &TrafficLane, projection: &ScenePlaneProjection) -> SceneMarker {
    SceneMarker {
        name: lane.name.clone(),
        kind: MarkerKind::TrafficLane,
        shape: MarkerShape::Polyline {
            points: projection
                .line(&lane.points)
                .into_iter()
                .map(|p| p.with_y(LANE_Y))
                .collect(),
            dashed: false,
        },
        tooltip: Some(lane.name.clone()),
    }
}

fn box_at(ground: ScenePoint, width: f64, height: f64, depth: f64) -> MarkerShape {
    MarkerShape::Box {
        center: ground.with_y(height / 2.0),
        width,
        height,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_core::fixtures::Fixtures;

    fn setup() -> (PortLayout, ScenePlaneProjection) {
        let layout = Fixtures::builtin().unwrap().layout;
        let projection = ScenePlaneProjection::new(layout.center_coordinates, 0.02);
        (layout, projection)
    }

    #[test]
    fn test_marker_counts() {
        let (layout, projection) = setup();
        let markers = build_layout(&layout, &projection);
        let count = |kind| markers.iter().filter(|m| m.kind == kind).count();
        assert_eq!(count(MarkerKind::Ground), 1);
        assert_eq!(count(MarkerKind::Boundary), 1);
        assert_eq!(count(MarkerKind::Berth), 3);
        assert_eq!(count(MarkerKind::ContainerYard), 2);
        assert_eq!(count(MarkerKind::Warehouse), 2);
        assert_eq!(count(MarkerKind::TrafficLane), 2);
    }

    #[test]
    fn test_boundary_is_closed() {
        let (layout, projection) = setup();
        let markers = build_layout(&layout, &projection);
        let boundary = markers
            .iter()
            .find(|m| m.kind == MarkerKind::Boundary)
            .unwrap();
        match &boundary.shape {
            MarkerShape::Polyline { points, dashed } => {
                assert!(*dashed);
                assert_eq!(points.len(), layout.boundaries.len() + 1);
                assert_eq!(points.first(), points.last());
                assert!(points.iter().all(|p| p.y == BOUNDARY_Y));
            }
            other => panic!("boundary should be a polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_berth_box_dimensions_and_tooltip() {
        let (layout, projection) = setup();
        let markers = build_layout(&layout, &projection);
        let berth = markers.iter().find(|m| m.name == "Berth 2").unwrap();
        match berth.shape {
            MarkerShape::Box {
                center,
                width,
                height,
                depth,
            } => {
                assert!((width - 12.5).abs() < 1e-12);
                assert_eq!(height, 3.0);
                assert_eq!(depth, 12.0);
                assert_eq!(center.y, 1.5);
                let ground = projection.project(31.2045, 29.8789);
                assert_eq!(center.x, ground.x);
                assert_eq!(center.z, ground.z);
            }
            ref other => panic!("berth should be a box, got {other:?}"),
        }
        assert_eq!(
            berth.tooltip.as_deref(),
            Some("Berth B2\nType: General Cargo\nLength: 250 m")
        );
    }

    #[test]
    fn test_yard_and_warehouse_tooltips_group_digits() {
        let (layout, projection) = setup();
        let markers = build_layout(&layout, &projection);
        let yard = markers.iter().find(|m| m.name == "Container Yard 2").unwrap();
        assert_eq!(
            yard.tooltip.as_deref(),
            Some("Container Yard 2\nCapacity: 15,000 TEU")
        );
        let wh = markers.iter().find(|m| m.name == "Warehouse 2").unwrap();
        assert_eq!(wh.tooltip.as_deref(), Some("Warehouse 2\nArea: 7,500 m²"));
    }

    #[test]
    fn test_empty_boundary_is_skipped() {
        let (mut layout, projection) = setup();
        layout.boundaries.clear();
        let markers = build_layout(&layout, &projection);
        assert!(markers.iter().all(|m| m.kind != MarkerKind::Boundary));
    }

    #[test]
    fn test_sun_position_north_west() {
        let (layout, projection) = setup();
        let sun = sun_position(&layout, &projection);
        assert_eq!(sun.y, 200.0);
        assert!(sun.z < 0.0);
        assert!(sun.x < 0.0);
    }
}
