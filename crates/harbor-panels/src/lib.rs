//! Text panels overlaid on the dashboard scene: port KPIs, scenario
//! narration and weather limits.
//!
//! Renderers are pure functions from fixture records to [`Panel`]s. A panel
//! serialises for a UI host and prints as plain text through `Display`.

pub mod panel;
pub mod render;

pub use harbor_core::format::label_for_scenario;
pub use panel::{Panel, PanelItem, PanelSection};
pub use render::{render_dashboard, render_kpis, render_scenarios, render_weather};
