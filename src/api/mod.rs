mod chart_config;
mod chart_pipeline;
mod chart_state;
mod inspection;
mod json_contract;
mod series_loader;

pub use chart_config::ChartConfig;
pub use chart_pipeline::ChartPipeline;
pub use chart_state::{
    ChartPhase, ChartPoints, ChartState, PlotLayout, SeriesData, WindowedFrame,
    canonicalize_bars, derive_frame,
};
pub use inspection::Inspection;
pub use json_contract::{CHART_POINTS_JSON_SCHEMA_V1, ChartPointsJsonContractV1};
pub use series_loader::{LoadOutcome, LoadTicket, normalize_symbol, parse_history_json};
