//! sma-chart: data windowing and coordinate mapping for a close-price chart
//! with a simple moving average overlay.
//!
//! The crate computes what a renderer needs to draw (projected points, axis
//! ticks, crosshair inspection) and leaves pixel drawing, event wiring and
//! data fetching to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartPipeline};
pub use error::{ChartError, ChartResult};
