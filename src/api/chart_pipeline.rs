use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{Bar, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CrosshairState, InteractionMode, InteractionState};
use crate::render::Renderer;

use super::ChartConfig;
use super::chart_state::{
    ChartPhase, ChartPoints, ChartState, PlotLayout, SeriesData, canonicalize_bars, derive_frame,
};
use super::inspection::{Inspection, inspect_at};
use super::series_loader::{LoadOutcome, LoadTicket, normalize_symbol};

/// Main orchestration facade consumed by host applications.
///
/// `ChartPipeline` owns the only [`ChartState`]. Every transition builds the
/// next state from immutable inputs and swaps it in once it is complete, so a
/// failed transition leaves the previous state untouched.
///
/// Event sources (resize observers, drag recognizers, pointer listeners,
/// async fetches) call the transition methods; the pipeline does not know
/// where the events come from.
#[derive(Debug)]
pub struct ChartPipeline {
    config: ChartConfig,
    layout: Option<PlotLayout>,
    committed_offset: usize,
    pending_load: Option<LoadTicket>,
    next_generation: u64,
    interaction: InteractionState,
    state: Arc<ChartState>,
}

impl ChartPipeline {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layout: None,
            committed_offset: 0,
            pending_load: None,
            next_generation: 0,
            interaction: InteractionState::default(),
            state: Arc::new(ChartState::Empty),
        })
    }

    /// Creates a pipeline and sizes it in one step.
    pub fn with_viewport(config: ChartConfig, viewport: Viewport) -> ChartResult<Self> {
        let mut pipeline = Self::new(config)?;
        pipeline.resize(viewport)?;
        Ok(pipeline)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Shared handle to the current state snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<ChartState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn layout(&self) -> Option<PlotLayout> {
        self.layout
    }

    #[must_use]
    pub fn committed_offset(&self) -> usize {
        self.committed_offset
    }

    #[must_use]
    pub fn moving_average_len(&self) -> usize {
        self.config.moving_average_len
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn crosshair(&self) -> CrosshairState {
        self.interaction.crosshair()
    }

    /// Replaces the full series and recomputes the moving average.
    ///
    /// The committed offset is kept and re-clamped against the new length.
    pub fn load_series(&mut self, bars: Vec<Bar>) -> ChartResult<()> {
        let original_count = bars.len();
        let bars = canonicalize_bars(bars);
        debug!(
            original_count,
            canonical_count = bars.len(),
            moving_average_len = self.config.moving_average_len,
            "load series"
        );

        let series = Arc::new(SeriesData::new(
            Arc::from(bars),
            self.config.moving_average_len,
        )?);
        let (state, offset) = self.next_state(series, self.layout, 0, true)?;
        self.commit(state, offset);
        Ok(())
    }

    /// Changes the moving-average length and re-derives the window.
    pub fn set_moving_average_len(&mut self, moving_average_len: usize) -> ChartResult<()> {
        if moving_average_len == 0 {
            return Err(ChartError::InvalidArgument(
                "moving average length must be > 0".to_owned(),
            ));
        }
        let series = self.state.series().ok_or(ChartError::NotReady)?;
        let series = Arc::new(series.with_moving_average_len(moving_average_len)?);

        let (state, offset) = self.next_state(series, self.layout, 0, true)?;
        debug!(moving_average_len, "set moving average length");
        self.config.moving_average_len = moving_average_len;
        self.commit(state, offset);
        Ok(())
    }

    /// Recomputes the visible item count for a new canvas size.
    ///
    /// Before any series is loaded this only records the layout.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let layout = PlotLayout::new(viewport, &self.config)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            item_count = layout.item_count,
            "resize"
        );

        if let Some(series) = self.state.series() {
            let (state, offset) = self.next_state(Arc::clone(series), Some(layout), 0, true)?;
            self.commit(state, offset);
        }
        self.layout = Some(layout);
        Ok(())
    }

    /// Applies a horizontal drag of `delta_px` pixels.
    ///
    /// Positive deltas scroll back in time. Intermediate updates only move
    /// the visible window; the offset is committed when `is_final` is set.
    pub fn pan(&mut self, delta_px: f64, is_final: bool) -> ChartResult<()> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidArgument(
                "pan delta must be finite".to_owned(),
            ));
        }
        let series = self.state.series().ok_or(ChartError::NotReady)?;
        if self.layout.is_none() {
            return Err(ChartError::NotReady);
        }

        let delta_items = (delta_px / self.config.item_width_px).round() as i64;
        let (state, offset) =
            self.next_state(Arc::clone(series), self.layout, delta_items, is_final)?;
        trace!(
            delta_px,
            delta_items,
            is_final,
            committed_offset = offset,
            "pan"
        );
        self.interaction.on_pan(is_final);
        self.commit(state, offset);
        Ok(())
    }

    /// Renderer-facing output of the current window.
    pub fn current_points(&self) -> ChartResult<&ChartPoints> {
        self.state
            .frame()
            .map(|frame| &frame.points)
            .ok_or(ChartError::NotReady)
    }

    /// Inspects the item nearest to `pixel_x`.
    ///
    /// Positions outside the plot clamp to the first/last visible item.
    /// `Ok(None)` means the window is empty.
    pub fn index_at(&self, pixel_x: f64) -> ChartResult<Option<Inspection>> {
        match self.state.as_ref() {
            ChartState::Windowed { series, frame } => Ok(inspect_at(
                series,
                frame,
                pixel_x,
                self.config.tooltip_flip_ratio,
            )),
            _ => Err(ChartError::NotReady),
        }
    }

    /// Moves the crosshair and returns what is under it, if anything.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Inspection> {
        self.interaction.on_pointer_move(x, y);
        let inspection = self.index_at(x).ok().flatten();
        self.interaction
            .set_snap(inspection.map(|found| (found.index, found.pixel_x)));
        inspection
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Registers a new load for `symbol`, superseding any pending one.
    pub fn begin_load(&mut self, symbol: &str) -> LoadTicket {
        self.next_generation += 1;
        let ticket = LoadTicket {
            generation: self.next_generation,
            symbol: normalize_symbol(symbol),
        };
        debug!(
            symbol = %ticket.symbol,
            generation = ticket.generation,
            "begin series load"
        );
        self.pending_load = Some(ticket.clone());
        ticket
    }

    /// Applies the result of a load started with [`Self::begin_load`].
    ///
    /// Failures never surface as errors here: the previous state is kept and
    /// the outcome reports why nothing changed.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: ChartResult<Vec<Bar>>,
    ) -> LoadOutcome {
        if self.pending_load.as_ref() != Some(&ticket) {
            debug!(
                symbol = %ticket.symbol,
                generation = ticket.generation,
                "ignoring superseded series load"
            );
            return LoadOutcome::Stale;
        }
        self.pending_load = None;

        let bars = match result {
            Ok(bars) => bars,
            Err(err) => {
                warn!(symbol = %ticket.symbol, error = %err, "series load failed");
                return LoadOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match self.load_series(bars) {
            Ok(()) => {
                self.config.symbol = ticket.symbol;
                let bar_count = self.state.series().map_or(0, |series| series.len());
                LoadOutcome::Applied { bar_count }
            }
            Err(err) => {
                warn!(symbol = %ticket.symbol, error = %err, "rejecting loaded series");
                LoadOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn pending_load(&self) -> Option<&LoadTicket> {
        self.pending_load.as_ref()
    }

    /// Hands the current points to `renderer`; a no-op until a window exists.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        match self.state.frame() {
            Some(frame) => renderer.render(&frame.points),
            None => {
                trace!(phase = ?self.phase(), "skipping render without window");
                Ok(())
            }
        }
    }

    fn next_state(
        &self,
        series: Arc<SeriesData>,
        layout: Option<PlotLayout>,
        pending_delta: i64,
        is_final: bool,
    ) -> ChartResult<(ChartState, usize)> {
        let Some(layout) = layout else {
            return Ok((ChartState::Loaded { series }, self.committed_offset));
        };

        let (frame, selection) = derive_frame(
            &series,
            layout,
            &self.config,
            self.committed_offset,
            pending_delta,
            is_final,
        )?;
        let state = ChartState::Windowed {
            series,
            frame: Arc::new(frame),
        };
        Ok((state, selection.committed_offset))
    }

    fn commit(&mut self, state: ChartState, committed_offset: usize) {
        self.state = Arc::new(state);
        self.committed_offset = committed_offset;
    }
}
