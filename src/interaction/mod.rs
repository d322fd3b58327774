use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// A drag is in progress; the window shows a preview offset.
    Panning,
}

/// Crosshair state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub snapped_index: Option<usize>,
    pub snapped_x: Option<f64>,
}

impl Default for CrosshairState {
    fn default() -> Self {
        Self {
            visible: false,
            x: 0.0,
            y: 0.0,
            snapped_index: None,
            snapped_x: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    crosshair: CrosshairState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            crosshair: CrosshairState::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn crosshair(self) -> CrosshairState {
        self.crosshair
    }

    /// Tracks a pan gesture: a non-final update keeps the chart in
    /// `Panning`, the final one returns it to `Idle`.
    pub fn on_pan(&mut self, is_final: bool) {
        self.mode = if is_final {
            InteractionMode::Idle
        } else {
            InteractionMode::Panning
        };
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.crosshair.visible = true;
        self.crosshair.x = x;
        self.crosshair.y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.crosshair.visible = false;
        self.set_snap(None);
    }

    pub fn set_snap(&mut self, snap: Option<(usize, f64)>) {
        match snap {
            Some((index, x)) => {
                self.crosshair.snapped_index = Some(index);
                self.crosshair.snapped_x = Some(x);
            }
            None => {
                self.crosshair.snapped_index = None;
                self.crosshair.snapped_x = None;
            }
        }
    }
}
