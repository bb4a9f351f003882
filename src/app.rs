//! Input core: decoder + debouncer feeding the mode controller.
//!
//! Two drivers are supported:
//!
//! - [`App::poll`] - the main loop samples all three lines each tick and
//!   the app runs its own [`QuadratureDecoder`].
//! - [`App::service`] - an edge handler already decoded the encoder (see
//!   [`encoder::handoff`](crate::encoder::handoff)); the main loop passes
//!   the drained event plus the switch sample.
//!
//! Both paths end in the same dispatch: rotation, then press, then the idle
//! check.

use crate::button::Debouncer;
use crate::config::DeviceConfig;
use crate::encoder::{Decoder, QuadratureDecoder, RotationEvent};
use crate::error::Error;
use crate::mode::{Command, Controller, ModeKind};

/// Result of one main-loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Update {
    pub rotation: RotationEvent,
    pub pressed: bool,
    pub timed_out: bool,
    /// Mode before this iteration.
    pub from: ModeKind,
    /// Mode after this iteration.
    pub to: ModeKind,
    /// Something visible changed; redraw.
    pub dirty: bool,
    pub command: Option<Command>,
}

impl Update {
    pub fn mode_changed(&self) -> bool {
        self.from != self.to
    }
}

/// Owns the input services and the controller they drive.
#[derive(Debug)]
pub struct App {
    decoder: QuadratureDecoder,
    button: Debouncer,
    controller: Controller,
}

impl App {
    pub fn new(config: &DeviceConfig) -> Result<Self, Error> {
        Ok(Self {
            decoder: QuadratureDecoder::new(),
            button: Debouncer::new(config.debounce_interval_ms),
            controller: Controller::new(config)?,
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Polled driver: sample levels for CLK, DT and the switch at `now_ms`.
    pub fn poll(
        &mut self,
        clk_level: bool,
        dt_level: bool,
        switch_level: bool,
        now_ms: u64,
    ) -> Update {
        let rotation = self.decoder.decode(clk_level, dt_level);
        self.service(rotation, switch_level, now_ms)
    }

    /// Event-driven driver: `rotation` was decoded elsewhere.
    pub fn service(&mut self, rotation: RotationEvent, switch_level: bool, now_ms: u64) -> Update {
        let from = self.controller.kind();

        let mut dirty = self.controller.on_rotation(rotation, now_ms);

        let pressed = self.button.pressed(switch_level, now_ms);
        let command = if pressed {
            dirty = true;
            self.controller.on_press(now_ms)
        } else {
            None
        };

        let timed_out = self.controller.tick(now_ms);
        let to = self.controller.kind();

        Update {
            rotation,
            pressed,
            timed_out,
            from,
            to,
            dirty: dirty || timed_out || from != to,
            command,
        }
    }
}
