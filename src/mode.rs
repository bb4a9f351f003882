//! Top-level mode state machine.
//!
//! The controller owns all navigation state: the current [`Mode`] and a
//! [`Context`] with the menus, the last-activity timestamp and the last
//! known wall-clock time. Every handler receives the context by reference;
//! nothing lives in globals.
//!
//! Button presses drive transitions:
//!
//! | From      | Press                                              |
//! |-----------|----------------------------------------------------|
//! | Clock     | → Menu                                             |
//! | Menu      | → target of the highlighted item                   |
//! | SetClock  | toggle editing on a field, `Done` commits → Clock  |
//! | others    | nothing                                            |
//!
//! Rotation scrolls the active menu, or steps the field being edited.
//! Any mode with a menu or editor falls back to Clock after
//! [`MENU_IDLE_TIMEOUT_MS`] without input.

use crate::clock::DateTime;
use crate::config::{DeviceConfig, MENU_IDLE_TIMEOUT_MS, SET_CLOCK_PAGE_SIZE};
use crate::encoder::RotationEvent;
use crate::error::Error;
use crate::idle::idle_expired;
use crate::menu::{Layout, Menu, MenuAction, MenuItem, Page};

/// Mode names without per-mode state (menu targets, logging, rendering).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Clock,
    Menu,
    SetClock,
    SetAlarm,
    AdjustBrightness,
    AdjustTemperature,
    Alarm,
}

/// Current mode with the state that only exists inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Clock face (initial).
    Clock,
    /// Main menu.
    Menu,
    /// Clock editor. `editing` is set while rotation changes the highlighted
    /// field instead of moving between fields.
    SetClock { editing: bool },
    SetAlarm,
    AdjustBrightness,
    AdjustTemperature,
    /// Alarm ringing. Only entered through [`Controller::enter`].
    Alarm,
}

impl Mode {
    /// Fresh state for `kind`.
    pub fn entered(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Clock => Mode::Clock,
            ModeKind::Menu => Mode::Menu,
            ModeKind::SetClock => Mode::SetClock { editing: false },
            ModeKind::SetAlarm => Mode::SetAlarm,
            ModeKind::AdjustBrightness => Mode::AdjustBrightness,
            ModeKind::AdjustTemperature => Mode::AdjustTemperature,
            ModeKind::Alarm => Mode::Alarm,
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Clock => ModeKind::Clock,
            Mode::Menu => ModeKind::Menu,
            Mode::SetClock { .. } => ModeKind::SetClock,
            Mode::SetAlarm => ModeKind::SetAlarm,
            Mode::AdjustBrightness => ModeKind::AdjustBrightness,
            Mode::AdjustTemperature => ModeKind::AdjustTemperature,
            Mode::Alarm => ModeKind::Alarm,
        }
    }

    /// Modes that return to the clock face when left alone.
    fn times_out(&self) -> bool {
        !matches!(self, Mode::Clock | Mode::Alarm)
    }
}

/// Request for a collaborator outside the input core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Write the edited time to the RTC.
    SetDateTime(DateTime),
}

/// What the renderer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View<'a> {
    Clock(DateTime),
    Menu(Page<'a>),
    SetClock { page: Page<'a>, editing: bool },
    /// Modes without a screen of their own yet.
    Placeholder(ModeKind),
}

// ═══════════════════════════════════════════════════════════════════════════
// Menu definitions
// ═══════════════════════════════════════════════════════════════════════════

pub const MAIN_MENU: [MenuItem; 5] = [
    MenuItem::new("Set Clock", MenuAction::Open(ModeKind::SetClock)),
    MenuItem::new("Set Alarm", MenuAction::Open(ModeKind::SetAlarm)),
    MenuItem::new("Brightness", MenuAction::Open(ModeKind::AdjustBrightness)),
    MenuItem::new("Temperature", MenuAction::Open(ModeKind::AdjustTemperature)),
    MenuItem::new("Close Menu", MenuAction::Close),
];

const FIELD_HOUR: usize = 0;
const FIELD_MINUTE: usize = 1;
const FIELD_MONTH: usize = 2;
const FIELD_DAY: usize = 3;
const FIELD_YEAR: usize = 4;

pub const SET_CLOCK_FIELDS: [MenuItem; 6] = [
    MenuItem::field("Hour", 0, 0, 23),
    MenuItem::field("Minute", 0, 0, 59),
    MenuItem::field("Month", 1, 1, 12),
    MenuItem::field("Day", 1, 1, 31),
    MenuItem::field("Year", 2024, 2000, 2099),
    MenuItem::new("Done", MenuAction::Done),
];

// ═══════════════════════════════════════════════════════════════════════════
// Context
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the mode handlers read or mutate besides the mode itself.
#[derive(Debug, Clone)]
pub struct Context {
    pub main_menu: Menu,
    pub set_clock: Menu,
    last_activity_ms: u64,
    idle_timeout_ms: u64,
    time: DateTime,
}

impl Context {
    fn touch(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    fn seed_set_clock(&mut self) {
        let time = self.time;
        let fields = [
            (FIELD_HOUR, i16::from(time.hour)),
            (FIELD_MINUTE, i16::from(time.minute)),
            (FIELD_MONTH, i16::from(time.month)),
            (FIELD_DAY, i16::from(time.day)),
            (FIELD_YEAR, time.year.min(i16::MAX as u16) as i16),
        ];
        for (index, value) in fields {
            if let Some(field) = self.set_clock.value_mut(index) {
                field.set(value);
            }
        }
    }

    fn field(&self, index: usize) -> i16 {
        match self.set_clock.item(index).and_then(|item| item.value) {
            Some(field) => field.value,
            None => panic!("set-clock item {} is not a value field", index),
        }
    }

    /// Time currently entered in the clock editor. Field bounds keep every
    /// value inside its target type.
    fn edited_time(&self) -> DateTime {
        DateTime::with_fields(
            self.field(FIELD_YEAR) as u16,
            self.field(FIELD_MONTH) as u8,
            self.field(FIELD_DAY) as u8,
            self.field(FIELD_HOUR) as u8,
            self.field(FIELD_MINUTE) as u8,
        )
    }
}

/// Scroll `menu` one step in the direction of `event`. Returns whether the
/// highlight moved.
fn scroll(menu: &mut Menu, event: RotationEvent) -> bool {
    let before = menu.highlighted_index();
    match event {
        RotationEvent::Clockwise => menu.scroll_down(),
        RotationEvent::CounterClockwise => menu.scroll_up(),
        RotationEvent::None => {}
    }
    menu.highlighted_index() != before
}

fn step(event: RotationEvent) -> i16 {
    match event {
        RotationEvent::Clockwise => 1,
        RotationEvent::CounterClockwise => -1,
        RotationEvent::None => 0,
    }
}

/// Mode reached by selecting the highlighted main-menu item.
fn main_menu_target(ctx: &Context) -> ModeKind {
    match ctx.main_menu.highlighted_item().action {
        MenuAction::Open(ModeKind::Menu) => panic!("main menu item re-opens the menu"),
        MenuAction::Open(kind) => kind,
        MenuAction::Close => ModeKind::Clock,
        MenuAction::Edit | MenuAction::Done => {
            panic!("main menu item has no mode target")
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Controller
// ═══════════════════════════════════════════════════════════════════════════

/// What a press resolved to inside the current mode.
enum PressOutcome {
    Stay(Mode),
    Enter(ModeKind),
    Commit,
}

/// Press on the highlighted clock-editor item while not editing.
fn set_clock_outcome(ctx: &Context) -> PressOutcome {
    match ctx.set_clock.highlighted_item().action {
        MenuAction::Edit => PressOutcome::Stay(Mode::SetClock { editing: true }),
        MenuAction::Done => PressOutcome::Commit,
        MenuAction::Close | MenuAction::Open(_) => {
            panic!("set-clock item is neither a field nor Done")
        }
    }
}

/// Mode state machine plus its context.
#[derive(Debug, Clone)]
pub struct Controller {
    mode: Mode,
    ctx: Context,
}

impl Controller {
    /// Build the menus for `config`. Starts on the clock face.
    pub fn new(config: &DeviceConfig) -> Result<Self, Error> {
        config.validate()?;
        let main_menu = Menu::build(
            &MAIN_MENU,
            Layout::List {
                rows: config.items_per_page,
            },
        )?;
        let set_clock = Menu::build(
            &SET_CLOCK_FIELDS,
            Layout::Horizontal {
                page_size: SET_CLOCK_PAGE_SIZE,
            },
        )?;

        Ok(Self {
            mode: Mode::Clock,
            ctx: Context {
                main_menu,
                set_clock,
                last_activity_ms: 0,
                idle_timeout_ms: MENU_IDLE_TIMEOUT_MS,
                time: DateTime::DEFAULT,
            },
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn main_menu(&self) -> &Menu {
        &self.ctx.main_menu
    }

    pub fn set_clock_menu(&self) -> &Menu {
        &self.ctx.set_clock
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.ctx.last_activity_ms
    }

    pub fn idle_timeout_ms(&self) -> u64 {
        self.ctx.idle_timeout_ms
    }

    pub fn set_idle_timeout_ms(&mut self, timeout_ms: u64) {
        self.ctx.idle_timeout_ms = timeout_ms;
    }

    /// Latest wall-clock time from the RTC layer.
    pub fn set_time(&mut self, time: DateTime) {
        self.ctx.time = time;
    }

    pub fn time(&self) -> DateTime {
        self.ctx.time
    }

    /// Switch to `kind`, resetting the menu or editor it uses.
    pub fn enter(&mut self, kind: ModeKind, now_ms: u64) {
        match kind {
            ModeKind::Menu => self.ctx.main_menu.reset(),
            ModeKind::SetClock => {
                self.ctx.set_clock.reset();
                self.ctx.seed_set_clock();
            }
            _ => {}
        }
        self.mode = Mode::entered(kind);
        self.ctx.touch(now_ms);
    }

    /// Handle one accepted button press.
    pub fn on_press(&mut self, now_ms: u64) -> Option<Command> {
        self.ctx.touch(now_ms);

        let outcome = match self.mode {
            Mode::Clock => PressOutcome::Enter(ModeKind::Menu),
            Mode::Menu => PressOutcome::Enter(main_menu_target(&self.ctx)),
            Mode::SetClock { editing: true } => {
                PressOutcome::Stay(Mode::SetClock { editing: false })
            }
            Mode::SetClock { editing: false } => set_clock_outcome(&self.ctx),
            mode @ (Mode::SetAlarm
            | Mode::AdjustBrightness
            | Mode::AdjustTemperature
            | Mode::Alarm) => PressOutcome::Stay(mode),
        };

        match outcome {
            PressOutcome::Stay(mode) => {
                self.mode = mode;
                None
            }
            PressOutcome::Enter(kind) => {
                self.enter(kind, now_ms);
                None
            }
            PressOutcome::Commit => {
                let time = self.ctx.edited_time();
                self.ctx.time = time;
                self.enter(ModeKind::Clock, now_ms);
                Some(Command::SetDateTime(time))
            }
        }
    }

    /// Handle one decoded rotation. Returns whether the view changed.
    pub fn on_rotation(&mut self, event: RotationEvent, now_ms: u64) -> bool {
        if event.is_none() {
            return false;
        }
        self.ctx.touch(now_ms);

        match self.mode {
            Mode::Menu => scroll(&mut self.ctx.main_menu, event),
            Mode::SetClock { editing: true } => {
                self.ctx.set_clock.adjust_highlighted(step(event))
            }
            Mode::SetClock { editing: false } => scroll(&mut self.ctx.set_clock, event),
            Mode::Clock
            | Mode::SetAlarm
            | Mode::AdjustBrightness
            | Mode::AdjustTemperature
            | Mode::Alarm => false,
        }
    }

    /// Apply the idle timeout. Returns `true` if it forced a return to Clock.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.mode.times_out()
            && idle_expired(self.ctx.last_activity_ms, now_ms, self.ctx.idle_timeout_ms)
        {
            self.enter(ModeKind::Clock, now_ms);
            return true;
        }
        false
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> View<'_> {
        match self.mode {
            Mode::Clock => View::Clock(self.ctx.time),
            Mode::Menu => View::Menu(self.ctx.main_menu.visible_page()),
            Mode::SetClock { editing } => View::SetClock {
                page: self.ctx.set_clock.visible_page(),
                editing,
            },
            other => View::Placeholder(other.kind()),
        }
    }
}
