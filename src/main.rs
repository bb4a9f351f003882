//! vfd-clock firmware entry point (nRF52840).
//!
//! The encoder edge task runs on an interrupt-mode executor (SWI1) so it
//! preempts the main loop, including the blocking display flush. The main
//! loop runs on the thread-mode executor, one iteration per [`TICK_MS`]:
//!   1. take the encoder event (edge task slot, or sample the lines when
//!      built with `polled-encoder`)
//!   2. sample the selector line
//!   3. let the [`App`] dispatch rotation, press and idle timeout
//!   4. redraw when something changed or the clock face is due

#![no_std]
#![no_main]

mod ui;

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
#[cfg(not(feature = "polled-encoder"))]
use embassy_executor::InterruptExecutor;
#[cfg(not(feature = "polled-encoder"))]
use embassy_nrf::interrupt;
#[cfg(not(feature = "polled-encoder"))]
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::gpio::{Input, Pin as _, Pull};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker};
use panic_probe as _;

use vfd_clock::clock::{DateTime, SoftClock};
use vfd_clock::config::{DeviceConfig, RENDER_INTERVAL_MS, TICK_MS};
use vfd_clock::{App, Command};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Runs the encoder task above thread mode.
#[cfg(not(feature = "polled-encoder"))]
static ENCODER_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[cfg(not(feature = "polled-encoder"))]
#[interrupt]
unsafe fn EGU1_SWI1() {
    ENCODER_EXECUTOR.on_interrupt()
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    let device = DeviceConfig::default();
    info!(
        "vfd-clock: CLK=P0.{} DT=P0.{} SW=P0.{} debounce={}ms rows={}",
        device.clock_pin,
        device.data_pin,
        device.switch_pin,
        device.debounce_interval_ms,
        device.items_per_page
    );

    let mut app = match App::new(&device) {
        Ok(app) => app,
        Err(e) => defmt::panic!("Invalid device config: {}", e),
    };

    // Encoder + selector (pins must match `config::ENCODER_*_PIN`).
    let clk = ui::input::encoder_line(p.P0_11.degrade());
    let dt = ui::input::encoder_line(p.P0_12.degrade());
    let switch = Input::new(p.P0_24, Pull::Up);

    #[cfg(not(feature = "polled-encoder"))]
    {
        interrupt::EGU1_SWI1.set_priority(Priority::P6);
        let encoder_spawner = ENCODER_EXECUTOR.start(interrupt::EGU1_SWI1);
        defmt::unwrap!(encoder_spawner.spawn(ui::input::encoder_task(clk, dt)));
    }

    // Display on TWIM0: SDA P0.26, SCL P0.27. A full-frame flush takes
    // ~25 ms at 400 kHz; polled builds miss encoder edges for that long.
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let mut display = match ui::display::init(i2c) {
        Ok(display) => Some(display),
        Err(e) => {
            warn!("Display init failed: {}, running headless", e);
            None
        }
    };

    // No RTC on this board revision: keep time from uptime until set.
    let mut clock = SoftClock::new(DateTime::DEFAULT, now_ms());
    let mut last_render: Option<u64> = None;
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    info!("Entering main loop");

    loop {
        let now = now_ms();

        #[cfg(feature = "polled-encoder")]
        let update = app.poll(clk.is_high(), dt.is_high(), switch.is_high(), now);
        #[cfg(not(feature = "polled-encoder"))]
        let update = app.service(ui::input::ENCODER.take(), switch.is_high(), now);

        ui::log_update(&update);

        if let Some(Command::SetDateTime(time)) = update.command {
            info!("Clock set to {}", time);
            clock.set(time, now);
        }

        let due = last_render.map_or(true, |t| now.saturating_sub(t) >= RENDER_INTERVAL_MS);
        if update.dirty || due {
            app.controller_mut().set_time(clock.now(now));
            if let Some(display) = display.as_mut() {
                if let Err(e) = ui::display::draw(display, &app.controller().view()) {
                    warn!("Display: {}", e);
                }
            }
            last_render = Some(now);
        }

        ticker.next().await;
    }
}
