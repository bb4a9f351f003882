//! SSD1306 OLED display wrapper.
//!
//! Draws whatever [`View`] the mode controller reports. Menus use the
//! same geometry the menu model pages by: a 12 px title bar and 10 px rows.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use vfd_clock::clock::DateTime;
use vfd_clock::config::{DISPLAY_WIDTH, MENU_HEADER_HEIGHT, MENU_ROW_HEIGHT, SET_CLOCK_PAGE_SIZE};
use vfd_clock::menu::Page;
use vfd_clock::{Error, ModeKind, View};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

fn text<I2C>(display: &mut Display<I2C>, s: &str, x: i32, y: i32)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = Text::new(s, Point::new(x, y), style(&FONT_6X10)).draw(display);
}

/// Render one frame for `view`.
pub fn draw<I2C>(display: &mut Display<I2C>, view: &View<'_>) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    match view {
        View::Clock(time) => draw_clock(display, time),
        View::Menu(page) => draw_menu(display, page),
        View::SetClock { page, editing } => draw_set_clock(display, page, *editing),
        View::Placeholder(kind) => draw_placeholder(display, *kind),
    }

    display.flush().map_err(|_| Error::Display)
}

fn draw_clock<I2C>(display: &mut Display<I2C>, time: &DateTime)
where
    I2C: embedded_hal::i2c::I2c,
{
    let hh_mm = time.format_time();
    let _ = Text::new(hh_mm.as_str(), Point::new(14, 30), style(&FONT_10X20)).draw(display);
    text(display, time.format().as_str(), 0, 56);
}

fn header<I2C>(display: &mut Display<I2C>, title: &str, page: &Page<'_>)
where
    I2C: embedded_hal::i2c::I2c,
{
    text(display, title, 0, 9);

    if page.count > 1 {
        let mut indicator: String<8> = String::new();
        let _ = write!(indicator, "{}/{}", page.number + 1, page.count);
        let x = i32::from(DISPLAY_WIDTH) - 6 * indicator.len() as i32;
        text(display, indicator.as_str(), x, 9);
    }
}

/// Vertical list, ">" marks the highlighted row.
fn draw_menu<I2C>(display: &mut Display<I2C>, page: &Page<'_>)
where
    I2C: embedded_hal::i2c::I2c,
{
    header(display, "Menu", page);

    for row in page.rows() {
        let marker = if row.highlighted { ">" } else { " " };
        let mut line: String<24> = String::new();
        let _ = write!(line, "{} {}", marker, row.item.label);
        let baseline = (row.slot as i32 + 1) * i32::from(MENU_ROW_HEIGHT) - 1;
        let y = i32::from(MENU_HEADER_HEIGHT) + baseline;
        text(display, line.as_str(), 0, y);
    }
}

/// Fields side by side: label on top, value below. The highlighted field is
/// bracketed, and starred while being edited.
fn draw_set_clock<I2C>(display: &mut Display<I2C>, page: &Page<'_>, editing: bool)
where
    I2C: embedded_hal::i2c::I2c,
{
    header(display, "Set Clock", page);

    let column = i32::from(DISPLAY_WIDTH) / SET_CLOCK_PAGE_SIZE as i32;
    for row in page.rows() {
        let x = row.slot as i32 * column;
        text(display, row.item.label, x, 30);

        let mut value: String<12> = String::new();
        let _ = match (row.item.value, row.highlighted, editing) {
            (Some(v), true, true) => write!(value, "*{}*", v.value),
            (Some(v), true, false) => write!(value, "[{}]", v.value),
            (Some(v), false, _) => write!(value, " {}", v.value),
            (None, true, _) => write!(value, "[OK]"),
            (None, false, _) => write!(value, " OK"),
        };
        text(display, value.as_str(), x, 46);
    }
}

fn draw_placeholder<I2C>(display: &mut Display<I2C>, kind: ModeKind)
where
    I2C: embedded_hal::i2c::I2c,
{
    let title = match kind {
        ModeKind::SetAlarm => "Set Alarm",
        ModeKind::AdjustBrightness => "Brightness",
        ModeKind::AdjustTemperature => "Temperature",
        ModeKind::Alarm => "ALARM",
        ModeKind::Clock | ModeKind::Menu | ModeKind::SetClock => "",
    };
    text(display, title, 0, 9);
    text(display, "Not available", 0, 34);
}
