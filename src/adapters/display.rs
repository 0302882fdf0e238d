//! Display adapters.
//!
//! | Adapter       | Output                         |
//! |---------------|--------------------------------|
//! | `LcdDisplay`  | 16×2 LCD via [`Lcd1602`]       |
//! | `LogDisplay`  | `log` lines, when no LCD found |
//!
//! Both skip frames identical to the last one shown.  [`Display`] picks
//! one of them at boot.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::DisplayPort;
use crate::app::presentation::DisplayFrame;
use crate::drivers::lcd::{Lcd1602, LcdError};

pub struct LcdDisplay<I: I2c, D: DelayNs> {
    lcd: Lcd1602<I, D>,
    last: Option<DisplayFrame>,
    errors: u32,
}

impl<I: I2c, D: DelayNs> LcdDisplay<I, D> {
    /// Initialise the panel; fails if nothing answers on the bus.
    pub fn new(mut lcd: Lcd1602<I, D>) -> Result<Self, LcdError> {
        lcd.init()?;
        Ok(Self {
            lcd,
            last: None,
            errors: 0,
        })
    }

    /// Failed redraws since startup.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn draw(&mut self, frame: &DisplayFrame) -> Result<(), LcdError> {
        self.lcd.write_line(0, &frame.line1)?;
        self.lcd.write_line(1, &frame.line2)
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for LcdDisplay<I, D> {
    fn show(&mut self, frame: &DisplayFrame) {
        if self.last.as_ref() == Some(frame) {
            return;
        }
        match self.draw(frame) {
            Ok(()) => self.last = Some(frame.clone()),
            Err(e) => {
                self.errors = self.errors.saturating_add(1);
                self.last = None;
                warn!("LCD: {}", e);
            }
        }
    }
}

/// Fallback display that prints each new frame to the log.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<DisplayFrame>,
    shown: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames actually printed.
    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn last(&self) -> Option<&DisplayFrame> {
        self.last.as_ref()
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        if self.last.as_ref() == Some(frame) {
            return;
        }
        info!("LCD | {:<16} | {:<16}", frame.line1, frame.line2);
        self.shown += 1;
        self.last = Some(frame.clone());
    }
}

/// Whichever display came up at boot.
pub enum Display<I: I2c, D: DelayNs> {
    Panel(LcdDisplay<I, D>),
    Log(LogDisplay),
}

impl<I: I2c, D: DelayNs> Display<I, D> {
    /// Initialise the LCD, falling back to the log if it does not answer.
    pub fn detect(lcd: Lcd1602<I, D>) -> Self {
        match LcdDisplay::new(lcd) {
            Ok(panel) => {
                info!("LCD: initialised");
                Self::Panel(panel)
            }
            Err(e) => {
                warn!("LCD: {}, mirroring the display to the log", e);
                Self::Log(LogDisplay::new())
            }
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, Self::Panel(_))
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for Display<I, D> {
    fn show(&mut self, frame: &DisplayFrame) {
        match self {
            Self::Panel(panel) => panel.show(frame),
            Self::Log(log) => log.show(frame),
        }
    }
}
