//! HD44780 16×2 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps its 8 output bits onto the LCD's control lines and
//! upper data nibble, so every LCD byte goes out as two 4-bit halves, each
//! latched by pulsing EN:
//!
//! ```text
//! bit  7  6  5  4  3   2   1   0
//!      D7 D6 D5 D4 BL  EN  RW  RS
//! ```
//!
//! Generic over `embedded-hal` 1.0 [`I2c`] and [`DelayNs`], so it runs on
//! `esp-idf-hal`'s `I2cDriver` and against a recording bus in tests.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Default PCF8574 address with A0..A2 pulled high.
pub const DEFAULT_ADDRESS: u8 = 0x27;

pub const COLS: usize = 16;
pub const ROWS: usize = 2;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_DISPLAY_OFF: u8 = 0x08;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError {
    /// The I²C write was not acknowledged.
    Bus,
    /// Row or column outside the 16×2 grid.
    OutOfBounds,
}

impl fmt::Display for LcdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "LCD I2C write failed"),
            Self::OutOfBounds => write!(f, "LCD position out of bounds"),
        }
    }
}

pub struct Lcd1602<I: I2c, D: DelayNs> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Lcd1602<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Power-on initialisation into 4-bit, two-line mode.
    ///
    /// The controller may wake up in 8-bit mode or halfway through a 4-bit
    /// transfer; three `0x3` nibbles resynchronise it either way.
    pub fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_ms(50);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, 0)?;
        self.write_nibble(0x02, 0)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_OFF)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)?;
        self.command(CMD_DISPLAY_ON)
    }

    pub fn clear(&mut self) -> Result<(), LcdError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: usize, row: usize) -> Result<(), LcdError> {
        if col >= COLS || row >= ROWS {
            return Err(LcdError::OutOfBounds);
        }
        let col = u8::try_from(col).map_err(|_| LcdError::OutOfBounds)?;
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row] + col))
    }

    /// Overwrite a whole row: `text` is cut at 16 characters and padded
    /// with spaces so stale characters never linger.
    pub fn write_line(&mut self, row: usize, text: &str) -> Result<(), LcdError> {
        self.set_cursor(0, row)?;
        let mut written = 0;
        for c in text.chars().take(COLS) {
            self.data(glyph(c))?;
            written += 1;
        }
        for _ in written..COLS {
            self.data(b' ')?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bus(&self) -> &I {
        &self.i2c
    }

    // ── Low level ─────────────────────────────────────────────

    fn command(&mut self, byte: u8) -> Result<(), LcdError> {
        self.send(byte, 0)
    }

    fn data(&mut self, byte: u8) -> Result<(), LcdError> {
        self.send(byte, RS)
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), LcdError> {
        self.write_nibble(byte >> 4, mode)?;
        self.write_nibble(byte & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), LcdError> {
        let bits = (nibble << 4) | mode;
        self.expander_write(bits | EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), LcdError> {
        self.i2c
            .write(self.address, &[bits | BACKLIGHT])
            .map_err(|_| LcdError::Bus)
    }
}

/// The HD44780 ROM covers printable ASCII; everything else shows as `?`.
fn glyph(c: char) -> u8 {
    if c.is_ascii_control() {
        return b'?';
    }
    u8::try_from(c).ok().filter(u8::is_ascii).unwrap_or(b'?')
}
