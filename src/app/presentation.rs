//! Rendering of [`SystemState`] for the 16×2 display and the status query.
//!
//! Both renderers are total: before the first valid reading they fall back
//! to placeholders (`--.-` on the display, [`SENTINEL`] in the status body).

use core::fmt::{self, Write as _};

use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::app::state::{SENTINEL, SystemState};

/// Visible characters per display line.
pub const DISPLAY_COLS: usize = 16;

/// Character drawn at the end of line 2 while the fan runs.
pub const FAN_MARKER: char = '*';

/// Two display lines, each at most [`DISPLAY_COLS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    pub line1: heapless::String<DISPLAY_COLS>,
    pub line2: heapless::String<DISPLAY_COLS>,
}

impl DisplayFrame {
    /// Build a frame from arbitrary text, cutting each line at the display
    /// width.
    pub fn new(line1: &str, line2: &str) -> Self {
        let mut frame = Self::default();
        let _ = Truncate(&mut frame.line1).write_str(line1);
        let _ = Truncate(&mut frame.line2).write_str(line2);
        frame
    }
}

/// `fmt::Write` adapter that silently drops whatever does not fit.
struct Truncate<'a, const N: usize>(&'a mut heapless::String<N>);

impl<const N: usize> fmt::Write for Truncate<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Render the display frame.
///
/// ```text
/// T:36.5C H:40%
/// Slow Charge    *
/// ```
///
/// Humidity is whole percent so the widest sensor reading,
/// `T:-40.0C H:100%`, still fits the row.
pub fn render_display(state: &SystemState) -> DisplayFrame {
    let mut frame = DisplayFrame::default();
    let reading = &state.last_reading;

    let mut line1 = Truncate(&mut frame.line1);
    let _ = if state.has_reading() {
        write!(
            line1,
            "T:{:.1}C H:{:.0}%",
            reading.temperature_c, reading.humidity_percent
        )
    } else {
        line1.write_str("T:--.-C H:--%")
    };

    let mut line2 = Truncate(&mut frame.line2);
    let _ = if state.fan_on {
        write!(
            line2,
            "{:<width$}{}",
            state.mode.short_label(),
            FAN_MARKER,
            width = DISPLAY_COLS - 1
        )
    } else {
        line2.write_str(state.mode.short_label())
    };

    frame
}

/// Body of the status query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    #[serde(rename = "temperature_C", serialize_with = "two_decimals")]
    pub temperature_c: f32,
    #[serde(serialize_with = "two_decimals")]
    pub humidity_percent: f32,
    pub charging_mode: &'static str,
    pub fan_on: bool,
}

impl StatusReport {
    /// Serialise to the JSON body served by `/status`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Numbers go out with exactly two decimals (`36.50`, `-999.00`).
fn two_decimals<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    let raw = RawValue::from_string(format!("{value:.2}"))
        .map_err(<S::Error as serde::ser::Error>::custom)?;
    raw.serialize(serializer)
}

/// Render the status record.
pub fn render_status(state: &SystemState) -> StatusReport {
    let (temperature_c, humidity_percent) = if state.has_reading() {
        (
            state.last_reading.temperature_c,
            state.last_reading.humidity_percent,
        )
    } else {
        (SENTINEL, SENTINEL)
    };

    StatusReport {
        temperature_c,
        humidity_percent,
        charging_mode: state.mode.label(),
        fan_on: state.fan_on,
    }
}
