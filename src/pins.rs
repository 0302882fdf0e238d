//! GPIO / peripheral pin assignments for the ChargeGuard board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Fast-charge enable line (load switch on the charger's mode input).
/// HIGH = fast charging allowed.
pub const FAST_CHARGE_GPIO: i32 = 26;

/// Cooling fan MOSFET gate.  HIGH = fan running.
pub const FAN_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line (10 kΩ pull-up on board).
pub const DHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// I²C bus (LCD backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// PCF8574 backpack address.
pub const LCD_I2C_ADDR: u8 = crate::drivers::lcd::DEFAULT_ADDRESS;

/// I²C clock.  The PCF8574 is rated to 100 kHz.
pub const I2C_BAUD_HZ: u32 = 100_000;
