//! PCD8544 command definitions
//!
//! This module defines the command bytes used to control the PCD8544
//! dot-matrix LCD controller. Commands are sent over SPI with the DC pin
//! low for commands and high for data.
//!
//! ## Instruction modes
//!
//! The PCD8544 interprets command bytes contextually. The function set
//! command ([`FUNCTION_SET`]) selects between two instruction modes:
//!
//! - **Basic** (H=0): display control, X/Y address
//! - **Extended** (H=1): temperature control, bias system, operating voltage
//!
//! The same command byte means different things depending on the active
//! mode, so bring-up sequences are strictly ordered: switch to extended,
//! program the analog settings, switch back to basic, enable the display.
//!
//! ## Command structure
//!
//! Every byte follows the pattern:
//! 1. Set DC low (command mode)
//! 2. Assert CS (Chip Select)
//! 3. Shift out one byte, MSB first
//! 4. Deassert CS

// Both instruction modes

/// Function set command (0x20)
///
/// Selects power-down, addressing, and instruction mode via the low bits:
/// OR with [`POWER_DOWN`], [`VERTICAL_ADDRESSING`], [`EXTENDED_INSTRUCTION`].
/// With no bits set: chip active, horizontal addressing, basic instructions.
pub const FUNCTION_SET: u8 = 0x20;

/// Function set bit PD: enter power-down mode
pub const POWER_DOWN: u8 = 0x04;

/// Function set bit V: vertical addressing (column-major auto-increment)
pub const VERTICAL_ADDRESSING: u8 = 0x02;

/// Function set bit H: select the extended instruction set
pub const EXTENDED_INSTRUCTION: u8 = 0x01;

// Basic instruction mode (H=0)

/// Display control command (0x08)
///
/// OR with the D/E mode bits to select blank, normal, all-segments-on, or
/// inverse video. See [`DisplayMode`](crate::config::DisplayMode).
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Set Y address command (0x40)
///
/// OR with the row-group address (0..=5 on a 48-row panel). Each row group
/// is a band of 8 pixel rows sharing one RAM byte per column.
pub const SET_Y_ADDRESS: u8 = 0x40;

/// Set X address command (0x80)
///
/// OR with the column address (0..=83 on an 84-column panel). The address
/// auto-increments after each data byte and wraps to the next row group at
/// the right edge.
pub const SET_X_ADDRESS: u8 = 0x80;

// Extended instruction mode (H=1)

/// Temperature control command (0x04)
///
/// OR with the temperature coefficient (0..=3). Compensates the LCD
/// driving voltage for ambient temperature.
pub const TEMPERATURE_CONTROL: u8 = 0x04;

/// Bias system command (0x10)
///
/// OR with the bias value (0..=7) matching the panel's multiplex ratio.
/// The stock Nokia 5110 panel is driven at a 1:48 mux rate.
pub const BIAS_SYSTEM: u8 = 0x10;

/// Set Vop command (0x80, extended mode)
///
/// OR with the operating voltage value (0..=127). Vop sets the LCD segment
/// drive voltage and is perceived as contrast.
pub const SET_VOP: u8 = 0x80;
