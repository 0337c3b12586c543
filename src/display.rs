//! Core display operations

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::command::{
    BIAS_SYSTEM, DISPLAY_CONTROL, EXTENDED_INSTRUCTION, FUNCTION_SET, SET_VOP, SET_X_ADDRESS,
    SET_Y_ADDRESS, TEMPERATURE_CONTROL,
};
use crate::config::{Config, DisplayMode};
use crate::error::Error;
use crate::font::{self, CELL_WIDTH, GLYPH_WIDTH};
use crate::interface::DisplayInterface;

type DriverError<I, BL> =
    Error<<I as DisplayInterface>::Error, <BL as embedded_hal::pwm::ErrorType>::Error>;
type DisplayResult<I, BL> = core::result::Result<(), DriverError<I, BL>>;

/// Core display driver for the PCD8544
///
/// Owns the hardware interface, the backlight pin, and a bit-packed
/// off-screen frame buffer sized to the configured resolution. Rendering
/// operations mutate only the buffer; [`flush`](Self::flush) streams it to
/// the panel. The direct printing operations bypass the buffer entirely and
/// write straight to display RAM.
///
/// The two text paths lay glyphs out differently and are kept separate on
/// purpose: buffer rendering advances one fixed cell per character and
/// writes no separator column, direct printing advances by glyph width and
/// appends one blank column after every glyph.
///
/// ## Type Parameters
///
/// * `I` - Hardware interface implementing [`DisplayInterface`]
/// * `BL` - Backlight pin implementing [`SetDutyCycle`]
/// * `B` - Frame buffer storage, e.g. `[u8; 504]` or a `Vec<u8>`
pub struct Display<I, BL, B>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Hardware interface
    interface: I,
    /// Backlight PWM pin
    backlight: BL,
    /// Display configuration
    config: Config,
    /// Off-screen frame buffer, one byte per (column, row group)
    buffer: B,
    /// Last value written to the backlight output
    backlight_level: u8,
}

impl<I, BL, B> Display<I, BL, B>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display instance
    ///
    /// The buffer must be exactly `config.dimensions.buffer_size()` bytes;
    /// it is owned by the driver for its whole lifetime and never resized.
    /// The backlight level starts at 0 (off) until
    /// [`set_backlight`](Self::set_backlight) or [`init`](Self::init) drives
    /// the pin.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length does not match the configured
    /// dimensions. Use [`try_new`](Self::try_new) for a fallible version.
    pub fn new(interface: I, backlight: BL, config: Config, buffer: B) -> Self {
        let expected = config.dimensions.buffer_size();
        assert!(
            buffer.as_ref().len() == expected,
            "frame buffer length mismatch: required {} bytes, got {}",
            expected,
            buffer.as_ref().len()
        );
        Self {
            interface,
            backlight,
            config,
            buffer,
            backlight_level: 0,
        }
    }

    /// Try to create a new Display, returning an error on buffer mismatch
    ///
    /// This is the fallible version of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferSizeMismatch` if the buffer length does not
    /// equal `config.dimensions.buffer_size()`.
    pub fn try_new(
        interface: I,
        backlight: BL,
        config: Config,
        buffer: B,
    ) -> core::result::Result<Self, DriverError<I, BL>> {
        let expected = config.dimensions.buffer_size();
        if buffer.as_ref().len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                provided: buffer.as_ref().len(),
            });
        }
        Ok(Self {
            interface,
            backlight,
            config,
            buffer,
            backlight_level: 0,
        })
    }

    /// Perform hardware reset and controller bring-up
    ///
    /// Drives the backlight to the stored level, pulses the reset line, then
    /// sends the fixed initialization sequence: extended instruction mode,
    /// operating voltage, temperature coefficient, bias system, basic
    /// instruction mode, display control. The order is mandatory - command
    /// bytes are interpreted in the context of the active instruction mode.
    /// Finishes by clearing the frame buffer.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I, BL> {
        self.backlight
            .set_duty_cycle_fraction(u16::from(self.backlight_level), 255)
            .map_err(Error::Backlight)?;

        self.interface.reset(delay);

        self.send_command(FUNCTION_SET | EXTENDED_INSTRUCTION)?;
        self.send_command(SET_VOP | (self.config.vop & 0x7F))?;
        self.send_command(TEMPERATURE_CONTROL | self.config.temperature_coefficient as u8)?;
        self.send_command(BIAS_SYSTEM | self.config.bias as u8)?;
        self.send_command(FUNCTION_SET)?;
        self.send_command(DISPLAY_CONTROL | self.config.display_mode as u8)?;

        self.clear_buffer();

        debug!(
            "initialized {}x{} panel, vop={:#04x}",
            self.config.dimensions.cols, self.config.dimensions.rows, self.config.vop
        );
        Ok(())
    }

    /// Position the device write cursor
    ///
    /// Sets the controller's internal column and row-group address. Display
    /// RAM auto-increments the column after each data byte and wraps to the
    /// next row group at the right edge, so the cursor must be repositioned
    /// before any run of data bytes that expects a known origin.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` (before any I/O) if `column >= cols` or
    /// `row_group >= rows / 8`; out-of-range addresses corrupt the
    /// controller's addressing state on real hardware.
    pub fn position_cursor(&mut self, column: u8, row_group: u8) -> DisplayResult<I, BL> {
        let dims = &self.config.dimensions;
        if column >= dims.cols || row_group >= dims.row_groups() {
            return Err(Error::OutOfBounds { column, row_group });
        }
        self.send_command(SET_X_ADDRESS | column)?;
        self.send_command(SET_Y_ADDRESS | row_group)?;
        Ok(())
    }

    /// Clear the frame buffer to all-zero
    ///
    /// No device I/O; the panel keeps its previous image until
    /// [`flush`](Self::flush).
    pub fn clear_buffer(&mut self) {
        for byte in self.buffer.as_mut().iter_mut() {
            *byte = 0x00;
        }
    }

    /// Turn on the pixels set in `content` without disturbing the rest
    ///
    /// Per byte: `buffer[i] |= content[i]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferSizeMismatch` (before any mutation) unless
    /// `content` is exactly the buffer's length.
    pub fn merge_bitmap(&mut self, content: &[u8]) -> DisplayResult<I, BL> {
        let buffer = self.buffer.as_mut();
        if content.len() != buffer.len() {
            return Err(Error::BufferSizeMismatch {
                expected: buffer.len(),
                provided: content.len(),
            });
        }
        for (dst, src) in buffer.iter_mut().zip(content) {
            *dst |= *src;
        }
        Ok(())
    }

    /// Turn off exactly the pixels set in `content`, leaving others untouched
    ///
    /// Per byte: `buffer[i] &= !content[i]`.
    ///
    /// | buffer | content | result |
    /// |--------|---------|--------|
    /// | 0      | 0       | 0      |
    /// | 0      | 1       | 0      |
    /// | 1      | 0       | 1      |
    /// | 1      | 1       | 0      |
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferSizeMismatch` (before any mutation) unless
    /// `content` is exactly the buffer's length.
    pub fn erase_bitmap(&mut self, content: &[u8]) -> DisplayResult<I, BL> {
        let buffer = self.buffer.as_mut();
        if content.len() != buffer.len() {
            return Err(Error::BufferSizeMismatch {
                expected: buffer.len(),
                provided: content.len(),
            });
        }
        for (dst, src) in buffer.iter_mut().zip(content) {
            *dst &= !*src;
        }
        Ok(())
    }

    /// Render one character into the frame buffer at a cell position
    ///
    /// Overwrites (does not merge) the glyph's column bytes starting at
    /// buffer offset `row_cell * cols + column_cell * 6`. The separator
    /// column of the cell is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedChar` for characters outside the font
    /// table and `Error::OutOfBounds` for cell coordinates outside the
    /// panel; the buffer is untouched in both cases.
    pub fn render_char_at(&mut self, c: char, column_cell: u8, row_cell: u8) -> DisplayResult<I, BL> {
        let pattern = font::glyph(c).ok_or(Error::UnsupportedChar(c))?;
        let dims = &self.config.dimensions;
        if column_cell >= dims.cells_per_row() || row_cell >= dims.row_groups() {
            return Err(Error::OutOfBounds {
                column: column_cell,
                row_group: row_cell,
            });
        }
        let start = dims.index_of(column_cell * CELL_WIDTH as u8, row_cell);
        self.buffer.as_mut()[start..start + GLYPH_WIDTH].copy_from_slice(pattern);
        Ok(())
    }

    /// Render a string into the frame buffer at a cell position
    ///
    /// Characters advance by one cell each, left to right on a single row
    /// group. The whole string is validated first - row bounds, fit against
    /// the right edge, and glyph availability - and rejected before any
    /// buffer byte changes, so a failed call never leaves a partial string.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the row is outside the panel or the
    /// string would run past the last cell of the row, and
    /// `Error::UnsupportedChar` for the first character without a glyph.
    pub fn render_string_at(
        &mut self,
        text: &str,
        column_cell: u8,
        row_cell: u8,
    ) -> DisplayResult<I, BL> {
        let dims = &self.config.dimensions;
        if row_cell >= dims.row_groups() {
            return Err(Error::OutOfBounds {
                column: column_cell,
                row_group: row_cell,
            });
        }

        let mut len = 0usize;
        for c in text.chars() {
            if font::glyph(c).is_none() {
                return Err(Error::UnsupportedChar(c));
            }
            len += 1;
        }
        if usize::from(column_cell) + len > usize::from(dims.cells_per_row()) {
            return Err(Error::OutOfBounds {
                column: column_cell,
                row_group: row_cell,
            });
        }

        let mut cell = column_cell;
        for c in text.chars() {
            self.render_char_at(c, cell, row_cell)?;
            cell += 1;
        }
        Ok(())
    }

    /// Stream the frame buffer to the panel
    ///
    /// Positions the device cursor to (0, 0), then transmits every buffer
    /// byte in order as a data byte - exactly `cols * rows / 8`
    /// transmissions per call, regardless of contents.
    pub fn flush(&mut self) -> DisplayResult<I, BL> {
        self.position_cursor(0, 0)?;
        let Self {
            interface, buffer, ..
        } = self;
        for byte in buffer.as_ref() {
            interface.send_data(*byte).map_err(Error::Interface)?;
        }
        debug!("flushed {} bytes", self.buffer.as_ref().len());
        Ok(())
    }

    /// Print one character directly to display RAM, bypassing the buffer
    ///
    /// Transmits the glyph's column bytes followed by one blank separator
    /// column. The device cursor auto-advances, so consecutive calls lay
    /// text out left to right from wherever the cursor currently is.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedChar` (before any I/O) for characters
    /// outside the font table.
    pub fn print_char(&mut self, c: char) -> DisplayResult<I, BL> {
        let pattern = font::glyph(c).ok_or(Error::UnsupportedChar(c))?;
        for byte in pattern {
            self.interface.send_data(*byte).map_err(Error::Interface)?;
        }
        self.interface.send_data(0x00).map_err(Error::Interface)?;
        Ok(())
    }

    /// Print a string directly to display RAM, bypassing the buffer
    ///
    /// No bound is enforced against the panel width; text running past the
    /// right edge wraps according to the controller's own address-wrap
    /// behavior.
    pub fn print_string(&mut self, text: &str) -> DisplayResult<I, BL> {
        for c in text.chars() {
            self.print_char(c)?;
        }
        Ok(())
    }

    /// Clear the physical screen directly
    ///
    /// Positions the cursor to (0, 0) and writes zeros over the whole
    /// display RAM. The in-memory frame buffer is not touched.
    pub fn clear_display(&mut self) -> DisplayResult<I, BL> {
        self.position_cursor(0, 0)?;
        for _ in 0..self.config.dimensions.buffer_size() {
            self.interface.send_data(0x00).map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Set the backlight intensity (0 = off, 255 = full)
    ///
    /// Drives the PWM pin with the matching duty fraction and mirrors the
    /// value for [`backlight`](Self::backlight). The stored level is only
    /// updated once the pin write succeeds.
    pub fn set_backlight(&mut self, value: u8) -> DisplayResult<I, BL> {
        self.backlight
            .set_duty_cycle_fraction(u16::from(value), 255)
            .map_err(Error::Backlight)?;
        self.backlight_level = value;
        Ok(())
    }

    /// Get the last backlight intensity written to the pin
    pub fn backlight(&self) -> u8 {
        self.backlight_level
    }

    /// Set the operating voltage (contrast) at runtime
    ///
    /// Switches to the extended instruction set, programs Vop, and switches
    /// back to basic. Values above 127 are masked to the 7-bit command
    /// range. The configuration mirror is updated after the sequence
    /// completes.
    pub fn set_contrast(&mut self, vop: u8) -> DisplayResult<I, BL> {
        let vop = vop & 0x7F;
        self.send_command(FUNCTION_SET | EXTENDED_INSTRUCTION)?;
        self.send_command(SET_VOP | vop)?;
        self.send_command(FUNCTION_SET)?;
        self.config.vop = vop;
        Ok(())
    }

    /// Set the display control mode at runtime
    ///
    /// Basic-mode command; no instruction mode switch required.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> DisplayResult<I, BL> {
        self.send_command(DISPLAY_CONTROL | mode as u8)?;
        self.config.display_mode = mode;
        Ok(())
    }

    /// Inspect the frame buffer
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &crate::config::Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set a single buffer pixel (used by the `DrawTarget` implementation)
    ///
    /// Out-of-range coordinates are ignored, per the draw-target contract.
    #[cfg(feature = "graphics")]
    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        let dims = self.config.dimensions;
        if x >= u32::from(dims.cols) || y >= u32::from(dims.rows) {
            return;
        }
        let index = dims.index_of(x as u8, (y / 8) as u8);
        let bit = 1u8 << (y % 8);
        if on {
            self.buffer.as_mut()[index] |= bit;
        } else {
            self.buffer.as_mut()[index] &= !bit;
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I, BL> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }
}
