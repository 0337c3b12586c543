//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};
use crate::font;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of columns (width in pixels, corresponds to segment outputs)
    pub cols: u8,
    /// Number of pixel rows (height in pixels, corresponds to commons)
    pub rows: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - cols == 0 or cols > MAX_COLUMNS (84)
    /// - rows == 0 or rows > MAX_ROWS (48)
    /// - rows % 8 != 0 (each buffer byte packs 8 vertically stacked pixels)
    pub fn new(cols: u8, rows: u8) -> Result<Self, BuilderError> {
        if cols == 0 || cols > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        if rows == 0 || rows > MAX_ROWS || !rows.is_multiple_of(8) {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Calculate required frame buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        (self.cols as usize * self.rows as usize) / 8
    }

    /// Number of row groups (bands of 8 pixel rows)
    pub fn row_groups(&self) -> u8 {
        self.rows / 8
    }

    /// Number of text cells that fit on one row group
    ///
    /// A cell is one glyph plus its one-column separator
    /// ([`font::CELL_WIDTH`] columns wide).
    pub fn cells_per_row(&self) -> u8 {
        self.cols / font::CELL_WIDTH as u8
    }

    /// Linear frame buffer index for a (column, row group) pair
    ///
    /// The buffer is laid out row group by row group, one byte per column
    /// within each group. This is the only place the coordinate mapping is
    /// computed; callers must have validated `column < cols` and
    /// `row_group < row_groups()`.
    pub fn index_of(&self, column: u8, row_group: u8) -> usize {
        row_group as usize * self.cols as usize + column as usize
    }
}

/// Temperature coefficient for LCD voltage compensation
///
/// The controller raises the LCD driving voltage as temperature drops;
/// the coefficient selects how steeply.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum TemperatureCoefficient {
    /// Coefficient 0 (1 mV/K)
    #[default]
    TC0 = 0,
    /// Coefficient 1 (9 mV/K)
    TC1 = 1,
    /// Coefficient 2 (17 mV/K)
    TC2 = 2,
    /// Coefficient 3 (24 mV/K)
    TC3 = 3,
}

/// Bias system setting
///
/// Must match the panel's multiplex ratio; the stock Nokia 5110 panel is
/// driven at 1:48.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum BiasMode {
    /// 1:100 multiplex rate
    Bias1To100 = 0,
    /// 1:80 multiplex rate
    Bias1To80 = 1,
    /// 1:65 multiplex rate
    Bias1To65 = 2,
    /// 1:48 multiplex rate
    Bias1To48 = 3,
    /// 1:40 / 1:34 multiplex rate
    #[default]
    Bias1To40 = 4,
    /// 1:24 multiplex rate
    Bias1To24 = 5,
    /// 1:18 / 1:16 multiplex rate
    Bias1To18 = 6,
    /// 1:10 / 1:9 / 1:8 multiplex rate
    Bias1To10 = 7,
}

/// Display control mode
///
/// Value bits are the D and E bits of the display control command.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum DisplayMode {
    /// All segments off
    Blank = 0b000,
    /// Normal (non-inverted) video
    #[default]
    Normal = 0b100,
    /// All segments on
    AllSegmentsOn = 0b001,
    /// Inverse video
    InverseVideo = 0b101,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the PCD8544 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Operating voltage (contrast), 0..=127
    pub vop: u8,
    /// Temperature coefficient
    pub temperature_coefficient: TemperatureCoefficient,
    /// Bias system setting
    pub bias: BiasMode,
    /// Display control mode programmed at initialization
    pub display_mode: DisplayMode,
}

/// Builder for constructing display configuration
///
/// Defaults reproduce the common Nokia 5110 module bring-up values.
///
/// # Example
///
/// ```
/// use pcd8544::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(84, 48) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).vop(56).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Operating voltage (contrast), 0..=127
    vop: u8,
    /// Temperature coefficient
    temperature_coefficient: TemperatureCoefficient,
    /// Bias system setting
    bias: BiasMode,
    /// Display control mode programmed at initialization
    display_mode: DisplayMode,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Middle-of-the-road contrast that works on most modules
            vop: 0x31,
            temperature_coefficient: TemperatureCoefficient::TC0,
            bias: BiasMode::Bias1To40,
            display_mode: DisplayMode::Normal,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the operating voltage (contrast), 0..=127
    ///
    /// Values above 127 are masked to the 7-bit command range.
    pub fn vop(mut self, value: u8) -> Self {
        self.vop = value & 0x7F;
        self
    }

    /// Set the temperature coefficient
    pub fn temperature_coefficient(mut self, value: TemperatureCoefficient) -> Self {
        self.temperature_coefficient = value;
        self
    }

    /// Set the bias system setting
    pub fn bias(mut self, value: BiasMode) -> Self {
        self.bias = value;
        self
    }

    /// Set the display control mode programmed at initialization
    pub fn display_mode(mut self, value: DisplayMode) -> Self {
        self.display_mode = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            vop: self.vop,
            temperature_coefficient: self.temperature_coefficient,
            bias: self.bias,
            display_mode: self.display_mode,
        })
    }
}
