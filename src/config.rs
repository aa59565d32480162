use crate::orientation::Orientation;

/// Minimum spacing between touch-status polls required by the GT911
/// programming guide.
pub(crate) const MIN_POLL_INTERVAL_US: u32 = 1_000;

/// Native panel resolution, `x` along the short edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
  pub x: u16,
  pub y: u16,
}

impl Resolution {
  pub const fn new(x: u16, y: u16) -> Self {
    Self { x, y }
  }

  /// Decode the `x_lo, x_hi, y_lo, y_hi` layout of the GT911 `XY_RES` register.
  pub const fn from_le_bytes(b: [u8; 4]) -> Self {
    Self::new(u16::from_le_bytes([b[0], b[1]]), u16::from_le_bytes([b[2], b[3]]))
  }

  pub const fn is_valid(&self) -> bool {
    self.x != 0 && self.y != 0
  }
}

impl Default for Resolution {
  fn default() -> Self {
    Self::new(320, 480)
  }
}

/// Driver configuration shared by both controllers.
///
/// ```no_run
/// use captouch::{Config, Orientation, Resolution};
///
/// let config = Config::default()
///   .with_resolution(Resolution::new(320, 480))
///   .with_orientation(Orientation::Portrait)
///   .with_poll_interval_us(2_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Panel resolution used by the coordinate mapper. The GT911 bring-up
  /// replaces it with the value read from the chip.
  pub resolution: Resolution,
  /// Orientation in effect until the application changes it.
  pub orientation: Orientation,
  /// Spacing between touch-status polls while idle, in microseconds. Values
  /// below the 1 ms hardware minimum are raised to it by the builder methods
  /// and again when the GT911 engine is created.
  pub poll_interval_us: u32,
}

impl Config {
  pub const fn new(resolution: Resolution, orientation: Orientation, poll_interval_us: u32) -> Self {
    let poll_interval_us =
      if poll_interval_us < MIN_POLL_INTERVAL_US { MIN_POLL_INTERVAL_US } else { poll_interval_us };
    Self { resolution, orientation, poll_interval_us }
  }

  pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
    self.resolution = resolution;
    self
  }

  pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
    self.orientation = orientation;
    self
  }

  pub const fn with_poll_interval_us(self, poll_interval_us: u32) -> Self {
    Self::new(self.resolution, self.orientation, poll_interval_us)
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new(Resolution::default(), Orientation::Landscape, MIN_POLL_INTERVAL_US)
  }
}
