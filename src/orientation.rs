//! Coordinate mapping between the sensor's raw axes and the application's
//! column/row axes.
//!
//! Both supported panels are natively portrait: `x` runs along the short edge
//! and `y` along the long edge. The logical origin `(0, 0)` is always the
//! top-left corner of the display as currently oriented.
//!
//! | orientation | connector | col | row |
//! |---|---|---|---|
//! | [`Orientation::Landscape`] | bottom | `y_res-1-y` | `x` |
//! | [`Orientation::Portrait`] | left | `x` | `y` |
//! | [`Orientation::Landscape2`] | top | `y` | `x_res-1-x` |
//! | [`Orientation::Portrait2`] | right | `x_res-1-x` | `y_res-1-y` |

use crate::config::Resolution;

/// Raw touch coordinate as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
  pub x: u16,
  pub y: u16,
}

impl TouchPoint {
  pub const fn new(x: u16, y: u16) -> Self {
    Self { x, y }
  }

  /// Decode the 4-byte little-endian `x_lo, x_hi, y_lo, y_hi` layout used by
  /// GT911 point registers.
  pub const fn from_le_bytes(b: [u8; 4]) -> Self {
    Self::new(u16::from_le_bytes([b[0], b[1]]), u16::from_le_bytes([b[2], b[3]]))
  }
}

/// Orientation-corrected coordinate reported to applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicalPoint {
  pub col: u16,
  pub row: u16,
}

impl LogicalPoint {
  pub const fn new(col: u16, row: u16) -> Self {
    Self { col, row }
  }
}

/// Logical rotation of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
  /// Portrait, connector on the left.
  Portrait,
  /// Landscape, 90 degrees clockwise from portrait, connector at the bottom.
  #[default]
  Landscape,
  /// Portrait, 180 degrees from [`Orientation::Portrait`], connector on the right.
  Portrait2,
  /// Landscape, 180 degrees from [`Orientation::Landscape`], connector at the top.
  Landscape2,
}

impl Orientation {
  /// Returns `true` for the two landscape orientations.
  pub const fn is_landscape(self) -> bool {
    matches!(self, Orientation::Landscape | Orientation::Landscape2)
  }

  /// Returns `true` for the two portrait orientations.
  pub const fn is_portrait(self) -> bool {
    !self.is_landscape()
  }

  /// The orientation that undoes this one.
  ///
  /// For the landscape pair the inverse works on the transposed rectangle, so
  /// it must be applied with `x_res` and `y_res` swapped.
  pub const fn inverse(self) -> Self {
    match self {
      Orientation::Landscape => Orientation::Landscape2,
      Orientation::Landscape2 => Orientation::Landscape,
      other => other,
    }
  }

  /// Which panel edge the flex connector sits on in this orientation.
  pub const fn connector(self) -> Connector {
    match self {
      Orientation::Landscape => Connector::Bottom,
      Orientation::Portrait => Connector::Left,
      Orientation::Landscape2 => Connector::Top,
      Orientation::Portrait2 => Connector::Right,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Orientation::Portrait => "portrait",
      Orientation::Landscape => "landscape",
      Orientation::Portrait2 => "portrait2",
      Orientation::Landscape2 => "landscape2",
    }
  }
}

/// Connector-relative way of naming an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Connector {
  Bottom,
  Left,
  Top,
  Right,
}

impl From<Connector> for Orientation {
  fn from(connector: Connector) -> Self {
    match connector {
      Connector::Bottom => Orientation::Landscape,
      Connector::Left => Orientation::Portrait,
      Connector::Top => Orientation::Landscape2,
      Connector::Right => Orientation::Portrait2,
    }
  }
}

impl From<Orientation> for Connector {
  fn from(orientation: Orientation) -> Self {
    orientation.connector()
  }
}

/// Map a raw reading to logical coordinates.
///
/// Out-of-range inputs are clamped to the panel before mapping.
pub fn map(point: TouchPoint, orientation: Orientation, x_res: u16, y_res: u16) -> LogicalPoint {
  let x_max = x_res.saturating_sub(1);
  let y_max = y_res.saturating_sub(1);
  let x = point.x.min(x_max);
  let y = point.y.min(y_max);

  match orientation {
    Orientation::Landscape => LogicalPoint::new(y_max - y, x),
    Orientation::Portrait => LogicalPoint::new(x, y),
    Orientation::Landscape2 => LogicalPoint::new(y, x_max - x),
    Orientation::Portrait2 => LogicalPoint::new(x_max - x, y_max - y),
  }
}

/// Inverse of [`map`]: recover the raw reading that produced `point`.
pub fn unmap(point: LogicalPoint, orientation: Orientation, x_res: u16, y_res: u16) -> TouchPoint {
  let (x_res, y_res) = if orientation.is_landscape() { (y_res, x_res) } else { (x_res, y_res) };
  let raw = map(TouchPoint::new(point.col, point.row), orientation.inverse(), x_res, y_res);
  TouchPoint::new(raw.col, raw.row)
}

/// Panel geometry plus the current orientation.
///
/// Every driver owns one of these; the engine borrows it on each decode so an
/// orientation change takes effect on the next touch read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Screen {
  resolution: Resolution,
  orientation: Orientation,
}

impl Screen {
  pub const fn new(resolution: Resolution, orientation: Orientation) -> Self {
    Self { resolution, orientation }
  }

  pub const fn resolution(&self) -> Resolution {
    self.resolution
  }

  pub(crate) fn set_resolution(&mut self, resolution: Resolution) {
    self.resolution = resolution;
  }

  pub const fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub fn set_orientation(&mut self, orientation: Orientation) {
    self.orientation = orientation;
  }

  /// Logical width in the current orientation.
  pub const fn width(&self) -> u16 {
    if self.orientation.is_landscape() {
      self.resolution.y
    } else {
      self.resolution.x
    }
  }

  /// Logical height in the current orientation.
  pub const fn height(&self) -> u16 {
    if self.orientation.is_landscape() {
      self.resolution.x
    } else {
      self.resolution.y
    }
  }

  pub fn map(&self, point: TouchPoint) -> LogicalPoint {
    map(point, self.orientation, self.resolution.x, self.resolution.y)
  }

  pub fn unmap(&self, point: LogicalPoint) -> TouchPoint {
    unmap(point, self.orientation, self.resolution.x, self.resolution.y)
  }
}
