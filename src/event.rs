use crate::orientation::LogicalPoint;

/// Indicates how the touch changed compared to the previous report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
  /// Nothing new. Carries no position.
  #[default]
  None,
  /// A finger touched the surface.
  Down,
  /// The finger was lifted. Reports where it left, not a new reading.
  Up,
  /// The finger moved to a different position.
  Move,
}

impl EventKind {
  pub const fn is_none(self) -> bool {
    matches!(self, EventKind::None)
  }

  /// Returns `true` while a finger is on the surface.
  pub const fn is_contact(self) -> bool {
    matches!(self, EventKind::Down | EventKind::Move)
  }

  /// Returns a human-readable string representation of the kind.
  pub const fn as_str(self) -> &'static str {
    match self {
      EventKind::None => "none",
      EventKind::Down => "down",
      EventKind::Up => "up",
      EventKind::Move => "move",
    }
  }
}

/// Single touch event in logical (orientation-corrected) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
  pub kind: EventKind,
  pub col: u16,
  pub row: u16,
}

impl Event {
  /// The "nothing happened" event, `{none, 0, 0}`.
  pub const NONE: Self = Self { kind: EventKind::None, col: 0, row: 0 };

  pub const fn new(kind: EventKind, point: LogicalPoint) -> Self {
    Self { kind, col: point.col, row: point.row }
  }

  pub const fn is_none(&self) -> bool {
    self.kind.is_none()
  }

  pub const fn point(&self) -> LogicalPoint {
    LogicalPoint::new(self.col, self.row)
  }
}

/// Edge detector turning consecutive single-point samples into
/// `down`/`move`/`up` transitions.
///
/// Holds the last event that was reported. Its kind only ever advances along
/// `none -> down -> (move)* -> up -> down -> ...`, and an `up` keeps the
/// position of the `down`/`move` before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tracker {
  last: Event,
}

impl Tracker {
  pub const fn new() -> Self {
    Self { last: Event::NONE }
  }

  /// Last non-`none` event reported, or [`Event::NONE`] after a reset.
  pub const fn last(&self) -> Event {
    self.last
  }

  /// Feed a sample where the controller reports a finger at `at`.
  ///
  /// A position identical to the last reported one yields [`Event::NONE`].
  pub fn touched(&mut self, at: LogicalPoint) -> Event {
    let kind = match self.last.kind {
      EventKind::None | EventKind::Up => EventKind::Down,
      EventKind::Down | EventKind::Move if self.last.point() == at => return Event::NONE,
      EventKind::Down | EventKind::Move => EventKind::Move,
    };
    self.last = Event::new(kind, at);
    self.last
  }

  /// Feed an authoritative "no touch" sample.
  pub fn released(&mut self) -> Event {
    if self.last.kind.is_contact() {
      self.last.kind = EventKind::Up;
      self.last
    } else {
      self.last = Event::NONE;
      Event::NONE
    }
  }
}
