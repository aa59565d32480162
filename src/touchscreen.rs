use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::ft6336u::Ft6336u;
use crate::gt911::Gt911;
use crate::orientation::{LogicalPoint, Orientation, Screen};
use crate::Error;

/// Blocking interface shared by every supported controller.
///
/// Coordinates are always logical: they follow the orientation set through
/// [`Touchscreen::set_orientation`], and `(0, 0)` is the top-left corner of
/// the display as the user sees it.
pub trait Touchscreen {
  type Error;

  fn screen(&self) -> &Screen;

  fn screen_mut(&mut self) -> &mut Screen;

  /// Read up to `points.len()` touches.
  ///
  /// Returns the number of touches the controller reports, which may exceed
  /// the number written to `points`.
  fn touches(&mut self, points: &mut [LogicalPoint]) -> Result<usize, Self::Error>;

  fn orientation(&self) -> Orientation {
    self.screen().orientation()
  }

  /// Takes effect on the next read.
  fn set_orientation(&mut self, orientation: Orientation) {
    self.screen_mut().set_orientation(orientation);
  }

  /// Logical width in the current orientation.
  fn width(&self) -> u16 {
    self.screen().width()
  }

  /// Logical height in the current orientation.
  fn height(&self) -> u16 {
    self.screen().height()
  }

  /// First touch, if any.
  fn touch(&mut self) -> Result<Option<LogicalPoint>, Self::Error> {
    let mut point = [LogicalPoint::default()];
    let count = self.touches(&mut point)?;
    Ok((count > 0).then_some(point[0]))
  }
}

impl<I, E> Touchscreen for Gt911<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  type Error = Error<E>;

  fn screen(&self) -> &Screen {
    Gt911::screen(self)
  }

  fn screen_mut(&mut self) -> &mut Screen {
    Gt911::screen_mut(self)
  }

  fn touches(&mut self, points: &mut [LogicalPoint]) -> Result<usize, Self::Error> {
    Gt911::touches(self, points)
  }
}

impl<I, E> Touchscreen for Ft6336u<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  type Error = Error<E>;

  fn screen(&self) -> &Screen {
    Ft6336u::screen(self)
  }

  fn screen_mut(&mut self) -> &mut Screen {
    Ft6336u::screen_mut(self)
  }

  fn touches(&mut self, points: &mut [LogicalPoint]) -> Result<usize, Self::Error> {
    Ft6336u::touches(self, points)
  }
}
