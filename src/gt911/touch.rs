use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::defs::{point_register, TouchStatus, POINT_LEN};
use super::{Gt911, Reg};
use crate::orientation::{LogicalPoint, TouchPoint};
use crate::Error;

impl<I, E> Gt911<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Read the current touches into `points`, blocking on the bus.
  ///
  /// Returns the number of touches the chip reports, which may exceed
  /// `points.len()`; only the first `points.len()` are filled. A status that
  /// is not ready yet counts as no touch. The point buffer is released after
  /// a ready status even when no point was requested.
  pub fn touches(&mut self, points: &mut [LogicalPoint]) -> Result<usize, Error<E>> {
    let [b] = self.read::<1>(Reg::TouchStat)?;
    let status = TouchStatus::from_bits(b);
    let count = status.valid_count().unwrap_or(0) as usize;

    for (index, point) in points.iter_mut().take(count).enumerate() {
      let mut raw = [0u8; POINT_LEN];
      self.read_bytes(point_register(index), &mut raw)?;
      *point = self.screen.map(TouchPoint::from_le_bytes(raw));
    }

    if status.buffer_ready() && self.write_bytes(Reg::TouchStat, &[0]).is_err() {
      warn!("gt911: failed to clear touch status");
    }

    Ok(count)
  }
}
