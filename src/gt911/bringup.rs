use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::defs::{Switch1, VENDOR_ID};
use super::{Gt911, Reg};
use crate::config::Resolution;
use crate::Error;

/// Rows of a register dump page.
const DUMP_ROWS: usize = 16;
/// Bytes per dump row.
const DUMP_ROW_LEN: usize = 16;

/// Chip state read during [`Gt911::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gt911Info {
  /// `VENDOR_ID` as a big-endian word, `0x3931_3100` (`"911\0"`) for a GT911.
  pub vendor_id: u32,
  /// Panel resolution configured in the chip.
  pub resolution: Resolution,
  /// Axis swap/reversal and INT trigger setup.
  pub switch_1: Switch1,
  /// Touch detection threshold.
  pub touch_threshold: u8,
  /// Touch release threshold.
  pub leave_threshold: u8,
}

impl<I, E> Gt911<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Verify the chip and adopt its panel resolution.
  ///
  /// Fails with [`Error::InvalidVendorId`] if the chip does not identify as a
  /// GT911, with [`Error::UnsupportedResolution`] if either axis is zero and
  /// with [`Error::UnsupportedAxisConfig`] unless `SWITCH_1` reverses y only.
  /// On success the resolution replaces the one from [`crate::Config`].
  pub fn init(&mut self) -> Result<Gt911Info, Error<E>> {
    let vendor_id = self.vendor_id()?;
    if vendor_id != VENDOR_ID {
      return Err(Error::InvalidVendorId(vendor_id));
    }

    let resolution = self.read_resolution()?;
    if !resolution.is_valid() {
      return Err(Error::UnsupportedResolution { x: resolution.x, y: resolution.y });
    }

    let switch_1 = self.switch_1()?;
    if !switch_1.is_supported() {
      return Err(Error::UnsupportedAxisConfig(switch_1.into_bits()));
    }
    self.screen.set_resolution(resolution);

    let (touch_threshold, leave_threshold) = self.thresholds()?;

    info!("gt911: resolution {}x{}", resolution.x, resolution.y);
    info!(
      "gt911: y2y={} x2x={} x2y={} int={}",
      switch_1.y2y(),
      switch_1.x2x(),
      switch_1.x2y(),
      switch_1.int_trigger().as_str()
    );
    info!("gt911: touch threshold {}, leave threshold {}", touch_threshold, leave_threshold);

    Ok(Gt911Info { vendor_id, resolution, switch_1, touch_threshold, leave_threshold })
  }

  /// `VENDOR_ID` as a big-endian word.
  pub fn vendor_id(&mut self) -> Result<u32, Error<E>> {
    self.read::<4>(Reg::VendorId).map(u32::from_be_bytes)
  }

  /// Panel resolution configured in the chip, unvalidated.
  pub fn read_resolution(&mut self) -> Result<Resolution, Error<E>> {
    self.read::<4>(Reg::XyRes).map(Resolution::from_le_bytes)
  }

  pub fn switch_1(&mut self) -> Result<Switch1, Error<E>> {
    let [b] = self.read::<1>(Reg::Switch1)?;
    Ok(Switch1::from_bits(b))
  }

  /// `(touch, leave)` thresholds.
  pub fn thresholds(&mut self) -> Result<(u8, u8), Error<E>> {
    let [touch, leave] = self.read::<2>(Reg::Thresh)?;
    Ok((touch, leave))
  }

  /// Read 256 bytes of registers starting at `base` (typically `0x8000` or
  /// `0x8100`), 16 bytes per transaction.
  ///
  /// Rows whose read fails are filled with `0xff`; bit `n` of the returned
  /// mask is set when row `n` failed.
  pub fn dump(&mut self, base: u16, out: &mut [u8; DUMP_ROWS * DUMP_ROW_LEN]) -> u16 {
    let mut failed = 0u16;
    for (row, chunk) in out.chunks_exact_mut(DUMP_ROW_LEN).enumerate() {
      let reg = base.wrapping_add((row * DUMP_ROW_LEN) as u16);
      if self.read_bytes(reg, chunk).is_err() {
        chunk.fill(0xff);
        failed |= 1 << row;
      }
    }
    if failed != 0 {
      debug!("gt911: dump of {=u16:#x} failed rows {=u16:#b}", base, failed);
    }
    failed
  }
}
