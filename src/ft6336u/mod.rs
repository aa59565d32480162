//! FocalTech FT6336U driver.
//!
//! Blocking only: the chip reports up to two touches in a single 13-byte
//! read, so there is no event engine here. Use it through
//! [`crate::Touchscreen`] or the inherent [`Ft6336u::touches`].

mod defs;

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::config::Config;
use crate::orientation::{LogicalPoint, Screen, TouchPoint};
use crate::Error;
use defs::*;
pub use defs::{PointEvent, MAX_POINTS};

/// Chip identity read during [`Ft6336u::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ft6336uInfo {
  /// `FOCALTECH_ID`.
  pub panel_id: u8,
  /// `CIPHER_LOW`: 0 for FT6236U, 1 for FT6336G, 2 for FT6336U.
  pub variant: u8,
  /// Library version, `LIB_VER_H:LIB_VER_L`.
  pub lib_version: u16,
}

/// One raw point record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ft6336uPoint {
  pub event: PointEvent,
  /// Tracking id assigned by the chip.
  pub id: u8,
  /// Raw coordinate, 12 bits per axis.
  pub point: TouchPoint,
  pub weight: u8,
  /// Touch area, `Pn_MISC[7:4]`.
  pub area: u8,
}

impl Ft6336uPoint {
  pub(crate) const EMPTY: Self =
    Self { event: PointEvent::NoEvent, id: 0x0f, point: TouchPoint::new(0, 0), weight: 0, area: 0 };

  /// Decode `XH, XL, YH, YL, WEIGHT, MISC`.
  pub(crate) fn from_bytes(b: &[u8; POINT_LEN]) -> Self {
    let xh = PointXh::from_bits(b[0]);
    let yh = PointYh::from_bits(b[2]);
    let x = u16::from_be_bytes([xh.x_hi(), b[1]]);
    let y = u16::from_be_bytes([yh.y_hi(), b[3]]);
    Self { event: xh.event(), id: yh.id(), point: TouchPoint::new(x, y), weight: b[4], area: b[5] >> 4 }
  }
}

/// Result of [`Ft6336u::raw_touches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouches {
  /// Number of touches reported, 0..=2.
  pub count: u8,
  pub points: [Ft6336uPoint; MAX_POINTS],
}

impl RawTouches {
  /// Iterate over the reported points only.
  pub fn iter(&self) -> impl Iterator<Item = &Ft6336uPoint> {
    self.points[..self.count as usize].iter()
  }
}

/// FT6336U capacitive touch controller.
pub struct Ft6336u<I> {
  i2c: I,
  screen: Screen,
}

impl<I> Ft6336u<I> {
  /// Create a driver; the chip has a fixed address.
  ///
  /// The panel resolution comes from `config`; the chip does not report it.
  /// `config.poll_interval_us` is unused.
  pub fn new(i2c: I, config: Config) -> Self {
    Self { i2c, screen: Screen::new(config.resolution, config.orientation) }
  }

  /// Release the bus.
  pub fn release(self) -> I {
    self.i2c
  }

  /// Panel geometry and orientation used to map touches.
  pub fn screen(&self) -> &Screen {
    &self.screen
  }

  pub fn screen_mut(&mut self) -> &mut Screen {
    &mut self.screen
  }
}

impl<I, E> Ft6336u<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Verify the panel id and cipher registers.
  ///
  /// Fails with [`Error::InvalidChipId`] carrying the first unexpected byte.
  pub fn init(&mut self) -> Result<Ft6336uInfo, Error<E>> {
    let [panel_id] = self.read::<1>(Reg::FocaltechId)?;
    if panel_id != PANEL_ID {
      return Err(Error::InvalidChipId(panel_id));
    }

    let ids = self.read::<5>(Reg::CipherMid)?;
    let at = |reg: Reg| ids[(reg as u8 - Reg::CipherMid as u8) as usize];

    let (mid, low, high) = (at(Reg::CipherMid), at(Reg::CipherLow), at(Reg::CipherHigh));
    if mid != CIPHER_MID {
      return Err(Error::InvalidChipId(mid));
    }
    if low > CIPHER_LOW_MAX {
      return Err(Error::InvalidChipId(low));
    }
    if high != CIPHER_HIGH {
      return Err(Error::InvalidChipId(high));
    }

    let lib_version = u16::from_be_bytes([at(Reg::LibVerH), at(Reg::LibVerL)]);
    info!("ft6336u: panel {=u8:#x}, variant {}, lib {=u16:#x}", panel_id, low, lib_version);

    Ok(Ft6336uInfo { panel_id, variant: low, lib_version })
  }

  /// Read the status and both point records in one transaction.
  pub fn raw_touches(&mut self) -> Result<RawTouches, Error<E>> {
    let report = self.read::<REPORT_LEN>(Reg::TdStatus)?;

    let count = TdStatus::from_bits(report[0]).count();
    if count as usize > MAX_POINTS {
      debug!("ft6336u: TD_STATUS {=u8:#x} invalid", report[0]);
      return Err(Error::InvalidTouchCount(count));
    }

    let mut points = [Ft6336uPoint::EMPTY; MAX_POINTS];
    for (point, record) in points.iter_mut().zip(report[1..].chunks_exact(POINT_LEN)).take(count as usize) {
      let mut b = [0u8; POINT_LEN];
      b.copy_from_slice(record);
      *point = Ft6336uPoint::from_bytes(&b);
    }

    Ok(RawTouches { count, points })
  }

  /// Read the current touches into `points`.
  ///
  /// Returns the number of touches the chip reports; only the first
  /// `points.len()` are filled.
  pub fn touches(&mut self, points: &mut [LogicalPoint]) -> Result<usize, Error<E>> {
    let raw = self.raw_touches()?;
    for (out, p) in points.iter_mut().zip(raw.iter()) {
      *out = self.screen.map(p.point);
    }
    Ok(raw.count as usize)
  }

  /// Read registers `0x00..=0xff`, 16 bytes per transaction.
  ///
  /// Rows whose read fails are filled with `0xff`; bit `n` of the returned
  /// mask is set when row `n` failed.
  pub fn dump(&mut self, out: &mut [u8; 256]) -> u16 {
    let mut failed = 0u16;
    for (row, chunk) in out.chunks_exact_mut(16).enumerate() {
      if self.read_bytes((row * 16) as u8, chunk).is_err() {
        chunk.fill(0xff);
        failed |= 1 << row;
      }
    }
    failed
  }

  // Typed helpers
  fn read<const N: usize>(&mut self, reg: Reg) -> Result<[u8; N], Error<E>> {
    let mut b = [0u8; N];
    self.read_bytes(reg.into(), &mut b)?;
    Ok(b)
  }

  fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
    self.i2c.write_read(I2C_ADDR, &[reg], buf).map_err(Error::I2c)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Resolution;
  use crate::mock::MockI2c;
  use crate::orientation::Orientation;
  use embedded_hal::i2c::ErrorKind;

  /// Identification block of a Hosyond 3.5" module.
  fn hosyond() -> MockI2c {
    let mut i2c = MockI2c::new(1);
    i2c.set(0x9f, &[0x26, 0x02, 0x05, 0x01, 0x64]);
    i2c.set(0xa8, &[0x11]);
    i2c
  }

  fn driver(i2c: MockI2c, orientation: Orientation) -> Ft6336u<MockI2c> {
    let config = Config::default().with_resolution(Resolution::new(320, 480)).with_orientation(orientation);
    Ft6336u::new(i2c, config)
  }

  #[test]
  fn init_accepts_known_module() {
    let mut touch = driver(hosyond(), Orientation::Landscape);
    let info = touch.init().unwrap();
    assert_eq!(info, Ft6336uInfo { panel_id: 0x11, variant: 2, lib_version: 0x0501 });
  }

  #[test]
  fn init_rejects_unknown_ids() {
    let mut i2c = hosyond();
    i2c.set(0xa8, &[0x12]);
    assert_eq!(driver(i2c, Orientation::Landscape).init(), Err(Error::InvalidChipId(0x12)));

    let mut i2c = hosyond();
    i2c.set(0xa0, &[0x03]);
    assert_eq!(driver(i2c, Orientation::Landscape).init(), Err(Error::InvalidChipId(0x03)));

    let mut i2c = hosyond();
    i2c.set(0xa3, &[0x65]);
    assert_eq!(driver(i2c, Orientation::Landscape).init(), Err(Error::InvalidChipId(0x65)));
  }

  #[test]
  fn decodes_two_points() {
    let mut i2c = hosyond();
    #[rustfmt::skip]
    let report = [
      0x02,
      0x80, 0x32, 0x01, 0x64, 0x10, 0x20,
      0x41, 0x2c, 0x11, 0xc2, 0x00, 0x00,
    ];
    i2c.set(0x02, &report);
    let mut touch = driver(i2c, Orientation::Portrait);

    let raw = touch.raw_touches().unwrap();
    assert_eq!(raw.count, 2);
    assert_eq!(raw.points[0].event, PointEvent::Contact);
    assert_eq!(raw.points[0].point, TouchPoint::new(50, 356));
    assert_eq!(raw.points[0].id, 0);
    assert_eq!((raw.points[0].weight, raw.points[0].area), (0x10, 2));
    assert_eq!(raw.points[1].event, PointEvent::LiftUp);
    assert_eq!(raw.points[1].point, TouchPoint::new(300, 450));
    assert_eq!(raw.points[1].id, 1);

    let mut points = [LogicalPoint::default(); 2];
    assert_eq!(touch.touches(&mut points), Ok(2));
    assert_eq!(points, [LogicalPoint::new(50, 356), LogicalPoint::new(300, 450)]);
  }

  #[test]
  fn unreported_points_are_skipped() {
    let mut i2c = hosyond();
    i2c.set(0x02, &[0x01, 0x80, 0x0a, 0x00, 0x14, 0x00, 0x00, 0x80, 0x64]);
    let mut touch = driver(i2c, Orientation::Landscape);

    let raw = touch.raw_touches().unwrap();
    assert_eq!(raw.iter().count(), 1);
    assert_eq!(raw.points[1], Ft6336uPoint::EMPTY);

    let mut points = [LogicalPoint::default(); 2];
    assert_eq!(touch.touches(&mut points), Ok(1));
    assert_eq!(points, [LogicalPoint::new(459, 10), LogicalPoint::default()]);
  }

  #[test]
  fn truncates_to_caller_capacity() {
    let mut i2c = hosyond();
    i2c.set(0x02, &[0x02, 0x80, 0x01, 0x00, 0x02, 0, 0, 0x80, 0x03, 0x10, 0x04]);
    let mut touch = driver(i2c, Orientation::Portrait);

    let mut points = [LogicalPoint::default(); 1];
    assert_eq!(touch.touches(&mut points), Ok(2));
    assert_eq!(points, [LogicalPoint::new(1, 2)]);
  }

  #[test]
  fn rejects_impossible_touch_count() {
    let mut i2c = hosyond();
    i2c.set(0x02, &[0x03]);
    let mut touch = driver(i2c, Orientation::Portrait);
    assert_eq!(touch.raw_touches(), Err(Error::InvalidTouchCount(3)));

    // untouched controller reports 0x0f in the low nibble after reset
    touch.i2c.set(0x02, &[0xff]);
    assert_eq!(touch.touches(&mut [LogicalPoint::default(); 2]), Err(Error::InvalidTouchCount(0x0f)));
  }

  #[test]
  fn bus_errors_propagate() {
    let mut i2c = hosyond();
    i2c.fail_at = Some(0x02);
    let mut touch = driver(i2c, Orientation::Portrait);
    assert_eq!(touch.raw_touches(), Err(Error::I2c(ErrorKind::Other)));
  }

  #[test]
  fn dump_reads_whole_page() {
    let mut i2c = hosyond();
    i2c.fail_at = Some(0x10);
    let mut touch = driver(i2c, Orientation::Portrait);

    let mut page = [0u8; 256];
    assert_eq!(touch.dump(&mut page), 1 << 1);
    assert!(page[0x10..0x20].iter().all(|&b| b == 0xff));
    assert_eq!(page[0xa8], 0x11);
    assert_eq!(&page[0x9f..0xa4], &[0x26, 0x02, 0x05, 0x01, 0x64]);
  }
}
