/******************************************************************************
 * Refer to the GT911 datasheet and "GT911 Programming Guide" for details.    *
 * ========================================================================== *
 *                         GT911 - Registers & Memory Map                     *
*******************************************************************************/

use bitfield_struct::bitfield;

/// Expected `VENDOR_ID` contents: `'9' '1' '1' '\0'`.
pub(crate) const VENDOR_ID: u32 = 0x3931_3100;

/// Byte stride between consecutive touch point records.
pub(crate) const POINT_STRIDE: u16 = 8;

/// Number of point records on the chip.
pub const MAX_POINTS: usize = 5;

/// Bytes of each point record the driver reads: `x_lo, x_hi, y_lo, y_hi`.
pub(crate) const POINT_LEN: usize = 4;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // 0x8047..0x80FE is checksum protected; writes need a checksum update at 0x80FF.
  Switch1 = 0x804D,
  // touch, leave
  Thresh = 0x8053,

  // Mostly read-only status block (0x8140..)
  VendorId = 0x8140,
  XyRes = 0x8146,
  // Writable to release the point buffer
  TouchStat = 0x814E,
  Touch1 = 0x8150,
}

impl Reg {
  /// Big-endian register address as sent on the wire.
  pub(crate) const fn addr(self) -> [u8; 2] {
    (self as u16).to_be_bytes()
  }
}

impl From<Reg> for u16 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u16
  }
}

/// Register address of touch point record `index` (0-based).
///
/// Only indices below [`MAX_POINTS`] name real records; larger ones wrap
/// around the 16-bit register space instead of overflowing.
pub const fn point_register(index: usize) -> u16 {
  (Reg::Touch1 as u16).wrapping_add(POINT_STRIDE.wrapping_mul(index as u16))
}

/// `TOUCH_STAT` (0x814E).
///
/// `count` is only meaningful while `buffer_ready` is set; the chip may be
/// mid-update otherwise.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchStatus {
  #[bits(4)]
  pub count: u8,
  pub have_key: bool,
  __: bool,
  pub large_detect: bool,
  pub buffer_ready: bool,
}

impl TouchStatus {
  /// Number of touches, or `None` if the count is not valid yet.
  pub const fn valid_count(&self) -> Option<u8> {
    if self.buffer_ready() {
      Some(self.count())
    } else {
      None
    }
  }
}

/// INT pin trigger mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IntTrigger {
  Rising = 0b00,
  Falling = 0b01,
  Low = 0b10,
  High = 0b11,
}

impl IntTrigger {
  pub(crate) const fn into_bits(self) -> u8 {
    self as _
  }

  pub(crate) const fn from_bits(bits: u8) -> Self {
    match bits & 0b11 {
      0b00 => Self::Rising,
      0b01 => Self::Falling,
      0b10 => Self::Low,
      _ => Self::High,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      IntTrigger::Rising => "rising",
      IntTrigger::Falling => "falling",
      IntTrigger::Low => "low",
      IntTrigger::High => "high",
    }
  }
}

/// `SWITCH_1` (0x804D): axis reversal/swap and INT trigger.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switch1 {
  #[bits(2)]
  pub int_trigger: IntTrigger,
  __: bool,
  /// Swap x and y.
  pub x2y: bool,
  #[bits(2)]
  ___: u8,
  /// Reverse x.
  pub x2x: bool,
  /// Reverse y.
  pub y2y: bool,
}

impl Switch1 {
  /// Axis setup the coordinate mapper assumes: y reversed, x not.
  pub const fn is_supported(&self) -> bool {
    self.y2y() && !self.x2x()
  }
}
