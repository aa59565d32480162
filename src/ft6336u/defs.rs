/******************************************************************************
 * Refer to the FT6336U datasheet and application note for details.          *
 * ========================================================================== *
 *                        FT6336U - Registers & Memory Map                    *
*******************************************************************************/

use bitfield_struct::bitfield;

/// Fixed 7-bit I²C address.
pub(crate) const I2C_ADDR: u8 = 0x38;

/// Expected `FOCALTECH_ID` (panel id).
pub(crate) const PANEL_ID: u8 = 0x11;
/// Expected `CIPHER_MID`.
pub(crate) const CIPHER_MID: u8 = 0x26;
/// Expected `CIPHER_HIGH`.
pub(crate) const CIPHER_HIGH: u8 = 0x64;
/// Highest accepted `CIPHER_LOW` (FT6236U, FT6336G, FT6336U).
pub(crate) const CIPHER_LOW_MAX: u8 = 0x02;

/// Number of point records on the chip.
pub const MAX_POINTS: usize = 2;

/// Bytes per point record: `XH, XL, YH, YL, WEIGHT, MISC`.
pub(crate) const POINT_LEN: usize = 6;

/// `TD_STATUS` followed by both point records.
pub(crate) const REPORT_LEN: usize = 1 + MAX_POINTS * POINT_LEN;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Touch report (0x02..0x0e)
  TdStatus = 0x02,

  // Identification block; CIPHER_MID..CIPHER_HIGH is read in one go
  CipherMid = 0x9f,
  CipherLow = 0xa0,
  LibVerH = 0xa1,
  LibVerL = 0xa2,
  CipherHigh = 0xa3,
  FocaltechId = 0xa8,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// `TD_STATUS` (0x02).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct TdStatus {
  #[bits(4)]
  pub(crate) count: u8,
  #[bits(4)]
  __: u8,
}

/// Per-point event flag, `Pn_XH[7:6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PointEvent {
  PressDown = 0b00,
  LiftUp = 0b01,
  Contact = 0b10,
  NoEvent = 0b11,
}

impl PointEvent {
  pub(crate) const fn into_bits(self) -> u8 {
    self as _
  }

  pub(crate) const fn from_bits(bits: u8) -> Self {
    match bits & 0b11 {
      0b00 => Self::PressDown,
      0b01 => Self::LiftUp,
      0b10 => Self::Contact,
      _ => Self::NoEvent,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      PointEvent::PressDown => "press down",
      PointEvent::LiftUp => "lift up",
      PointEvent::Contact => "contact",
      PointEvent::NoEvent => "no event",
    }
  }
}

/// `Pn_XH`: event flag and x position bits 11:8.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct PointXh {
  #[bits(4)]
  pub(crate) x_hi: u8,
  #[bits(2)]
  __: u8,
  #[bits(2)]
  pub(crate) event: PointEvent,
}

/// `Pn_YH`: touch id and y position bits 11:8.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct PointYh {
  #[bits(4)]
  pub(crate) y_hi: u8,
  #[bits(4)]
  pub(crate) id: u8,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn report_covers_both_points() {
    assert_eq!(REPORT_LEN, 13);
    assert_eq!(Reg::TdStatus as u8 + REPORT_LEN as u8 - 1, 0x0e);
  }

  #[test]
  fn point_header_fields() {
    let xh = PointXh::from_bits(0x81);
    assert_eq!(xh.event(), PointEvent::Contact);
    assert_eq!(xh.x_hi(), 0x1);

    let yh = PointYh::from_bits(0x12);
    assert_eq!(yh.id(), 1);
    assert_eq!(yh.y_hi(), 0x2);
  }

  #[test]
  fn point_event_names() {
    assert_eq!(PointEvent::from_bits(0b00).as_str(), "press down");
    assert_eq!(PointEvent::from_bits(0b01).as_str(), "lift up");
    assert_eq!(PointEvent::from_bits(0b10).as_str(), "contact");
    assert_eq!(PointEvent::from_bits(0b11).as_str(), "no event");
    assert_eq!(PointEvent::Contact.into_bits(), 0b10);
  }

  #[test]
  fn status_ignores_upper_nibble() {
    assert_eq!(TdStatus::from_bits(0xf2).count(), 2);
  }
}
