#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` drivers for the Goodix GT911 and FocalTech FT6336U capacitive touch
//! controllers, built around a non-blocking touch event engine.
//!
//! The heart of the crate is the GT911 event state machine: call
//! [`Gt911::event`] once per iteration of your control loop and it advances a
//! poll, read and clear cycle over an [`AsyncBus`] without ever waiting on the
//! bus. Each call returns at most one [`Event`] (`down`, `move` or `up`) with
//! coordinates already rotated for the current [`Orientation`].
//!
//! Besides the engine the crate offers:
//!
//! - Blocking multi-point queries through the [`Touchscreen`] trait, shared by
//!   [`Gt911`] and [`Ft6336u`]
//! - Bring-up checks of the chip identity, panel resolution and axis setup
//! - Raw register dumps for diagnostics
//! - [`BlockingBus`], which runs the engine on top of any blocking
//!   `embedded-hal` 1.0 I²C bus
//!
//! ```no_run
//! use embedded_hal::i2c::I2c;
//! use captouch::{Address, BlockingBus, Config, EventKind, Gt911, Orientation};
//!
//! fn example<I: I2c>(i2c: I, now_us: impl Fn() -> u32) -> Result<(), captouch::Error<I::Error>> {
//!   let config = Config::default().with_orientation(Orientation::Portrait);
//!   let mut touch = Gt911::new(BlockingBus::new(i2c), Address::Secondary, config);
//!   let _info = touch.init()?;
//!
//!   loop {
//!     let event = touch.event(now_us());
//!     if event.kind == EventKind::Down {
//!       // handle a press at (event.col, event.row)
//!     }
//!   }
//! }
//! ```

#[macro_use]
mod fmt;

mod bus;
mod config;
mod event;
mod orientation;
mod touchscreen;

pub mod ft6336u;
pub mod gt911;

#[cfg(test)]
mod mock;

pub use bus::{AsyncBus, BlockingBus, Clock};
pub use config::{Config, Resolution};
pub use event::{Event, EventKind, Tracker};
pub use ft6336u::Ft6336u;
pub use gt911::{Address, Gt911};
pub use orientation::{map, unmap, Connector, LogicalPoint, Orientation, Screen, TouchPoint};
pub use touchscreen::Touchscreen;

/// Errors that can occur while talking to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// The GT911 reported an unexpected vendor identifier during bring-up.
  InvalidVendorId(u32),
  /// The FT6336U reported an unexpected panel or cipher identifier.
  InvalidChipId(u8),
  /// The controller reported a panel resolution with a zero axis.
  UnsupportedResolution { x: u16, y: u16 },
  /// The GT911 `SWITCH_1` axis setup does not match the orientation table
  /// (y must be reversed, x must not). Carries the raw register value.
  UnsupportedAxisConfig(u8),
  /// The controller reported more touches than it can track.
  InvalidTouchCount(u8),
  /// An operation attempted to write a buffer larger than the protocol allows.
  BufferOverflow,
}
