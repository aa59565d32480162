//! Non-blocking touch event state machine.
//!
//! The GT911 latches its point buffer until the host writes `0` to
//! `TOUCH_STAT`, so every observation runs through the same bus cycle:
//!
//! ```text
//!        poll interval elapsed
//!   Idle ─────────────────────► StatusRead ──count > 0──► TouchRead
//!    ▲                            │    │                      │
//!    └── failed / not ready ──────┘    └─count == 0─┐         │
//!                                                   ▼         ▼
//!                          StatusRead ◄──────────── StatusWrite
//! ```
//!
//! Each [`Engine::step`] performs at most one transition and never waits on
//! the bus: it either starts a transaction, collects a finished one, or finds
//! nothing to do.

use core::task::Poll;

use super::defs::{Reg, TouchStatus, POINT_LEN};
use crate::bus::AsyncBus;
use crate::config::MIN_POLL_INTERVAL_US;
use crate::event::{Event, Tracker};
use crate::orientation::{Screen, TouchPoint};

/// Bus transaction the engine is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusCycle {
  /// Nothing in flight; waiting for the next poll time.
  Idle,
  /// Reading `TOUCH_STAT`.
  StatusRead,
  /// Reading the first point record.
  TouchRead,
  /// Writing `0` to `TOUCH_STAT` to release the point buffer.
  StatusWrite,
}

/// Per-device event engine state.
///
/// Owns the edge detector and the bus cycle; the bus and the screen are lent
/// to it on every [`Engine::step`].
#[derive(Debug)]
pub struct Engine {
  address: u8,
  poll_interval_us: u32,
  /// `None` until the first poll, which happens immediately.
  next_poll_us: Option<u32>,
  cycle: BusCycle,
  tracker: Tracker,
  status: [u8; 1],
  touch: [u8; POINT_LEN],
}

impl Engine {
  /// Intervals below the 1 ms hardware minimum are raised to it.
  pub const fn new(address: u8, poll_interval_us: u32) -> Self {
    let poll_interval_us =
      if poll_interval_us < MIN_POLL_INTERVAL_US { MIN_POLL_INTERVAL_US } else { poll_interval_us };
    Self {
      address,
      poll_interval_us,
      next_poll_us: None,
      cycle: BusCycle::Idle,
      tracker: Tracker::new(),
      status: [0; 1],
      touch: [0; POINT_LEN],
    }
  }

  /// Bus cycle currently in progress.
  pub const fn cycle(&self) -> BusCycle {
    self.cycle
  }

  /// Last non-`none` event emitted.
  pub const fn last_event(&self) -> Event {
    self.tracker.last()
  }

  /// Advance the state machine by one tick.
  ///
  /// `now_us` is a free-running microsecond counter; wraparound is handled.
  /// Returns [`Event::NONE`] unless this tick completed an observation that
  /// changed the reported touch state.
  pub fn step<B: AsyncBus>(&mut self, bus: &mut B, screen: &Screen, now_us: u32) -> Event {
    if bus.is_busy() {
      return Event::NONE;
    }

    let event = match self.cycle {
      BusCycle::Idle => {
        self.poll(bus, now_us);
        Event::NONE
      }
      BusCycle::StatusRead => self.check_status_read(bus),
      BusCycle::TouchRead => self.check_touch_read(bus, screen),
      BusCycle::StatusWrite => self.check_status_write(bus),
    };

    if !event.is_none() {
      trace!("gt911: {} at ({}, {})", event.kind.as_str(), event.col, event.row);
    }
    event
  }

  fn poll<B: AsyncBus>(&mut self, bus: &mut B, now_us: u32) {
    // reinterpreting the wrapped difference as signed keeps this rollover-safe
    let late = self.next_poll_us.map_or(0, |at| now_us.wrapping_sub(at) as i32);
    if late >= 0 {
      self.start_status_read(bus);
      self.next_poll_us = Some(now_us.wrapping_add(self.poll_interval_us));
    }
  }

  fn start_status_read<B: AsyncBus>(&mut self, bus: &mut B) {
    bus.begin_write_read(self.address, &Reg::TouchStat.addr(), self.status.len());
    self.cycle = BusCycle::StatusRead;
  }

  fn start_touch_read<B: AsyncBus>(&mut self, bus: &mut B) {
    bus.begin_write_read(self.address, &Reg::Touch1.addr(), self.touch.len());
    self.cycle = BusCycle::TouchRead;
  }

  fn start_status_write<B: AsyncBus>(&mut self, bus: &mut B) {
    let [hi, lo] = Reg::TouchStat.addr();
    bus.begin_write(self.address, &[hi, lo, 0]);
    self.cycle = BusCycle::StatusWrite;
  }

  fn check_status_read<B: AsyncBus>(&mut self, bus: &mut B) -> Event {
    let count = match bus.poll_result(&mut self.status) {
      Poll::Pending => return Event::NONE,
      Poll::Ready(Ok(n)) if n == self.status.len() => TouchStatus::from_bits(self.status[0]).valid_count(),
      Poll::Ready(Ok(n)) => {
        debug!("gt911: status read returned {} bytes", n);
        None
      }
      Poll::Ready(Err(_)) => {
        debug!("gt911: status read failed");
        None
      }
    };

    match count {
      // inconclusive; back off and poll again
      None => {
        self.cycle = BusCycle::Idle;
        Event::NONE
      }
      Some(0) => {
        let event = self.tracker.released();
        self.start_status_write(bus);
        event
      }
      Some(_) => {
        self.start_touch_read(bus);
        Event::NONE
      }
    }
  }

  fn check_touch_read<B: AsyncBus>(&mut self, bus: &mut B, screen: &Screen) -> Event {
    let event = match bus.poll_result(&mut self.touch) {
      Poll::Pending => return Event::NONE,
      Poll::Ready(Ok(n)) if n == self.touch.len() => {
        let point = screen.map(TouchPoint::from_le_bytes(self.touch));
        self.tracker.touched(point)
      }
      Poll::Ready(Ok(n)) => {
        debug!("gt911: point read returned {} bytes", n);
        Event::NONE
      }
      Poll::Ready(Err(_)) => {
        debug!("gt911: point read failed");
        Event::NONE
      }
    };

    // release the point buffer even after a failed read so the chip keeps sampling
    self.start_status_write(bus);
    event
  }

  fn check_status_write<B: AsyncBus>(&mut self, bus: &mut B) -> Event {
    match bus.poll_result(&mut []) {
      Poll::Pending => return Event::NONE,
      Poll::Ready(Ok(_)) => {}
      Poll::Ready(Err(_)) => debug!("gt911: status clear failed"),
    }
    self.start_status_read(bus);
    Event::NONE
  }
}
