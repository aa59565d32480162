//! Goodix GT911 driver.
//!
//! [`Gt911`] offers two ways to observe touches:
//!
//! - [`Gt911::event`], a non-blocking step of the touch event engine over any
//!   [`AsyncBus`]. Call it once per loop iteration.
//! - [`Gt911::touches`], a blocking multi-point query over an `embedded-hal`
//!   I²C bus (also available through [`crate::Touchscreen`]).
//!
//! Wrapping a blocking bus in [`crate::BlockingBus`] gives one handle that
//! supports both, plus the bring-up checks in [`Gt911::init`].

mod bringup;
mod defs;
mod engine;
mod rw;
mod touch;

use embedded_hal_async::delay::DelayNs;

use crate::bus::{AsyncBus, Clock};
use crate::config::Config;
use crate::event::Event;
use crate::orientation::Screen;

pub use bringup::Gt911Info;
pub(crate) use defs::Reg;
pub use defs::{point_register, IntTrigger, Switch1, TouchStatus, MAX_POINTS};
pub use engine::{BusCycle, Engine};

/// Delay between engine steps inside [`Gt911::next_event`].
const TICK_US: u32 = 100;

/// I²C address, selected by the INT pin level during reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
  /// INT held low during reset.
  #[default]
  Primary = 0x5D,
  /// INT held high during reset.
  Secondary = 0x14,
}

impl From<Address> for u8 {
  fn from(address: Address) -> Self {
    address as u8
  }
}

/// GT911 capacitive touch controller.
pub struct Gt911<B> {
  bus: B,
  address: u8,
  screen: Screen,
  engine: Engine,
}

impl<B> Gt911<B> {
  /// Create a driver for the chip at `address`.
  ///
  /// Nothing is sent to the chip until the first [`Gt911::init`],
  /// [`Gt911::event`] or [`Gt911::touches`] call.
  pub fn new(bus: B, address: Address, config: Config) -> Self {
    let address = u8::from(address);
    Self {
      bus,
      address,
      screen: Screen::new(config.resolution, config.orientation),
      engine: Engine::new(address, config.poll_interval_us),
    }
  }

  /// Release the bus.
  pub fn release(self) -> B {
    self.bus
  }

  pub fn bus(&self) -> &B {
    &self.bus
  }

  pub fn bus_mut(&mut self) -> &mut B {
    &mut self.bus
  }

  /// Panel geometry and orientation used to map touches.
  pub fn screen(&self) -> &Screen {
    &self.screen
  }

  pub fn screen_mut(&mut self) -> &mut Screen {
    &mut self.screen
  }

  /// Event engine state, mostly useful for diagnostics.
  pub fn engine(&self) -> &Engine {
    &self.engine
  }
}

impl<B: AsyncBus> Gt911<B> {
  /// Advance the touch event engine by one step.
  ///
  /// Never waits on the bus. Returns [`Event::NONE`] unless this step
  /// observed a press, a movement or a release.
  pub fn event(&mut self, now_us: u32) -> Event {
    self.engine.step(&mut self.bus, &self.screen, now_us)
  }

  /// Step the engine until it reports something, pausing between steps.
  pub async fn next_event<C: Clock, D: DelayNs>(&mut self, clock: &C, delay: &mut D) -> Event {
    loop {
      let event = self.event(clock.now_us());
      if !event.is_none() {
        return event;
      }
      delay.delay_us(TICK_US).await;
    }
  }
}
