//! Event loop example: drive the GT911 engine over a blocking I2C bus.
#![allow(unused)]
use captouch::{Address, BlockingBus, Config, EventKind, Gt911, Orientation};
use embedded_hal::i2c::{I2c, SevenBitAddress};

#[allow(dead_code)]
fn run<I2C, E>(i2c: I2C, now_us: impl Fn() -> u32) -> Result<(), captouch::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
{
  let config = Config::default().with_orientation(Orientation::Landscape).with_poll_interval_us(2_000);
  let mut touch = Gt911::new(BlockingBus::new(i2c), Address::Primary, config);
  let info = touch.init()?;
  let _ = info.resolution;

  loop {
    let event = touch.event(now_us());
    match event.kind {
      EventKind::Down => {
        let _ = (event.col, event.row);
        // finger pressed
      }
      EventKind::Move => {
        let _ = (event.col, event.row);
        // finger dragged
      }
      EventKind::Up => {
        let _ = (event.col, event.row);
        // finger lifted where the last down/move was reported
      }
      EventKind::None => {}
    }
  }
}

fn main() {}
