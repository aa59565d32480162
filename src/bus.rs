//! Bus collaborators consumed by the event engine.

use core::task::Poll;

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

/// Non-blocking register bus.
///
/// A transaction is started with one of the `begin_*` methods and its outcome
/// is collected later through [`AsyncBus::poll_result`]. None of the methods
/// may wait for the bus. The event engine keeps at most one transaction in
/// flight and always collects its outcome before starting the next one.
pub trait AsyncBus {
  type Error;

  /// Cheap check whether the underlying bus is occupied by any operation.
  fn is_busy(&self) -> bool;

  /// Start a register-select write followed by a read of `read_len` bytes.
  fn begin_write_read(&mut self, address: SevenBitAddress, write: &[u8], read_len: usize);

  /// Start a write-only transaction.
  fn begin_write(&mut self, address: SevenBitAddress, write: &[u8]);

  /// Collect the outcome of the transaction in flight.
  ///
  /// Returns `Poll::Pending` while it runs. On completion the received bytes
  /// are copied into `read` and the byte count is returned; write-only
  /// transactions report the number of bytes written.
  fn poll_result(&mut self, read: &mut [u8]) -> Poll<Result<usize, Self::Error>>;
}

/// Free-running microsecond counter. Wraps around at `u32::MAX`.
pub trait Clock {
  fn now_us(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
  fn now_us(&self) -> u32 {
    self()
  }
}

/// Receive capacity of [`BlockingBus`]; the engine never reads more than a
/// single point record.
const RX_CAPACITY: usize = 16;

/// [`AsyncBus`] over a blocking `embedded-hal` I²C bus.
///
/// Each transaction runs to completion inside `begin_*` and its outcome is
/// parked until the next [`AsyncBus::poll_result`], so the engine sees it as
/// an operation that finished between two steps. The wrapper also implements
/// [`I2c`] by forwarding to the inner bus, which lets one driver handle use
/// both the event engine and the blocking queries.
pub struct BlockingBus<I: ErrorType> {
  i2c: I,
  rx: [u8; RX_CAPACITY],
  outcome: Option<Result<usize, I::Error>>,
}

impl<I: ErrorType> BlockingBus<I> {
  pub fn new(i2c: I) -> Self {
    Self { i2c, rx: [0; RX_CAPACITY], outcome: None }
  }

  /// Consume the adapter and return the underlying bus.
  pub fn into_inner(self) -> I {
    self.i2c
  }

  /// Get a mutable reference to the underlying bus.
  pub fn inner_mut(&mut self) -> &mut I {
    &mut self.i2c
  }
}

impl<I: I2c> AsyncBus for BlockingBus<I> {
  type Error = I::Error;

  fn is_busy(&self) -> bool {
    false
  }

  fn begin_write_read(&mut self, address: SevenBitAddress, write: &[u8], read_len: usize) {
    let len = read_len.min(RX_CAPACITY);
    let result = self.i2c.write_read(address, write, &mut self.rx[..len]).map(|()| len);
    self.outcome = Some(result);
  }

  fn begin_write(&mut self, address: SevenBitAddress, write: &[u8]) {
    self.outcome = Some(self.i2c.write(address, write).map(|()| write.len()));
  }

  fn poll_result(&mut self, read: &mut [u8]) -> Poll<Result<usize, Self::Error>> {
    match self.outcome.take() {
      None => Poll::Pending,
      Some(Ok(n)) => {
        let copied = n.min(read.len()).min(RX_CAPACITY);
        read[..copied].copy_from_slice(&self.rx[..copied]);
        Poll::Ready(Ok(n))
      }
      Some(Err(e)) => Poll::Ready(Err(e)),
    }
  }
}

impl<I: ErrorType> ErrorType for BlockingBus<I> {
  type Error = I::Error;
}

impl<I: I2c> I2c for BlockingBus<I> {
  fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    self.i2c.transaction(address, operations)
  }
}
