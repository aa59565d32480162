use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::{Gt911, Reg};
use crate::Error;

/// Largest register write, address included.
const WRITE_BUF_LEN: usize = 32;

impl<I, E> Gt911<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  // Typed helpers
  pub(crate) fn read<const N: usize>(&mut self, reg: Reg) -> Result<[u8; N], Error<E>> {
    let mut b = [0u8; N];
    self.read_bytes(reg.into(), &mut b)?;
    Ok(b)
  }

  pub(crate) fn read_bytes(&mut self, reg: u16, buf: &mut [u8]) -> Result<(), Error<E>> {
    let addr = reg.to_be_bytes();
    self.bus.write_read(self.address, &addr, buf).map_err(Error::I2c)
  }

  pub(crate) fn write_bytes(&mut self, reg: Reg, data: &[u8]) -> Result<(), Error<E>> {
    let len = data.len();
    if len > WRITE_BUF_LEN - 2 {
      return Err(Error::BufferOverflow);
    }
    let mut buf = [0u8; WRITE_BUF_LEN];
    buf[..2].copy_from_slice(&reg.addr());
    buf[2..2 + len].copy_from_slice(data);
    self.bus.write(self.address, &buf[..2 + len]).map_err(Error::I2c)
  }
}
