//! Register-file I²C double shared by the unit tests.

extern crate std;

use std::vec;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

/// Emulates a chip with a flat register file and an auto-incrementing
/// register pointer set by the first `addr_width` bytes of each write.
pub struct MockI2c {
  addr_width: usize,
  regs: Vec<u8>,
  pointer: u16,
  /// Any transaction touching this register fails with `ErrorKind::Other`.
  pub fail_at: Option<u16>,
  /// Every register write as `(register, payload)`.
  pub writes: Vec<(u16, Vec<u8>)>,
  /// Number of transactions issued, failed ones included.
  pub transactions: usize,
}

impl MockI2c {
  pub fn new(addr_width: usize) -> Self {
    Self { addr_width, regs: vec![0; 0x1_0000], pointer: 0, fail_at: None, writes: Vec::new(), transactions: 0 }
  }

  pub fn set(&mut self, reg: u16, bytes: &[u8]) {
    let start = reg as usize;
    self.regs[start..start + bytes.len()].copy_from_slice(bytes);
  }

  pub fn register(&self, reg: u16) -> u8 {
    self.regs[reg as usize]
  }

  fn select(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
    let reg = bytes[..self.addr_width].iter().fold(0u16, |acc, &b| (acc << 8) | b as u16);
    if self.fail_at == Some(reg) {
      return Err(ErrorKind::Other);
    }
    self.pointer = reg;
    let payload = &bytes[self.addr_width..];
    if !payload.is_empty() {
      self.set(reg, payload);
      self.writes.push((reg, payload.to_vec()));
      self.pointer = reg.wrapping_add(payload.len() as u16);
    }
    Ok(())
  }
}

impl ErrorType for MockI2c {
  type Error = ErrorKind;
}

impl I2c for MockI2c {
  fn transaction(&mut self, _address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    self.transactions += 1;
    for op in operations {
      match op {
        Operation::Write(bytes) => self.select(*bytes)?,
        Operation::Read(buf) => {
          for b in buf.iter_mut() {
            *b = self.regs[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
          }
        }
      }
    }
    Ok(())
  }
}
