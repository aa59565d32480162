//! Logging shims. With the `defmt` feature the macros forward to `defmt`,
//! otherwise they only borrow their arguments so nothing is reported unused.
#![allow(unused_macros)]

macro_rules! trace {
  ($s:literal $(, $x:expr)* $(,)?) => {{
    #[cfg(feature = "defmt")]
    ::defmt::trace!($s $(, $x)*);
    #[cfg(not(feature = "defmt"))]
    let _ = ($( & $x ),*);
  }};
}

macro_rules! debug {
  ($s:literal $(, $x:expr)* $(,)?) => {{
    #[cfg(feature = "defmt")]
    ::defmt::debug!($s $(, $x)*);
    #[cfg(not(feature = "defmt"))]
    let _ = ($( & $x ),*);
  }};
}

macro_rules! info {
  ($s:literal $(, $x:expr)* $(,)?) => {{
    #[cfg(feature = "defmt")]
    ::defmt::info!($s $(, $x)*);
    #[cfg(not(feature = "defmt"))]
    let _ = ($( & $x ),*);
  }};
}

macro_rules! warn {
  ($s:literal $(, $x:expr)* $(,)?) => {{
    #[cfg(feature = "defmt")]
    ::defmt::warn!($s $(, $x)*);
    #[cfg(not(feature = "defmt"))]
    let _ = ($( & $x ),*);
  }};
}
