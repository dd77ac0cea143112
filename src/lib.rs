//! Driver for Atmel AT24C01 ~ AT24C512 EEPROM chips on the I2C bus.
//!
//! The driver is generic over an [`embedded_hal::i2c::I2c`] bus and an
//! [`embedded_hal::delay::DelayNs`] provider for the chips' write-settle
//! time; an async twin runs on the `embedded-hal-async` counterparts. All
//! physical chip parameters (page size, settle delay, capacity arithmetic)
//! derive from the [`Capacity`] chip type, which can also be probed at
//! runtime with the destructive `detect_type`.
#![cfg_attr(not(test), no_std)]

pub mod async_comms;
pub mod capacity;
pub mod comms;
pub mod error;
pub mod traits;

pub use async_comms::AsyncEepromI2c;
pub use capacity::Capacity;
pub use comms::EepromI2c;
pub use error::Error;
pub use traits::{AsyncEepromDevice, EepromDevice};
