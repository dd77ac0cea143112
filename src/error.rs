use core::fmt::{self, Debug};
use embedded_hal::i2c::ErrorType;

/// The error type used by this library.
///
/// This can encapsulate an I2C bus error, and adds its own position error on
/// top of that.
pub enum Error<I2C: ErrorType> {
    /// An I2C transfer failed.
    I2c(I2C::Error),
    /// A position/length pair fell outside the configured capacity, the
    /// length was zero, or capacity detection exhausted all candidates.
    Position,
}

#[cfg(feature = "defmt-03")]
impl<I2C: ErrorType> defmt::Format for Error<I2C>
where
    I2C::Error: Debug,
{
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::I2c(_i2c) => defmt::write!(fmt, "Error::I2c"),
            Error::Position => defmt::write!(fmt, "Error::Position"),
        }
    }
}

impl<I2C: ErrorType> Debug for Error<I2C>
where
    I2C::Error: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(i2c) => write!(f, "Error::I2c({:?})", i2c),
            Error::Position => write!(f, "Error::Position"),
        }
    }
}
