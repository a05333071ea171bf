use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall,
    PayloadTooLarge,
    InvalidLength,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::PayloadTooLarge => f.write_str("payload too large"),
            Self::InvalidLength => f.write_str("invalid length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressParseError {
    WrongPartCount,
    NotANumber,
    PartOutOfRange,
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongPartCount => f.write_str("address must have three parts"),
            Self::NotANumber => f.write_str("address part is not a number"),
            Self::PartOutOfRange => f.write_str("address part out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddressParseError {}
