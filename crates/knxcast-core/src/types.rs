use crate::AddressParseError;
use core::fmt;
use core::str::FromStr;

/// A wall-clock time of day, second granularity.
///
/// Transient: captured from a clock read at the moment of scheduling or
/// encoding, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Time {
    /// Seconds elapsed since midnight, assuming in-range fields.
    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

/// A calendar date with a four-digit year.
///
/// Fields are clamped, not date-validated: no leap-year or day-count checks
/// are performed anywhere in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// A packed 16-bit KNX group address in three-level notation.
///
/// The upper 5 bits encode the main group, the next 3 bits the middle group,
/// and the low 8 bits the subgroup, matching the bus wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupAddress(u16);

impl GroupAddress {
    /// Creates a group address from `main/middle/sub` parts.
    ///
    /// Parts are masked to their field widths; use [`GroupAddress::from_str`]
    /// for range-checked parsing of configuration input.
    pub const fn new(main: u8, middle: u8, sub: u8) -> Self {
        Self((((main as u16) & 0x1F) << 11) | (((middle as u16) & 0x07) << 8) | sub as u16)
    }

    /// Returns the raw packed `u16` representation.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Constructs a group address from a pre-packed `u16`.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn main(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    pub const fn middle(self) -> u8 {
        ((self.0 >> 8) & 0x07) as u8
    }

    pub const fn sub(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

impl FromStr for GroupAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, middle, sub) = split_three(s, '/')?;
        if main > 31 || middle > 7 || sub > 255 {
            return Err(AddressParseError::PartOutOfRange);
        }
        Ok(Self::new(main as u8, middle as u8, sub as u8))
    }
}

/// A packed 16-bit KNX individual (physical) address, `area.line.device`.
///
/// Stamped into outgoing cEMI frames as the source address. 4 bits area,
/// 4 bits line, 8 bits device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndividualAddress(u16);

impl IndividualAddress {
    /// The unassigned source address `0.0.0`.
    pub const UNASSIGNED: Self = Self(0);

    pub const fn new(area: u8, line: u8, device: u8) -> Self {
        Self((((area as u16) & 0x0F) << 12) | (((line as u16) & 0x0F) << 8) | device as u16)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn area(self) -> u8 {
        ((self.0 >> 12) & 0x0F) as u8
    }

    pub const fn line(self) -> u8 {
        ((self.0 >> 8) & 0x0F) as u8
    }

    pub const fn device(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for IndividualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.area(), self.line(), self.device())
    }
}

impl FromStr for IndividualAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (area, line, device) = split_three(s, '.')?;
        if area > 15 || line > 15 || device > 255 {
            return Err(AddressParseError::PartOutOfRange);
        }
        Ok(Self::new(area as u8, line as u8, device as u8))
    }
}

fn split_three(s: &str, sep: char) -> Result<(u16, u16, u16), AddressParseError> {
    let mut parts = s.split(sep);
    let a = parse_part(parts.next())?;
    let b = parse_part(parts.next())?;
    let c = parse_part(parts.next())?;
    if parts.next().is_some() {
        return Err(AddressParseError::WrongPartCount);
    }
    Ok((a, b, c))
}

fn parse_part(part: Option<&str>) -> Result<u16, AddressParseError> {
    part.ok_or(AddressParseError::WrongPartCount)?
        .trim()
        .parse::<u16>()
        .map_err(|_| AddressParseError::NotANumber)
}
