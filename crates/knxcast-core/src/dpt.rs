//! Datapoint encoders for DPT 10.001 (time of day) and DPT 11.001 (date).
//!
//! Both encoders saturate out-of-range fields to the nearest valid bound
//! instead of rejecting them; neither has an error channel. The emitted
//! payloads are the bare 3 datapoint octets — the group-value-write command
//! octet and bus addressing are applied by the link layer.

use crate::types::{Date, Time};

/// Encodes a time of day as DPT 10.001.
///
/// Layout: `RRRHHHHH | RRMMMMMM | RRSSSSSS`. The top 3 bits of the first
/// octet carry the day of week on the bus; this encoder deliberately leaves
/// them zero ("no day"), as the broadcaster never claims a weekday.
pub const fn encode_dpt10_time(time: Time) -> [u8; 3] {
    let hour = clamp_u8(time.hour, 0, 23);
    let minute = clamp_u8(time.minute, 0, 59);
    let second = clamp_u8(time.second, 0, 59);
    [hour & 0x1F, minute & 0x3F, second & 0x3F]
}

/// Encodes a calendar date as DPT 11.001.
///
/// Layout: `RRRDDDDD | RRRRMMMM | RYYYYYYY`. Day and month saturate to
/// their valid ranges; the year is reduced to two digits first:
/// `>= 2000` maps to `year - 2000`, `>= 1900` to `year - 1900`, anything
/// older to `year % 100`. The two-digit form is inherently ambiguous
/// outside 1900–2099; that ambiguity is part of the datapoint format and is
/// preserved bit-for-bit rather than resolved here.
pub const fn encode_dpt11_date(date: Date) -> [u8; 3] {
    let day = clamp_u8(date.day, 1, 31);
    let month = clamp_u8(date.month, 1, 12);
    let yy = if date.year >= 2000 {
        date.year - 2000
    } else if date.year >= 1900 {
        date.year - 1900
    } else {
        date.year % 100
    };
    [day & 0x1F, month & 0x0F, (yy as u8) & 0x7F]
}

const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_dpt10_time, encode_dpt11_date};
    use crate::types::{Date, Time};

    #[test]
    fn time_end_of_day() {
        let t = Time {
            hour: 23,
            minute: 59,
            second: 59,
        };
        assert_eq!(encode_dpt10_time(t), [0x17, 0x3B, 0x3B]);
    }

    #[test]
    fn time_saturates_to_bounds() {
        let t = Time {
            hour: 30,
            minute: 70,
            second: 99,
        };
        assert_eq!(encode_dpt10_time(t), [0x17, 0x3B, 0x3B]);
    }

    #[test]
    fn time_midnight_is_all_zero() {
        let t = Time {
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert_eq!(encode_dpt10_time(t), [0x00, 0x00, 0x00]);
    }

    #[test]
    fn date_this_century() {
        let d = Date {
            day: 11,
            month: 12,
            year: 2025,
        };
        assert_eq!(encode_dpt11_date(d), [0x0B, 0x0C, 0x19]);
    }

    #[test]
    fn date_last_century() {
        let d = Date {
            day: 1,
            month: 1,
            year: 1999,
        };
        assert_eq!(encode_dpt11_date(d), [0x01, 0x01, 0x63]);
    }

    #[test]
    fn date_beyond_2099_exceeds_two_digits() {
        // The year is transformed, masked to 7 bits, and never clamped, so
        // 2100 emits 100 rather than wrapping to a two-digit value.
        let d = Date {
            day: 1,
            month: 3,
            year: 2100,
        };
        assert_eq!(encode_dpt11_date(d), [0x01, 0x03, 0x64]);
    }

    #[test]
    fn date_before_1900_keeps_last_two_digits() {
        let d = Date {
            day: 15,
            month: 6,
            year: 1815,
        };
        assert_eq!(encode_dpt11_date(d), [0x0F, 0x06, 0x0F]);
    }

    #[test]
    fn date_saturates_day_and_month() {
        let d = Date {
            day: 0,
            month: 0,
            year: 2025,
        };
        assert_eq!(encode_dpt11_date(d), [0x01, 0x01, 0x19]);
        let d = Date {
            day: 40,
            month: 13,
            year: 2025,
        };
        assert_eq!(encode_dpt11_date(d), [0x1F, 0x0C, 0x19]);
    }
}
