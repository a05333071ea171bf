use knxcast_core::dpt::{encode_dpt10_time, encode_dpt11_date};
use knxcast_core::schedule::{next_fire_delay, DailyTarget, ScheduleDecision};
use knxcast_core::types::{Date, Time};
use proptest::prelude::*;

#[test]
fn dpt10_payload_matches_fixture() {
    let payload = encode_dpt10_time(Time {
        hour: 14,
        minute: 5,
        second: 42,
    });
    assert_eq!(payload, [0x0E, 0x05, 0x2A]);
}

#[test]
fn dpt11_payload_matches_fixture() {
    let payload = encode_dpt11_date(Date {
        day: 11,
        month: 12,
        year: 2025,
    });
    assert_eq!(payload, [0x0B, 0x0C, 0x19]);
}

#[test]
fn encoding_is_deterministic_across_calls() {
    let t = Time {
        hour: 6,
        minute: 30,
        second: 0,
    };
    let d = Date {
        day: 29,
        month: 2,
        year: 2024,
    };
    assert_eq!(encode_dpt10_time(t), encode_dpt10_time(t));
    assert_eq!(encode_dpt11_date(d), encode_dpt11_date(d));
}

proptest! {
    #[test]
    fn dpt10_reserved_bits_always_zero(hour in any::<u8>(), minute in any::<u8>(), second in any::<u8>()) {
        let [b0, b1, b2] = encode_dpt10_time(Time { hour, minute, second });
        prop_assert_eq!(b0 & 0xE0, 0);
        prop_assert_eq!(b1 & 0xC0, 0);
        prop_assert_eq!(b2 & 0xC0, 0);
        prop_assert!(b0 <= 23 && b1 <= 59 && b2 <= 59);
    }

    #[test]
    fn dpt11_fields_always_in_range(day in any::<u8>(), month in any::<u8>(), year in any::<u16>()) {
        let [b0, b1, b2] = encode_dpt11_date(Date { day, month, year });
        prop_assert!((1..=31).contains(&b0));
        prop_assert!((1..=12).contains(&b1));
        // The year octet is masked to 7 bits, not clamped to two digits:
        // years outside 1900-2099 may produce 100..=127 here.
        prop_assert!(b2 <= 0x7F);
    }

    #[test]
    fn delay_is_positive_and_at_most_one_day(
        th in 0u8..24, tm in 0u8..60,
        nh in 0u8..24, nm in 0u8..60, ns in 0u8..60,
    ) {
        let targets = [DailyTarget::new(th, tm)];
        let now = Time { hour: nh, minute: nm, second: ns };
        match next_fire_delay(true, &targets, now) {
            ScheduleDecision::FireIn(d) => {
                prop_assert!(d.as_secs() > 0);
                prop_assert!(d.as_secs() <= 86_400);
            }
            other => prop_assert!(false, "expected FireIn, got {:?}", other),
        }
    }

    #[test]
    fn delay_lands_exactly_on_a_target(
        th in 0u8..24, tm in 0u8..60,
        nh in 0u8..24, nm in 0u8..60, ns in 0u8..60,
    ) {
        let targets = [DailyTarget::new(th, tm)];
        let now = Time { hour: nh, minute: nm, second: ns };
        if let ScheduleDecision::FireIn(d) = next_fire_delay(true, &targets, now) {
            let landed = (u64::from(now.seconds_of_day()) + d.as_secs()) % 86_400;
            prop_assert_eq!(landed, u64::from(targets[0].seconds_of_day()));
        }
    }
}
