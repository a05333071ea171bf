//! Next-occurrence computation over a set of daily send times.
//!
//! The scheduler is a pure function from (enabled flag, configured targets,
//! injected current time) to a single decision. It reads no clock and keeps
//! no state between invocations; the driver captures "now" once per cycle
//! and threads it through so scheduling and encoding agree on one instant.

use crate::types::Time;
use core::time::Duration;

/// Upper bound on a returned firing delay.
///
/// The host timer takes a signed 32-bit millisecond interval, so delays are
/// capped at 2,147,483,647 ms (about 24.8 days). A daily schedule never gets
/// near the cap; it is a policy of the timer mechanism, not of the domain.
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(i32::MAX as u64);

const SECONDS_PER_DAY: u32 = 86_400;

/// One configured daily `hour:minute` send instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DailyTarget {
    pub hour: u8,
    pub minute: u8,
}

impl DailyTarget {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Whether the target denotes a time that occurs on every calendar day.
    pub const fn is_valid(self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Seconds since midnight at which this target fires (second :00).
    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60
    }
}

/// Outcome of a scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleDecision {
    /// Broadcasting is switched off; no timer should run.
    Disabled,
    /// No valid target is configured; the timer should be disarmed.
    NoTargets,
    /// Arm the timer to fire after the contained delay.
    FireIn(Duration),
}

/// Computes the delay until the next configured send instant.
///
/// Targets may arrive unsorted and with duplicates; invalid entries (hour
/// ≥ 24 or minute ≥ 60) are skipped. The next occurrence is the target
/// strictly after `now` on the current day, or, once every target has
/// passed, the earliest target on the following day. A target equal to
/// `now` to the second counts as already passed and defers to tomorrow, so
/// a fire exactly on the boundary is never selected twice.
///
/// The comparison works on seconds-since-midnight deltas: a target at or
/// before `now` lies `86400 − now + target` seconds ahead, one after `now`
/// lies `target − now` ahead, and the minimum over all targets is the next
/// occurrence. Duplicates collapse naturally and no calendar arithmetic is
/// involved.
pub fn next_fire_delay(enabled: bool, targets: &[DailyTarget], now: Time) -> ScheduleDecision {
    if !enabled {
        return ScheduleDecision::Disabled;
    }

    let now_secs = now.seconds_of_day();
    let mut best: Option<u32> = None;
    for target in targets {
        if !target.is_valid() {
            continue;
        }
        let target_secs = target.seconds_of_day();
        let delta = if target_secs > now_secs {
            target_secs - now_secs
        } else {
            SECONDS_PER_DAY - now_secs + target_secs
        };
        best = Some(match best {
            Some(current) if current <= delta => current,
            _ => delta,
        });
    }

    match best {
        None => ScheduleDecision::NoTargets,
        Some(delta) => {
            let delay = Duration::from_secs(u64::from(delta));
            ScheduleDecision::FireIn(delay.min(MAX_TIMER_DELAY))
        }
    }
}
