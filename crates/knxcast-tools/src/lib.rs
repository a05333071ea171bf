//! Configuration loading and the broadcast cycle shared by the knxcast
//! binaries.
//!
//! The daemon and the one-shot tool both read the same JSON configuration
//! (active flag, group addresses, send times) and share the cycle logic:
//! capture the clock once, encode both datapoint payloads from that single
//! capture, and hand them to a [`BusLink`].

use chrono::{DateTime, Datelike, Local, Timelike};
use knxcast_core::dpt::{encode_dpt10_time, encode_dpt11_date};
use knxcast_core::{AddressParseError, DailyTarget, Date, GroupAddress, IndividualAddress, Time};
use knxcast_link::{BusLink, LinkError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {source}")]
    Address {
        field: &'static str,
        source: AddressParseError,
    },
}

/// One raw send-time entry as it appears in the config file.
///
/// Both fields are optional on purpose: entries missing either one, or with
/// values outside 0–23 / 0–59, are dropped at normalization instead of
/// failing the whole configuration. A broken row in the send-time list
/// should not stop the remaining times from firing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SendTimeEntry {
    #[serde(default)]
    pub hour: Option<i64>,
    #[serde(default)]
    pub minute: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    time_address: Option<String>,
    #[serde(default)]
    date_address: Option<String>,
    #[serde(default)]
    source_address: Option<String>,
    #[serde(default)]
    send_times: Vec<SendTimeEntry>,
}

const fn default_active() -> bool {
    true
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub active: bool,
    /// Destination for the DPT 10.001 payload; `None` skips the time telegram.
    pub time_address: Option<GroupAddress>,
    /// Destination for the DPT 11.001 payload; `None` skips the date telegram.
    pub date_address: Option<GroupAddress>,
    /// Individual address stamped into outgoing frames.
    pub source_address: IndividualAddress,
    pub send_times: Vec<DailyTarget>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let time_address = parse_group(raw.time_address.as_deref(), "time_address")?;
        let date_address = parse_group(raw.date_address.as_deref(), "date_address")?;
        let source_address = match raw.source_address.as_deref() {
            None | Some("") => IndividualAddress::UNASSIGNED,
            Some(s) => s.parse().map_err(|source| ConfigError::Address {
                field: "source_address",
                source,
            })?,
        };
        Ok(Self {
            active: raw.active,
            time_address,
            date_address,
            source_address,
            send_times: normalize_send_times(&raw.send_times),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

fn parse_group(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<GroupAddress>, ConfigError> {
    match value {
        // An empty address means "do not send this payload", as in an
        // unconfigured installation, and is not an error.
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|source| ConfigError::Address { field, source }),
    }
}

/// Filters raw send-time entries down to valid daily targets.
///
/// Malformed entries are dropped silently apart from a debug log line;
/// best-effort parsing keeps the valid remainder of the list firing.
pub fn normalize_send_times(entries: &[SendTimeEntry]) -> Vec<DailyTarget> {
    let mut targets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match (entry.hour, entry.minute) {
            (Some(hour @ 0..=23), Some(minute @ 0..=59)) => {
                targets.push(DailyTarget::new(hour as u8, minute as u8));
            }
            _ => log::debug!("dropping malformed send time entry {index}: {entry:?}"),
        }
    }
    targets
}

/// Splits one clock capture into the time and date values to encode.
///
/// Called exactly once per cycle so scheduling and both payloads agree on a
/// single notion of "now".
pub fn capture(now: &DateTime<Local>) -> (Time, Date) {
    let time = Time {
        hour: now.hour() as u8,
        minute: now.minute() as u8,
        second: now.second() as u8,
    };
    let date = Date {
        day: now.day() as u8,
        month: now.month() as u8,
        year: u16::try_from(now.year()).unwrap_or(0),
    };
    (time, date)
}

/// Encodes and sends the time and date telegrams for one captured instant.
///
/// Each telegram goes to its configured group address; an unset address
/// skips that telegram. The date telegram is attempted even when the time
/// telegram fails, and the first failure is returned afterwards.
pub async fn broadcast<L: BusLink>(
    link: &L,
    settings: &Settings,
    time: Time,
    date: Date,
) -> Result<(), LinkError> {
    let mut first_err = None;

    if let Some(destination) = settings.time_address {
        let payload = encode_dpt10_time(time);
        log::debug!("time payload {payload:02x?} for {destination}");
        match link.group_write(destination, &payload).await {
            Ok(()) => log::info!(
                "time {:02}:{:02}:{:02} written to {destination}",
                time.hour,
                time.minute,
                time.second
            ),
            Err(err) => {
                log::warn!("time telegram to {destination} failed: {err}");
                first_err = Some(err);
            }
        }
    }

    if let Some(destination) = settings.date_address {
        let payload = encode_dpt11_date(date);
        log::debug!("date payload {payload:02x?} for {destination}");
        match link.group_write(destination, &payload).await {
            Ok(()) => log::info!(
                "date {:02}.{:02}.{:04} written to {destination}",
                date.day,
                date.month,
                date.year
            ),
            Err(err) => {
                log::warn!("date telegram to {destination} failed: {err}");
                first_err = first_err.or(Some(err));
            }
        }
    }

    match first_err {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{broadcast, normalize_send_times, Settings};
    use knxcast_core::{DailyTarget, Date, GroupAddress, Time};
    use knxcast_link::RecordingLink;

    #[test]
    fn config_parses_full_example() {
        let settings = Settings::from_json(
            r#"{
                "active": true,
                "time_address": "5/1/2",
                "date_address": "5/1/3",
                "source_address": "1.1.250",
                "send_times": [
                    { "hour": 6, "minute": 30 },
                    { "hour": 18, "minute": 0 }
                ]
            }"#,
        )
        .unwrap();
        assert!(settings.active);
        assert_eq!(settings.time_address, Some(GroupAddress::new(5, 1, 2)));
        assert_eq!(settings.date_address, Some(GroupAddress::new(5, 1, 3)));
        assert_eq!(settings.source_address.to_string(), "1.1.250");
        assert_eq!(
            settings.send_times,
            vec![DailyTarget::new(6, 30), DailyTarget::new(18, 0)]
        );
    }

    #[test]
    fn config_defaults_are_permissive() {
        let settings = Settings::from_json("{}").unwrap();
        assert!(settings.active);
        assert_eq!(settings.time_address, None);
        assert_eq!(settings.date_address, None);
        assert_eq!(settings.source_address.raw(), 0);
        assert!(settings.send_times.is_empty());
    }

    #[test]
    fn config_rejects_bad_group_address() {
        let err = Settings::from_json(r#"{ "time_address": "40/1/2" }"#).unwrap_err();
        assert!(err.to_string().contains("time_address"));
    }

    #[test]
    fn malformed_send_times_are_dropped() {
        let settings = Settings::from_json(
            r#"{
                "send_times": [
                    { "hour": 6, "minute": 30 },
                    { "hour": 7 },
                    { "minute": 15 },
                    {},
                    { "hour": 24, "minute": 0 },
                    { "hour": -1, "minute": 5 },
                    { "hour": 12, "minute": 60 },
                    { "hour": 23, "minute": 59 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            settings.send_times,
            vec![DailyTarget::new(6, 30), DailyTarget::new(23, 59)]
        );
    }

    #[test]
    fn normalize_keeps_boundary_values() {
        let entries: Vec<super::SendTimeEntry> = serde_json::from_str(
            r#"[ { "hour": 0, "minute": 0 }, { "hour": 23, "minute": 59 } ]"#,
        )
        .unwrap();
        assert_eq!(
            normalize_send_times(&entries),
            vec![DailyTarget::new(0, 0), DailyTarget::new(23, 59)]
        );
    }

    fn test_settings() -> Settings {
        Settings {
            active: true,
            time_address: Some(GroupAddress::new(5, 1, 2)),
            date_address: Some(GroupAddress::new(5, 1, 3)),
            source_address: knxcast_core::IndividualAddress::UNASSIGNED,
            send_times: vec![DailyTarget::new(6, 30)],
        }
    }

    #[tokio::test]
    async fn broadcast_sends_both_payloads() {
        let link = RecordingLink::new();
        let time = Time {
            hour: 14,
            minute: 5,
            second: 42,
        };
        let date = Date {
            day: 11,
            month: 12,
            year: 2025,
        };
        broadcast(&link, &test_settings(), time, date).await.unwrap();

        let sent = link.take_sent();
        assert_eq!(
            sent,
            vec![
                (GroupAddress::new(5, 1, 2), vec![0x0E, 0x05, 0x2A]),
                (GroupAddress::new(5, 1, 3), vec![0x0B, 0x0C, 0x19]),
            ]
        );
    }

    #[tokio::test]
    async fn broadcast_skips_unset_addresses() {
        let link = RecordingLink::new();
        let mut settings = test_settings();
        settings.date_address = None;
        let time = Time {
            hour: 0,
            minute: 0,
            second: 0,
        };
        let date = Date {
            day: 1,
            month: 1,
            year: 2026,
        };
        broadcast(&link, &settings, time, date).await.unwrap();

        let sent = link.take_sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, GroupAddress::new(5, 1, 2));
    }
}
