//! An in-memory [`BusLink`] that records group writes instead of sending them.
//!
//! Used by driver tests and dry runs: everything that would have gone onto
//! the bus can be inspected afterwards as `(destination, payload)` pairs.

use crate::{BusLink, LinkError};
use knxcast_core::GroupAddress;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingLink {
    sent: Mutex<Vec<(GroupAddress, Vec<u8>)>>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears everything recorded so far.
    pub fn take_sent(&self) -> Vec<(GroupAddress, Vec<u8>)> {
        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *sent)
    }
}

impl BusLink for RecordingLink {
    async fn group_write(
        &self,
        destination: GroupAddress,
        payload: &[u8],
    ) -> Result<(), LinkError> {
        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.push((destination, payload.to_vec()));
        Ok(())
    }
}
