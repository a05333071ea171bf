use knxcast_core::GroupAddress;
use thiserror::Error;

/// Errors that can occur at the bus link layer.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame encode error: {0}")]
    Encode(#[from] knxcast_core::EncodeError),
}

/// Async trait for writing group values onto a KNX bus.
///
/// Implementors include [`RoutingTransport`](crate::RoutingTransport) for
/// KNXnet/IP routing over UDP multicast and [`RecordingLink`](crate::RecordingLink)
/// for tests. The link layer owns the group-value-write command octet and the
/// wire framing; callers hand over only the bare datapoint payload.
///
/// Delivery is fire-and-forget: KNXnet/IP routing is unacknowledged, so `Ok`
/// means the frame left the socket, not that any device received it.
pub trait BusLink: Send + Sync {
    /// Sends `payload` as a group-value write to `destination`.
    async fn group_write(&self, destination: GroupAddress, payload: &[u8])
        -> Result<(), LinkError>;
}
