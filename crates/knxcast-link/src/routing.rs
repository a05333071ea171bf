use crate::cemi::GroupWrite;
use crate::{BusLink, LinkError};
use knxcast_core::encoding::Writer;
use knxcast_core::{GroupAddress, IndividualAddress};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;

/// The KNXnet/IP system setup multicast group.
pub const ROUTING_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(224, 0, 23, 12);
pub const ROUTING_PORT: u16 = 3671;
/// Multicast TTL recommended for KNXnet/IP routing.
const ROUTING_TTL: u32 = 16;

const MAX_FRAME_LEN: usize = 64;

/// Send-only KNXnet/IP routing transport.
///
/// Multicasts routing indications to every router on the local network.
/// There is no receive path: incoming bus traffic is a non-goal for this
/// crate family, and routing needs no connection handshake or keepalive.
#[derive(Debug, Clone)]
pub struct RoutingTransport {
    socket: Arc<UdpSocket>,
    destination: SocketAddr,
    source: IndividualAddress,
}

impl RoutingTransport {
    /// Binds an ephemeral UDP socket targeting the standard routing
    /// multicast group. Outgoing frames carry `source` as the cEMI
    /// individual address.
    pub async fn bind(source: IndividualAddress) -> Result<Self, LinkError> {
        Self::bind_to(
            source,
            SocketAddr::new(IpAddr::V4(ROUTING_MULTICAST_ADDR), ROUTING_PORT),
        )
        .await
    }

    /// Binds with an explicit destination, e.g. a unicast router address on
    /// networks where multicast is filtered.
    pub async fn bind_to(
        source: IndividualAddress,
        destination: SocketAddr,
    ) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.set_multicast_ttl_v4(ROUTING_TTL)?;
        Ok(Self {
            socket: Arc::new(socket),
            destination,
            source,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> {
        self.socket.local_addr().map_err(LinkError::Io)
    }

    pub fn source(&self) -> IndividualAddress {
        self.source
    }
}

impl BusLink for RoutingTransport {
    async fn group_write(
        &self,
        destination: GroupAddress,
        payload: &[u8],
    ) -> Result<(), LinkError> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let mut w = Writer::new(&mut buf);
        GroupWrite {
            source: self.source,
            destination,
            payload,
        }
        .encode(&mut w)?;

        self.socket.send_to(w.as_written(), self.destination).await?;
        log::trace!(
            "routed {} byte group write to {destination} via {}",
            w.position(),
            self.destination
        );
        Ok(())
    }
}
