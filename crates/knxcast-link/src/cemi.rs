//! cEMI group-write frames wrapped in KNXnet/IP routing indications.
//!
//! Encode-only: this crate never parses incoming bus traffic.

use knxcast_core::encoding::Writer;
use knxcast_core::{EncodeError, GroupAddress, IndividualAddress};

pub const KNXNETIP_HEADER_LEN: u8 = 0x06;
pub const KNXNETIP_VERSION: u8 = 0x10;
pub const SERVICE_ROUTING_INDICATION: u16 = 0x0530;

pub const CEMI_L_DATA_IND: u8 = 0x29;
/// Standard frame, not repeated, normal priority.
const CTRL1_STANDARD: u8 = 0xBC;
/// Group-addressed destination, hop count 6.
const CTRL2_GROUP: u8 = 0xE0;
/// APCI high octet for GroupValue_Write with the payload in separate octets.
pub const APCI_GROUP_VALUE_WRITE: u8 = 0x80;

/// A group-value write carrying a datapoint payload in separate octets.
///
/// Encodes as a complete KNXnet/IP routing indication: the 6-byte header,
/// then the cEMI `L_Data.ind` with the [`APCI_GROUP_VALUE_WRITE`] command
/// octet ahead of the payload. Payloads of 1 to 14 octets fit a standard
/// frame; DPT 10.001 and 11.001 use 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupWrite<'a> {
    pub source: IndividualAddress,
    pub destination: GroupAddress,
    pub payload: &'a [u8],
}

impl GroupWrite<'_> {
    /// APDU payload budget of a standard frame.
    pub const MAX_PAYLOAD: usize = 14;

    /// Total wire length of the encoded routing indication.
    pub const fn frame_len(&self) -> usize {
        // header(6) + cEMI fixed part through the TPCI octet(10)
        // + APCI octet + payload
        6 + 10 + 1 + self.payload.len()
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if self.payload.is_empty() {
            return Err(EncodeError::InvalidLength);
        }
        if self.payload.len() > Self::MAX_PAYLOAD {
            return Err(EncodeError::PayloadTooLarge);
        }

        w.write_u8(KNXNETIP_HEADER_LEN)?;
        w.write_u8(KNXNETIP_VERSION)?;
        w.write_be_u16(SERVICE_ROUTING_INDICATION)?;
        w.write_be_u16(self.frame_len() as u16)?;

        w.write_u8(CEMI_L_DATA_IND)?;
        w.write_u8(0)?; // no additional info
        w.write_u8(CTRL1_STANDARD)?;
        w.write_u8(CTRL2_GROUP)?;
        w.write_be_u16(self.source.raw())?;
        w.write_be_u16(self.destination.raw())?;
        // NPDU length counts the APCI command octet plus the payload octets.
        w.write_u8((self.payload.len() + 1) as u8)?;
        w.write_u8(0)?; // TPCI: unnumbered data
        w.write_u8(APCI_GROUP_VALUE_WRITE)?;
        w.write_all(self.payload)
    }
}
