#![allow(async_fn_in_trait)]

pub mod cemi;
pub mod recording;
pub mod routing;
pub mod traits;

pub use cemi::GroupWrite;
pub use recording::RecordingLink;
pub use routing::RoutingTransport;
pub use traits::{BusLink, LinkError};
