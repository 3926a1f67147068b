//! # crio-ds
//!
//! `crio-ds` is a library that allows for control of cRIO-era FIRST Robotics Competition robots.
//! Only the outbound control packet is supported: digital and analog outputs, joysticks, mode,
//! alliance station and a sequence number, sent to the cRIO in a fixed 1024 byte datagram.
//! Nothing sent back by the cRIO is decoded.
//!
//! [`Session`](struct.Session.html) holds the state and encodes packets without doing any I/O.
//! [`DriverStation`](struct.DriverStation.html) wraps a session and sends its packets to the
//! cRIO every 20ms.

#[macro_use]
extern crate bitflags;

mod ds;
mod error;
mod proto;
pub mod util;

pub use self::ds::state::{Mode, PacketState, Session};
pub use self::ds::DriverStation;
pub use self::error::ControlError;
pub use self::proto::udp::outbound::types::*;
pub use self::proto::udp::outbound::{
    encode, PacketIndex, UdpControlPacket, PACKET_SIZE, VERSION_TAG,
};
pub use self::proto::udp::DsUdpCodec;

pub type Result<T> = std::result::Result<T, failure::Error>;
