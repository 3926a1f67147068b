use crate::proto::udp::outbound::UdpControlPacket;
use bytes::BytesMut;
use tokio_util::codec::Encoder;

pub mod outbound;

/// Codec used to frame control packets onto a UDP socket. Nothing is decoded, the
/// controller's replies are ignored.
pub struct DsUdpCodec;

impl Encoder for DsUdpCodec {
    type Item = UdpControlPacket;
    type Error = failure::Error;

    fn encode(&mut self, item: Self::Item, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&item.encode()[..]);

        Ok(())
    }
}
