use super::state::Session;
use super::Signal;

use crate::proto::udp::DsUdpCodec;
use crate::Result;

use futures_channel::mpsc::UnboundedReceiver;
use futures_util::sink::SinkExt;
use futures_util::stream::StreamExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::time;
use tokio_util::udp::UdpFramed;
use tracing::{debug, info, warn};

/// Port that the cRIO listens for control packets on
pub(crate) const CRIO_PORT: u16 = 1110;

/// Time between control packets
const SEND_PERIOD: Duration = Duration::from_millis(20);

/// Sends the session's state to `target` every 20ms until told to disconnect.
///
/// Sending is fire and forget. Failed sends are logged and the packet is dropped, the next
/// tick carries the latest state anyway.
pub(crate) async fn udp_conn(
    session: Arc<Mutex<Session>>,
    socket: std::net::UdpSocket,
    mut target: SocketAddr,
    mut rx: UnboundedReceiver<Signal>,
) -> Result<()> {
    let socket = UdpSocket::from_std(socket)?;
    let mut framed = UdpFramed::new(socket, DsUdpCodec);
    let mut ticker = time::interval(SEND_PERIOD);

    info!(%target, "sending control packets");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Hold the lock only while snapshotting, never across the send
                let packet = session.lock().await.control();
                let index = packet.index().value();
                if let Err(e) = framed.send((packet, target)).await {
                    warn!(%target, index, error = %e, "failed to send control packet");
                }
            }
            signal = rx.next() => {
                match signal {
                    Some(Signal::NewTarget(new_target)) => {
                        debug!(old = %target, new = %new_target, "changing target");
                        target = new_target;
                    }
                    Some(Signal::Disconnect) | None => break,
                }
            }
        }
    }

    info!("control connection closed");
    Ok(())
}
