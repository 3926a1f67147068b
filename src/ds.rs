use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread;

mod conn;
pub(crate) mod state;

use self::conn::*;
use self::state::*;

use futures::executor::block_on;
use futures_channel::mpsc::{unbounded, UnboundedSender};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::ControlError;
use crate::proto::udp::outbound::types::*;
use crate::proto::udp::outbound::PacketIndex;
use crate::util::ip_from_team_number;
use crate::Result;

type StdResult<T> = std::result::Result<T, ControlError>;

/// Represents a connection to the cRIO acting as a driver station
///
/// This struct owns the session state, and a background thread that sends that state to the
/// cRIO every 20ms. Every setter takes effect from the next packet sent.
pub struct DriverStation {
    thread_tx: UnboundedSender<Signal>,
    session: Arc<Mutex<Session>>,
}

impl DriverStation {
    /// Creates a new driver station for the given team
    ///
    /// This driver station will send to a cRIO at 10.TE.AM.2,
    /// if the cRIO is at a different ip, use [new] and specify the ip directly.
    pub fn new_team(team_number: u16) -> Result<DriverStation> {
        let ip = ip_from_team_number(team_number)?;
        Self::connect(SocketAddr::new(ip.into(), CRIO_PORT), team_number)
    }

    /// Creates a new driver station for the given team number, sending to the cRIO at `ip`.
    /// To infer the ip from team_number, use `new_team` instead.
    pub fn new(ip: &str, team_number: u16) -> Result<DriverStation> {
        let ip: IpAddr = ip.parse()?;
        Self::connect(SocketAddr::new(ip, CRIO_PORT), team_number)
    }

    /// Binds the outbound socket and starts the send thread.
    ///
    /// Errors binding the socket or starting the runtime are returned here; once this succeeds
    /// the only failures left are per-packet send errors, which are logged and skipped.
    pub(crate) fn connect(target: SocketAddr, team_number: u16) -> Result<DriverStation> {
        use tokio::runtime::Runtime;

        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_nonblocking(true)?;
        let mut rt = Runtime::new()?;

        // Used to tell the connection to stop when the struct is dropped, or to change targets
        let (tx, rx) = unbounded::<Signal>();

        let session = Arc::new(Mutex::new(Session::new(team_number)));

        let udp_session = session.clone();
        thread::spawn(move || {
            if let Err(e) = rt.block_on(udp_conn(udp_session, socket, target, rx)) {
                error!(error = %e, "control connection failed");
            }
        });

        Ok(DriverStation {
            thread_tx: tx,
            session,
        })
    }

    /// Changes the address that packets are sent to
    pub fn set_target_ip(&mut self, ip: &str) -> Result<()> {
        let ip: IpAddr = ip.parse()?;
        self.retarget(SocketAddr::new(ip, CRIO_PORT))
    }

    /// Sends packets to the cRIO of this driver station's team, at 10.TE.AM.2
    pub fn set_team_target(&mut self) -> Result<()> {
        let ip = ip_from_team_number(self.team_number())?;
        self.retarget(SocketAddr::new(ip.into(), CRIO_PORT))
    }

    fn retarget(&mut self, target: SocketAddr) -> Result<()> {
        debug!(%target, "requesting new target");
        self.thread_tx.unbounded_send(Signal::NewTarget(target))?;
        Ok(())
    }

    pub fn team_number(&self) -> u16 {
        block_on(self.session.lock()).team_number()
    }

    /// Returns the index of the next packet that will be sent
    pub fn packet_index(&self) -> PacketIndex {
        block_on(self.session.lock()).packet_index()
    }

    /// Returns a copy of the state that will go out with the next packet
    pub fn state(&self) -> PacketState {
        *block_on(self.session.lock()).state()
    }

    /// Enables outputs on the robot
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Disables outputs on the robot
    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        block_on(self.session.lock()).state_mut().set_enabled(enabled);
    }

    /// Returns whether the robot is currently enabled
    pub fn enabled(&self) -> bool {
        block_on(self.session.lock()).state().is_enabled()
    }

    /// Emergency stops the robot
    pub fn estop(&mut self) {
        self.set_emergency_stop(true);
    }

    pub fn set_emergency_stop(&mut self, estop: bool) {
        block_on(self.session.lock()).state_mut().set_emergency_stop(estop);
    }

    /// Returns whether the robot is currently E-stopped
    pub fn estopped(&self) -> bool {
        block_on(self.session.lock()).state().is_emergency_stopped()
    }

    /// Changes the given `mode` the robot will be in
    pub fn set_mode(&mut self, mode: Mode) {
        block_on(self.session.lock()).state_mut().set_mode(mode);
    }

    /// Returns the current mode of the robot
    pub fn mode(&self) -> Mode {
        block_on(self.session.lock()).state().mode()
    }

    pub fn set_alliance(&mut self, alliance: Alliance) {
        block_on(self.session.lock()).state_mut().set_alliance(alliance);
    }

    /// Changes the station, see [`PacketState::set_position`]
    pub fn set_position(&mut self, position: i32) {
        block_on(self.session.lock()).state_mut().set_position(position);
    }

    pub fn set_digital_output(&mut self, channel: usize, value: bool) -> StdResult<()> {
        block_on(self.session.lock())
            .state_mut()
            .set_digital_output(channel, value)
    }

    pub fn set_analog_output(&mut self, channel: usize, value: i32) -> StdResult<()> {
        block_on(self.session.lock())
            .state_mut()
            .set_analog_output(channel, value)
    }

    pub fn set_joystick_axis(
        &mut self,
        joystick: usize,
        axis: usize,
        value: i32,
    ) -> StdResult<()> {
        block_on(self.session.lock())
            .state_mut()
            .set_joystick_axis(joystick, axis, value)
    }

    pub fn set_joystick_button(
        &mut self,
        joystick: usize,
        button: usize,
        pressed: bool,
    ) -> StdResult<()> {
        block_on(self.session.lock())
            .state_mut()
            .set_joystick_button(joystick, button, pressed)
    }

    /// Applies several changes under one lock, so no packet is sent with only some of them applied
    pub fn update<T>(&mut self, f: impl FnOnce(&mut PacketState) -> T) -> T {
        f(block_on(self.session.lock()).state_mut())
    }
}

impl Drop for DriverStation {
    fn drop(&mut self) {
        // When this struct is dropped the thread that we spawned should be stopped,
        // otherwise we're leaking it
        let _ = self.thread_tx.unbounded_send(Signal::Disconnect);
    }
}

#[derive(Debug)]
pub(crate) enum Signal {
    Disconnect,
    NewTarget(SocketAddr),
}
