use crate::proto::udp::outbound::types::Control;
use crate::proto::udp::outbound::{PacketIndex, UdpControlPacket, PACKET_SIZE};

pub(crate) mod send;

pub use self::send::PacketState;

/// Represents the current Mode that the robot is in.
/// The `Mode` of the robot is considered separately from whether it is enabled or not
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Autonomous,
    Teleoperated,
    Test,
}

impl Mode {
    /// Reads the mode out of a control byte. Autonomous wins if both mode flags are somehow set
    pub fn from_control(control: Control) -> Mode {
        if control.contains(Control::AUTO) {
            Mode::Autonomous
        } else if control.contains(Control::TEST) {
            Mode::Test
        } else {
            Mode::Teleoperated
        }
    }

    pub(crate) fn to_control(self) -> Control {
        match self {
            Mode::Teleoperated => Control::empty(),
            Mode::Autonomous => Control::AUTO,
            Mode::Test => Control::TEST,
        }
    }
}

/// A single driver station session: the outgoing state, the team it belongs to and the
/// sequence number of the next packet
///
/// `Session` does no I/O. Packets it produces can be handed to any transport, see
/// [`DriverStation`](../struct.DriverStation.html) for one that sends them over UDP.
#[derive(Clone, Debug)]
pub struct Session {
    team_number: u16,
    index: PacketIndex,
    state: PacketState,
}

impl Session {
    /// Starts a session for `team_number` with a fresh default state
    pub fn new(team_number: u16) -> Session {
        Session {
            team_number,
            index: PacketIndex::default(),
            state: PacketState::new(),
        }
    }

    pub fn team_number(&self) -> u16 {
        self.team_number
    }

    /// The index that will be written into the next packet
    pub fn packet_index(&self) -> PacketIndex {
        self.index
    }

    pub fn state(&self) -> &PacketState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PacketState {
        &mut self.state
    }

    /// Snapshots the current state into a packet and advances the packet index
    pub fn control(&mut self) -> UdpControlPacket {
        let packet = UdpControlPacket::new(self.index, self.team_number, self.state);
        self.index = self.index.next();
        packet
    }

    /// Encodes the next packet to send to the controller
    pub fn next_packet(&mut self) -> [u8; PACKET_SIZE] {
        self.control().encode()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::proto::udp::outbound::crc_of;
    use byteorder::{BigEndian, ByteOrder};

    #[test]
    fn mode_from_control() {
        assert_eq!(Mode::from_control(Control::empty()), Mode::Teleoperated);
        assert_eq!(Mode::from_control(Control::ENABLED), Mode::Teleoperated);
        assert_eq!(Mode::from_control(Control::AUTO | Control::ESTOP), Mode::Autonomous);
        assert_eq!(Mode::from_control(Control::TEST), Mode::Test);
    }

    #[test]
    fn sessions_are_independent() {
        let mut first = Session::new(1114);
        let second = Session::new(254);

        first.state_mut().set_enabled(true);
        first.state_mut().set_analog_output(1, 100).unwrap();
        first.next_packet();

        assert!(!second.state().is_enabled());
        assert_eq!(second.state().analog_output(1).unwrap(), 0);
        assert_eq!(second.packet_index().value(), 0);
        assert_eq!(Session::new(1114).state(), &PacketState::new());
    }

    #[test]
    fn next_packet_advances_index() {
        let mut session = Session::new(1114);
        for expected in 0..5u16 {
            assert_eq!(session.packet_index().value(), expected);
            let buf = session.next_packet();
            assert_eq!(BigEndian::read_u16(&buf[0..2]), expected);
            assert_eq!(BigEndian::read_u16(&buf[4..6]), 1114);
        }
        assert_eq!(session.packet_index().value(), 5);
    }

    #[test]
    fn repeated_packets_differ_only_in_index_and_checksum() {
        let mut session = Session::new(1114);
        session.state_mut().set_mode(Mode::Autonomous);
        session.state_mut().set_joystick_axis(3, 2, -64).unwrap();

        let first = session.next_packet();
        let second = session.next_packet();

        assert_ne!(first[0..2], second[0..2]);
        assert_eq!(first[2..1020], second[2..1020]);
        assert_ne!(first[1020..], second[1020..]);
        assert_eq!(BigEndian::read_u32(&second[1020..]), crc_of(&second));
    }
}
