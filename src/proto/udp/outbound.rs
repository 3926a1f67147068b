pub mod types;

use self::types::*;
use crate::ds::state::PacketState;
use crate::error::ControlError;
use byteorder::{BigEndian, ByteOrder};
use std::convert::TryFrom;

/// Every control packet is exactly this many bytes long
pub const PACKET_SIZE: usize = 1024;

/// Version tag expected by the controller
pub const VERSION_TAG: &[u8; 8] = b"02121300";

const INDEX_OFFSET: usize = 0;
const CONTROL_OFFSET: usize = 2;
const DIGITAL_OFFSET: usize = 3;
const TEAM_OFFSET: usize = 4;
const ALLIANCE_OFFSET: usize = 6;
const POSITION_OFFSET: usize = 7;
const JOYSTICK_OFFSET: usize = 8;
// 6 axis bytes followed by a u16 of buttons
const JOYSTICK_STRIDE: usize = 8;
const ANALOG_OFFSET: usize = 40;
const VERSION_OFFSET: usize = 72;
const CRC_OFFSET: usize = PACKET_SIZE - 4;

/// Sequence number of a control packet. Wraps back to 0 after 65535.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketIndex(u16);

impl PacketIndex {
    pub fn new(index: u16) -> PacketIndex {
        PacketIndex(index)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Returns the index that follows `self`
    pub fn next(self) -> PacketIndex {
        PacketIndex(self.0.wrapping_add(1))
    }
}

impl TryFrom<u32> for PacketIndex {
    type Error = ControlError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        u16::try_from(index)
            .map(PacketIndex)
            .map_err(|_| ControlError::InvariantViolation { index })
    }
}

/// UDP control packet to send to the controller
///
/// This is a snapshot: changes made to the session after it was taken are not reflected.
#[derive(Copy, Clone, Debug)]
pub struct UdpControlPacket {
    pub(crate) index: PacketIndex,
    pub(crate) team_number: u16,
    pub(crate) state: PacketState,
}

impl UdpControlPacket {
    pub fn new(index: PacketIndex, team_number: u16, state: PacketState) -> UdpControlPacket {
        UdpControlPacket {
            index,
            team_number,
            state,
        }
    }

    pub fn index(&self) -> PacketIndex {
        self.index
    }

    /// Encodes the packet into the fixed size buffer expected by the controller
    pub fn encode(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        let state = &self.state;

        BigEndian::write_u16(&mut buf[INDEX_OFFSET..], self.index.value());
        buf[CONTROL_OFFSET] = state.control().bits();
        buf[DIGITAL_OFFSET] = state.digital_outputs().bits();
        BigEndian::write_u16(&mut buf[TEAM_OFFSET..], self.team_number);
        buf[ALLIANCE_OFFSET] = state.alliance().code();
        buf[POSITION_OFFSET] = state.position().code();

        for (i, joystick) in state.joysticks().iter().enumerate() {
            let start = JOYSTICK_OFFSET + i * JOYSTICK_STRIDE;
            for (j, axis) in joystick.axes().iter().enumerate() {
                buf[start + j] = *axis as u8;
            }
            BigEndian::write_u16(&mut buf[start + AXIS_COUNT..], joystick.buttons());
        }

        for (i, value) in state.analog_outputs().iter().enumerate() {
            BigEndian::write_u16(&mut buf[ANALOG_OFFSET + i * 2..], *value);
        }

        buf[VERSION_OFFSET..VERSION_OFFSET + VERSION_TAG.len()].copy_from_slice(VERSION_TAG);

        let crc = crc_of(&buf);
        BigEndian::write_u32(&mut buf[CRC_OFFSET..], crc);

        buf
    }
}

/// Encodes `state` as packet number `index` for `team_number`, then advances `index`
pub fn encode(state: &PacketState, index: &mut PacketIndex, team_number: u16) -> [u8; PACKET_SIZE] {
    let buf = UdpControlPacket::new(*index, team_number, *state).encode();
    *index = index.next();
    buf
}

/// CRC-32 of a packet, computed as if the trailer bytes were zero
pub(crate) fn crc_of(packet: &[u8; PACKET_SIZE]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&packet[..CRC_OFFSET]);
    hasher.update(&[0u8; 4]);
    hasher.finalize()
}
