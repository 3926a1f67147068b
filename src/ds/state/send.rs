use crate::error::ControlError;
use crate::proto::udp::outbound::types::*;
use crate::Mode;

/// Number of joysticks carried in a control packet
pub const JOYSTICK_COUNT: usize = 4;
/// Number of analog output channels carried in a control packet
pub const ANALOG_COUNT: usize = 4;
/// Number of digital output channels carried in a control packet
pub const DIGITAL_COUNT: usize = 8;

type StdResult<T> = std::result::Result<T, ControlError>;

/// The values that will be written into the next outgoing control packet
///
/// Every setter enforces the range of its field when it is called, so a `PacketState` can
/// always be encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PacketState {
    control: Control,
    digital_outputs: DigitalOutputs,
    analog_outputs: [u16; ANALOG_COUNT],
    alliance: Alliance,
    position: Position,
    joysticks: [Joystick; JOYSTICK_COUNT],
}

/// The state every new session starts from
const DEFAULT_STATE: PacketState = PacketState {
    control: Control::empty(),
    digital_outputs: DigitalOutputs::empty(),
    analog_outputs: [0; ANALOG_COUNT],
    alliance: Alliance::Red,
    position: Position::One,
    joysticks: [Joystick::NEUTRAL; JOYSTICK_COUNT],
};

impl Default for PacketState {
    fn default() -> PacketState {
        DEFAULT_STATE
    }
}

impl PacketState {
    pub fn new() -> PacketState {
        DEFAULT_STATE
    }

    pub fn set_emergency_stop(&mut self, estop: bool) {
        self.control.set(Control::ESTOP, estop);
    }

    pub fn is_emergency_stopped(&self) -> bool {
        self.control.contains(Control::ESTOP)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.control.set(Control::ENABLED, enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.control.contains(Control::ENABLED)
    }

    /// Selects `mode`, clearing the flag of any other mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.control.remove(Control::AUTO | Control::TEST);
        self.control.insert(mode.to_control());
    }

    /// Returns the currently selected mode, teleoperated unless a mode flag is set
    pub fn mode(&self) -> Mode {
        Mode::from_control(self.control)
    }

    pub fn set_alliance(&mut self, alliance: Alliance) {
        self.alliance = alliance;
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// Sets the station number. Numbers other than 1, 2 or 3 select station 1.
    pub fn set_position(&mut self, position: i32) {
        self.position = Position::from_number(position);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_digital_output(&mut self, channel: usize, value: bool) -> StdResult<()> {
        let flag = DigitalOutputs::channel(channel)
            .ok_or_else(|| ControlError::out_of_range("digital channel", channel, DIGITAL_COUNT))?;
        self.digital_outputs.set(flag, value);
        Ok(())
    }

    pub fn digital_output(&self, channel: usize) -> StdResult<bool> {
        let flag = DigitalOutputs::channel(channel)
            .ok_or_else(|| ControlError::out_of_range("digital channel", channel, DIGITAL_COUNT))?;
        Ok(self.digital_outputs.contains(flag))
    }

    /// Sets an analog output. `value` is clamped into `0..=1023`.
    pub fn set_analog_output(&mut self, channel: usize, value: i32) -> StdResult<()> {
        let slot = analog_slot(channel)?;
        self.analog_outputs[slot] = value.max(ANALOG_MIN).min(ANALOG_MAX) as u16;
        Ok(())
    }

    pub fn analog_output(&self, channel: usize) -> StdResult<u16> {
        Ok(self.analog_outputs[analog_slot(channel)?])
    }

    /// Sets one axis of one joystick. `value` is clamped into the range of an `i8`.
    pub fn set_joystick_axis(&mut self, joystick: usize, axis: usize, value: i32) -> StdResult<()> {
        let slot = joystick_slot(joystick)?;
        if axis < 1 || axis > AXIS_COUNT {
            return Err(ControlError::out_of_range("joystick axis", axis, AXIS_COUNT));
        }

        let value = value.max(i32::from(i8::MIN)).min(i32::from(i8::MAX));
        self.joysticks[slot].axes[axis - 1] = value as i8;
        Ok(())
    }

    pub fn set_joystick_button(
        &mut self,
        joystick: usize,
        button: usize,
        pressed: bool,
    ) -> StdResult<()> {
        let slot = joystick_slot(joystick)?;
        if button < 1 || button > BUTTON_COUNT {
            return Err(ControlError::out_of_range("joystick button", button, BUTTON_COUNT));
        }

        let mask = 1u16 << (button - 1);
        let buttons = &mut self.joysticks[slot].buttons;
        if pressed {
            *buttons |= mask;
        } else {
            *buttons &= !mask;
        }
        Ok(())
    }

    pub fn joystick(&self, joystick: usize) -> StdResult<&Joystick> {
        Ok(&self.joysticks[joystick_slot(joystick)?])
    }

    pub(crate) fn control(&self) -> Control {
        self.control
    }

    pub(crate) fn digital_outputs(&self) -> DigitalOutputs {
        self.digital_outputs
    }

    pub(crate) fn analog_outputs(&self) -> &[u16; ANALOG_COUNT] {
        &self.analog_outputs
    }

    pub(crate) fn joysticks(&self) -> &[Joystick; JOYSTICK_COUNT] {
        &self.joysticks
    }
}

fn analog_slot(channel: usize) -> StdResult<usize> {
    if channel < 1 || channel > ANALOG_COUNT {
        Err(ControlError::out_of_range("analog channel", channel, ANALOG_COUNT))
    } else {
        Ok(channel - 1)
    }
}

fn joystick_slot(joystick: usize) -> StdResult<usize> {
    if joystick < 1 || joystick > JOYSTICK_COUNT {
        Err(ControlError::out_of_range("joystick", joystick, JOYSTICK_COUNT))
    } else {
        Ok(joystick - 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let state = PacketState::new();
        assert!(!state.is_enabled());
        assert!(!state.is_emergency_stopped());
        assert_eq!(state.mode(), Mode::Teleoperated);
        assert_eq!(state.alliance(), Alliance::Red);
        assert_eq!(state.position(), Position::One);
        assert_eq!(state.control().bits(), 0);
        assert_eq!(state, PacketState::default());
    }

    #[test]
    fn estop_and_enable_bits() {
        let mut state = PacketState::new();
        state.set_emergency_stop(true);
        assert!(state.is_emergency_stopped());
        assert_eq!(state.control().bits(), 0b0000_0010);

        state.set_enabled(true);
        assert!(state.is_enabled());
        assert_eq!(state.control().bits(), 0b0000_0110);

        state.set_emergency_stop(false);
        assert!(!state.is_emergency_stopped());
        assert!(state.is_enabled());
        assert_eq!(state.control().bits(), 0b0000_0100);
    }

    #[test]
    fn mode_round_trip() {
        let mut state = PacketState::new();
        state.set_enabled(true);

        state.set_mode(Mode::Autonomous);
        assert_eq!(state.mode(), Mode::Autonomous);
        assert_eq!(state.control().bits(), 0b0000_1100);

        state.set_mode(Mode::Test);
        assert_eq!(state.mode(), Mode::Test);
        assert!(!state.control().contains(Control::AUTO));
        assert_eq!(state.control().bits(), 0b0100_0100);

        state.set_mode(Mode::Teleoperated);
        assert_eq!(state.mode(), Mode::Teleoperated);
        assert_eq!(state.control().bits(), 0b0000_0100);
    }

    #[test]
    fn mode_bits_never_both_set() {
        let modes = [
            Mode::Autonomous,
            Mode::Test,
            Mode::Teleoperated,
            Mode::Test,
            Mode::Autonomous,
        ];
        let mut state = PacketState::new();
        for mode in modes.iter() {
            state.set_mode(*mode);
            assert!(!state.control().contains(Control::AUTO | Control::TEST));
        }
    }

    #[test]
    fn digital_round_trip() {
        let mut state = PacketState::new();
        for channel in 1..=DIGITAL_COUNT {
            state.set_digital_output(channel, true).unwrap();
            assert!(state.digital_output(channel).unwrap());
            state.set_digital_output(channel, false).unwrap();
            assert!(!state.digital_output(channel).unwrap());
        }

        state.set_digital_output(3, true).unwrap();
        state.set_digital_output(8, true).unwrap();
        assert_eq!(state.digital_outputs().bits(), 0b1000_0100);
    }

    #[test]
    fn digital_out_of_range() {
        let mut state = PacketState::new();
        assert_eq!(
            state.set_digital_output(0, true),
            Err(ControlError::out_of_range("digital channel", 0, 8))
        );
        assert!(state.set_digital_output(9, true).is_err());
        assert_eq!(state, PacketState::new());
    }

    #[test]
    fn analog_clamps() {
        let mut state = PacketState::new();
        state.set_analog_output(1, 512).unwrap();
        state.set_analog_output(2, 5000).unwrap();
        state.set_analog_output(3, -20).unwrap();
        state.set_analog_output(4, 1023).unwrap();

        assert_eq!(state.analog_outputs(), &[512, 1023, 0, 1023]);
        assert!(state.set_analog_output(5, 1).is_err());
        assert!(state.set_analog_output(0, 1).is_err());
        assert!(state.analog_output(5).is_err());
    }

    #[test]
    fn axis_clamps() {
        let mut state = PacketState::new();
        state.set_joystick_axis(1, 1, 300).unwrap();
        state.set_joystick_axis(1, 2, -300).unwrap();
        state.set_joystick_axis(1, 6, -5).unwrap();

        assert_eq!(state.joystick(1).unwrap().axes(), &[127, -128, 0, 0, 0, -5]);
    }

    #[test]
    fn joystick_indices_checked() {
        let mut state = PacketState::new();
        assert!(state.set_joystick_axis(0, 1, 0).is_err());
        assert!(state.set_joystick_axis(5, 1, 0).is_err());
        assert_eq!(
            state.set_joystick_axis(2, 7, 0),
            Err(ControlError::out_of_range("joystick axis", 7, 6))
        );
        assert!(state.set_joystick_button(1, 0, true).is_err());
        assert!(state.set_joystick_button(1, 17, true).is_err());
        assert!(state.set_joystick_button(5, 1, true).is_err());
        assert!(state.joystick(0).is_err());
        assert_eq!(state, PacketState::new());
    }

    #[test]
    fn button_round_trip() {
        let mut state = PacketState::new();
        for joystick in 1..=JOYSTICK_COUNT {
            for button in 1..=BUTTON_COUNT {
                state.set_joystick_button(joystick, button, true).unwrap();
                assert!(state.joystick(joystick).unwrap().button(button));
                state.set_joystick_button(joystick, button, false).unwrap();
                assert!(!state.joystick(joystick).unwrap().button(button));
            }
        }

        state.set_joystick_button(2, 16, true).unwrap();
        state.set_joystick_button(2, 1, true).unwrap();
        assert_eq!(state.joystick(2).unwrap().buttons(), 0x8001);
        assert_eq!(state.joystick(1).unwrap().buttons(), 0);
    }

    #[test]
    fn out_of_range_positions_use_station_one() {
        let mut state = PacketState::new();
        for position in [-1, 0, 7, 258, 513, i32::MIN, i32::MAX].iter() {
            state.set_position(3);
            state.set_position(*position);
            assert_eq!(state.position(), Position::One);
        }

        state.set_position(2);
        assert_eq!(state.position(), Position::Two);
        state.set_position(3);
        assert_eq!(state.position(), Position::Three);
    }

    #[test]
    fn setters_are_idempotent() {
        let mut once = PacketState::new();
        once.set_enabled(true);
        once.set_joystick_button(3, 4, true).unwrap();

        let mut twice = once;
        twice.set_enabled(true);
        twice.set_joystick_button(3, 4, true).unwrap();

        assert_eq!(once, twice);
    }
}
