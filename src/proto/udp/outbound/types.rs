//! Wire-level types that make up the outbound control packet

/// bitflag struct for the control byte of the packet
bitflags! {
    pub struct Control: u8 {
        const ESTOP = 0b0000_0010;
        const ENABLED = 0b0000_0100;

        // Mode flags, never both set
        const AUTO = 0b0000_1000;
        const TEST = 0b0100_0000;
    }
}

/// bitflags for the eight digital output channels
bitflags! {
    pub struct DigitalOutputs: u8 {
        const DIO_1 = 0b0000_0001;
        const DIO_2 = 0b0000_0010;
        const DIO_3 = 0b0000_0100;
        const DIO_4 = 0b0000_1000;
        const DIO_5 = 0b0001_0000;
        const DIO_6 = 0b0010_0000;
        const DIO_7 = 0b0100_0000;
        const DIO_8 = 0b1000_0000;
    }
}

impl DigitalOutputs {
    /// Returns the flag for the 1-indexed `channel`, or `None` if there is no such channel
    pub fn channel(channel: usize) -> Option<DigitalOutputs> {
        match channel {
            1..=8 => DigitalOutputs::from_bits(1 << (channel - 1)),
            _ => None,
        }
    }
}

/// The alliance that the robot is competing for
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    /// The byte written to the wire for this alliance, an ASCII `R` or `B`
    pub fn code(self) -> u8 {
        match self {
            Alliance::Red => b'R',
            Alliance::Blue => b'B',
        }
    }
}

/// The driver station slot within an alliance
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    One,
    Two,
    Three,
}

impl Position {
    /// Converts a station number into a `Position`.
    ///
    /// The legacy protocol is tolerant of bad station numbers, anything other than 2 or 3 is
    /// treated as station 1.
    pub fn from_number(number: i32) -> Position {
        match number {
            2 => Position::Two,
            3 => Position::Three,
            _ => Position::One,
        }
    }

    /// Returns the station number for `self`
    pub fn number(self) -> u8 {
        match self {
            Position::One => 1,
            Position::Two => 2,
            Position::Three => 3,
        }
    }

    /// The byte written to the wire for this position, the ASCII digit `0`, `1` or `2`
    pub fn code(self) -> u8 {
        b'0' + self.number() - 1
    }
}

/// Lowest value an analog output can hold
pub const ANALOG_MIN: i32 = 0;
/// Highest value an analog output can hold
pub const ANALOG_MAX: i32 = 1023;

/// Number of axes carried per joystick
pub const AXIS_COUNT: usize = 6;
/// Number of buttons carried per joystick
pub const BUTTON_COUNT: usize = 16;

/// Axis and button values for a single joystick
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Joystick {
    pub(crate) axes: [i8; AXIS_COUNT],
    pub(crate) buttons: u16,
}

impl Joystick {
    /// A joystick with all axes centered and no buttons pressed
    pub const NEUTRAL: Joystick = Joystick {
        axes: [0; AXIS_COUNT],
        buttons: 0,
    };

    /// Returns the stored value of each axis
    pub fn axes(&self) -> &[i8; AXIS_COUNT] {
        &self.axes
    }

    /// Returns the button bitfield, button `n` is bit `n - 1`
    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    /// Returns whether the 1-indexed `button` is pressed.
    /// Buttons that don't exist are never pressed
    pub fn button(&self, button: usize) -> bool {
        match button {
            1..=BUTTON_COUNT => self.buttons & (1 << (button - 1)) != 0,
            _ => false,
        }
    }
}
