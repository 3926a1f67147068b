use failure::Fail;

/// Errors raised when updating the outgoing control state
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ControlError {
    /// A channel, joystick, axis or button index fell outside its domain.
    /// The state is left untouched when this is returned.
    #[fail(display = "{} {} is out of range (expected 1..={})", field, index, max)]
    OutOfRange {
        field: &'static str,
        index: usize,
        max: usize,
    },
    /// A packet index that doesn't fit in the 16 bit sequence field
    #[fail(display = "packet index {} cannot be represented on the wire", index)]
    InvariantViolation { index: u32 },
}

impl ControlError {
    pub(crate) fn out_of_range(field: &'static str, index: usize, max: usize) -> ControlError {
        ControlError::OutOfRange { field, index, max }
    }
}
