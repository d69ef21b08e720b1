//! Button pin vocabulary
//!
//! The physical pin is any `embedded_hal::digital::InputPin` that also
//! implements `embedded_hal_async::digital::Wait`; this module only names the
//! edges and levels exchanged between the pin and the loopback core.

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// A transition observed on an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High → low. On the active-low button: pressed.
    Falling,
    /// Low → high. On the active-low button: released.
    Rising,
}

impl Edge {
    /// Level the pin settles at after this edge.
    pub fn level_after(self) -> PinState {
        match self {
            Self::Falling => PinState::Low,
            Self::Rising => PinState::High,
        }
    }

    /// Edge that leads to `level`.
    pub fn into_level(level: PinState) -> Self {
        match level {
            PinState::Low => Self::Falling,
            PinState::High => Self::Rising,
        }
    }

    /// Short static name (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Falling => "falling",
            Self::Rising => "rising",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_levels_correspond() {
        for edge in [Edge::Falling, Edge::Rising] {
            assert_eq!(Edge::into_level(edge.level_after()), edge);
        }
    }
}
