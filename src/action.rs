/// Actions keyberon hands back to the firmware instead of reporting a keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomAction {
    /// Toggle caps word, see [`crate::caps_word::CapsWord`].
    CapsWordToggle,
}

pub type Action = keyberon::action::Action<CustomAction>;
