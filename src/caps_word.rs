//! Caps word: shift letters until something that is not part of a word is
//! typed, a lighter alternative to caps lock for typing `SOME_CONSTANT`.

use keyberon::key_code::KeyCode;

use crate::config::CAPS_WORD_IDLE_TIMEOUT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    /// Sent shifted: letters, and minus so it becomes an underscore.
    Shifted,
    /// Continues the word but must not be shifted.
    Kept,
    /// Neither continues nor ends the word.
    Ignored,
    /// Ends the word.
    Breaks,
}

fn classify(kc: KeyCode) -> Class {
    use KeyCode::*;
    match kc {
        kc if (A as u8..=Z as u8).contains(&(kc as u8)) => Class::Shifted,
        Minus => Class::Shifted,
        kc if (Kb1 as u8..=Kb0 as u8).contains(&(kc as u8)) => Class::Kept,
        BSpace | Delete => Class::Kept,
        // AltGr picks a symbol layer on some host layouts
        LShift | RShift | RAlt => Class::Ignored,
        _ => Class::Breaks,
    }
}

fn is_shift(kc: KeyCode) -> bool {
    matches!(kc, KeyCode::LShift | KeyCode::RShift)
}

/// Set of keycodes, one bit per usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeySet([u32; 8]);

impl KeySet {
    fn insert(&mut self, kc: KeyCode) {
        let i = kc as u8;
        self.0[usize::from(i / 32)] |= 1 << (i % 32);
    }

    fn contains(&self, kc: KeyCode) -> bool {
        let i = kc as u8;
        self.0[usize::from(i / 32)] & (1 << (i % 32)) != 0
    }
}

#[derive(Debug, Default)]
pub struct CapsWord {
    active: bool,
    idle: u16,
    held: KeySet,
}

impl CapsWord {
    pub const fn new() -> Self {
        Self {
            active: false,
            idle: 0,
            held: KeySet([0; 8]),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
        self.idle = 0;
    }

    /// Feeds the keys reported for this tick and returns whether Left Shift
    /// has to be added to the report.
    ///
    /// Shift is only added when no held key would be corrupted by it, so a
    /// digit rolled over a letter is still sent as a digit. A key that only
    /// continues the word unshifted ends it when pressed with Shift held, as
    /// it then types a symbol: `[LShift, Kb9]` is `(`. Shifted Minus is `_`
    /// and continues.
    pub fn tick<I: IntoIterator<Item = KeyCode>>(&mut self, keys: I) -> bool {
        let mut now = KeySet::default();
        let mut pressed = false;
        let mut shifted = false;
        let mut kept = false;
        let mut shift_held = false;
        let mut new_kept = false;
        for kc in keys {
            now.insert(kc);
            let class = classify(kc);
            let new = !self.held.contains(kc);
            pressed |= new;
            shift_held |= is_shift(kc);
            match class {
                Class::Shifted => shifted = true,
                Class::Kept => {
                    kept = true;
                    new_kept |= new;
                }
                Class::Breaks if new => self.active = false,
                Class::Breaks | Class::Ignored => {}
            }
        }
        if shift_held && new_kept {
            self.active = false;
        }
        self.held = now;

        if !self.active {
            return false;
        }
        if pressed {
            self.idle = 0;
        } else {
            self.idle = self.idle.saturating_add(1);
            if self.idle >= CAPS_WORD_IDLE_TIMEOUT {
                self.active = false;
                return false;
            }
        }
        shifted && !kept
    }
}
