//! The keymap table.
//!
//! Heavily based on [Miryoku](https://github.com/manna-harbour/miryoku), with
//! the home row modifiers in Shift/Control/Alt/Gui order (outer to inner) to
//! match macOS keyboards, and without the mouse and button layers.
//!
//! Grid positions are `[row][col]`, columns 0..=4 are the left half and
//! 5..=9 the right half. The thumb keys live in row 3, columns 2..=7.

use keyberon::action::Action::{Custom, HoldTap, NoOp};
use keyberon::action::{k, l, m, HoldTapAction};
use keyberon::key_code::KeyCode::*;

use crate::action::{Action, CustomAction};
use crate::config::{COLS, HOLD_TAP_CONFIG, LAYER_COUNT, ROWS, TAPPING_TERM};

pub type Layers = keyberon::layout::Layers<COLS, ROWS, LAYER_COUNT, CustomAction>;
pub type Layout = keyberon::layout::Layout<COLS, ROWS, LAYER_COUNT, CustomAction>;

pub const BASE: usize = 0;
/// Right hand: media keys, held from the outer left thumb.
pub const MEDIA: usize = 1;
/// Right hand: arrows and paging, held from the middle left thumb.
pub const NAV: usize = 2;
/// Left hand: shifted symbols, held from the inner right thumb.
pub const SYM: usize = 3;
/// Left hand: numpad style digits, held from the middle right thumb.
pub const NUM: usize = 4;
/// Left hand: function keys, held from the outer right thumb.
pub const FUN: usize = 5;

/// Positions with a switch behind them.
#[rustfmt::skip]
pub const WIRED: [[bool; COLS]; ROWS] = [
    [true;  COLS],
    [true;  COLS],
    [true;  COLS],
    [false, false, true, true, true, true, true, true, false, false],
];

pub fn layout() -> Layout {
    Layout::new(&LAYERS)
}

macro_rules! hold_tap {
    ($hold:expr, $tap:expr) => {
        HoldTap(&HoldTapAction {
            timeout: TAPPING_TERM,
            hold: $hold,
            tap: $tap,
            config: HOLD_TAP_CONFIG,
            tap_hold_interval: 0,
        })
    };
}

/// When held: Left Shift
macro_rules! ls {
    ($kc:ident) => {
        hold_tap!(k(LShift), k($kc))
    };
}
/// When held: Left Control
macro_rules! lc {
    ($kc:ident) => {
        hold_tap!(k(LCtrl), k($kc))
    };
}
/// When held: Left Gui/Command
macro_rules! lg {
    ($kc:ident) => {
        hold_tap!(k(LGui), k($kc))
    };
}
/// When held: Right Shift
macro_rules! rs {
    ($kc:ident) => {
        hold_tap!(k(RShift), k($kc))
    };
}
/// When held: Right Control
macro_rules! rc {
    ($kc:ident) => {
        hold_tap!(k(RCtrl), k($kc))
    };
}
/// When held: Right Gui/Command
macro_rules! rg {
    ($kc:ident) => {
        hold_tap!(k(RGui), k($kc))
    };
}

// Left and right Alt are not interchangeable (AltGr), and both have to be
// reachable from either hand on every layer. Left Alt is the main one under
// the middle finger and AltGr sits below it, hence no L/R prefix.

/// When held: Left Alt/Option
macro_rules! alt {
    ($kc:ident) => {
        hold_tap!(k(LAlt), k($kc))
    };
}
/// When held: Right Alt/Option, aka AltGr
macro_rules! agr {
    ($kc:ident) => {
        hold_tap!(k(RAlt), k($kc))
    };
}
/// When held: activates `$layer`
macro_rules! lt {
    ($layer:expr, $kc:ident) => {
        hold_tap!(l($layer), k($kc))
    };
}

const LCBR: Action = m(&[LShift, LBracket].as_slice());
const RCBR: Action = m(&[LShift, RBracket].as_slice());
const LPRN: Action = m(&[LShift, Kb9].as_slice());
const RPRN: Action = m(&[LShift, Kb0].as_slice());
const AMPR: Action = m(&[LShift, Kb7].as_slice());
const ASTR: Action = m(&[LShift, Kb8].as_slice());
const COLN: Action = m(&[LShift, SColon].as_slice());
const DLR: Action = m(&[LShift, Kb4].as_slice());
const PERC: Action = m(&[LShift, Kb5].as_slice());
const CIRC: Action = m(&[LShift, Kb6].as_slice());
const PLUS: Action = m(&[LShift, Equal].as_slice());
const TILD: Action = m(&[LShift, Grave].as_slice());
const EXLM: Action = m(&[LShift, Kb1].as_slice());
const AT: Action = m(&[LShift, Kb2].as_slice());
const HASH: Action = m(&[LShift, Kb3].as_slice());
const PIPE: Action = m(&[LShift, Bslash].as_slice());
const UNDS: Action = m(&[LShift, Minus].as_slice());

// The keyboard usage page has no display brightness, macOS binds F14/F15 to it.
const BRID: Action = k(F14);
const BRIU: Action = k(F15);

const CW_TOGG: Action = Custom(CustomAction::CapsWordToggle);

#[rustfmt::skip]
pub static LAYERS: Layers = [
    // Base
    [
        [k(Q),   k(W),   k(F),    k(P),   k(B),   k(J), k(L),   k(U),        k(Y),   k(Quote)],
        [ls!(A), lc!(R), alt!(S), lg!(T), k(G),   k(M), rg!(N), alt!(E),     rc!(I), rs!(O)  ],
        [k(Z),   k(X),   agr!(C), k(D),   k(V),   k(K), k(H),   agr!(Comma), k(Dot), k(Slash)],
        [NoOp,   NoOp,
                 lt!(MEDIA, Escape), lt!(NAV, Space), k(Tab),
                 lt!(SYM, BSpace), lt!(NUM, Enter), lt!(FUN, Escape),
                                                                                     NoOp,   NoOp    ],
    ],
    // Media, the RGB row is gone and Bluetooth is replaced by screen brightness.
    // MediaStop only works on Windows and Linux.
    [
        [NoOp,      NoOp,     NoOp,     NoOp,     NoOp,   NoOp,          NoOp,                 NoOp,              NoOp,            NoOp              ],
        [k(LShift), k(LCtrl), k(LAlt),  k(LGui),  NoOp,   NoOp,          k(MediaPreviousSong), k(MediaVolDown),   k(MediaVolUp),   k(MediaNextSong)  ],
        [NoOp,      NoOp,     k(RAlt),  NoOp,     NoOp,   NoOp,          NoOp,                 BRID,              BRIU,            NoOp              ],
        [NoOp,      NoOp,     NoOp,     NoOp,     NoOp,   k(MediaStop),  k(MediaPlayPause),    k(MediaMute),      NoOp,            NoOp              ],
    ],
    // Navigation, without the top row (Linux only keys).
    [
        [NoOp,      NoOp,     NoOp,     NoOp,     NoOp,   NoOp,          NoOp,       NoOp,        NoOp,      NoOp    ],
        [k(LShift), k(LCtrl), k(LAlt),  k(LGui),  NoOp,   k(CapsLock),   k(Left),    k(Down),     k(Up),     k(Right)],
        [NoOp,      NoOp,     k(RAlt),  NoOp,     NoOp,   NoOp,          k(Home),    k(PgDown),   k(PgUp),   k(End)  ],
        [NoOp,      NoOp,     NoOp,     NoOp,     NoOp,   k(BSpace),     k(Enter),   CW_TOGG,     NoOp,      NoOp    ],
    ],
    // Symbols
    [
        [LCBR,      AMPR,     ASTR,     LPRN,     RCBR,       NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
        [COLN,      DLR,      PERC,     CIRC,     PLUS,       NoOp,   k(RGui),   k(LAlt),   k(RCtrl),   k(RShift)],
        [TILD,      EXLM,     AT,       HASH,     PIPE,       NoOp,   NoOp,      k(RAlt),   NoOp,       NoOp     ],
        [NoOp,      NoOp,     LPRN,     RPRN,     UNDS,       NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
    ],
    // Numbers
    [
        [k(LBracket), k(Kb7), k(Kb8),   k(Kb9),   k(RBracket),  NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
        [k(SColon),   k(Kb4), k(Kb5),   k(Kb6),   k(Equal),     NoOp,   k(RGui),   k(LAlt),   k(RCtrl),   k(RShift)],
        [k(Grave),    k(Kb1), k(Kb2),   k(Kb3),   k(Bslash),    NoOp,   NoOp,      k(RAlt),   NoOp,       NoOp     ],
        [NoOp,        NoOp,   k(Dot),   k(Kb0),   k(Minus),     NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
    ],
    // Functions, without Scroll Lock, Pause and App.
    [
        [k(F12),    k(F7),    k(F8),    k(F9),    k(PScreen),   NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
        [k(F11),    k(F4),    k(F5),    k(F6),    NoOp,         NoOp,   k(RGui),   k(LAlt),   k(RCtrl),   k(RShift)],
        [k(F10),    k(F1),    k(F2),    k(F3),    NoOp,         NoOp,   NoOp,      k(RAlt),   NoOp,       NoOp     ],
        [NoOp,      NoOp,     k(Dot),   k(Space), k(Tab),       NoOp,   NoOp,      NoOp,      NoOp,       NoOp     ],
    ],
];
