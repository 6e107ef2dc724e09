//! Keymap and firmware glue for a Corne (crkbd) split keyboard in its
//! `split_3x5_3` form, built on keyberon.
//!
//! The library is `no_std` so the same table is compiled into the firmware
//! and exercised by host tests against keyberon's layout engine.
#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod caps_word;
pub mod config;
pub mod indicator;
pub mod keymap;
pub mod layout;
pub mod report;
pub mod split;
