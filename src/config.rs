use keyberon::action::HoldTapConfig;

// One tick is one millisecond, the firmware scans on a 1 kHz timer.

/// Ticks a hold-tap key must be held before it counts as held.
pub const TAPPING_TERM: u16 = 200;
/// A hold-tap only resolves as hold after `TAPPING_TERM`, other key presses
/// in the meantime are queued.
pub const HOLD_TAP_CONFIG: HoldTapConfig = HoldTapConfig::Default;
pub const DEBOUNCE_TICKS: u16 = 5;
pub const CAPS_WORD_IDLE_TIMEOUT: u16 = 5_000;

pub const HALF_COLS: usize = 5;
pub const COLS: usize = 2 * HALF_COLS;
pub const ROWS: usize = 4;
pub const LAYER_COUNT: usize = 6;

pub const SPLIT_BAUD_RATE: u32 = 115_200;

// same identity as the QMK crkbd build, so host side remaps keep working
pub const USB_VID: u16 = 0x4653;
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "foostan";
pub const USB_PRODUCT: &str = "Corne";

pub const INDICATOR_BRIGHTNESS: u8 = 32;

/// Reports waiting for the USB endpoint. A tap lasts a single tick, which is
/// shorter than the HID polling interval, so reports queue up behind it.
pub const REPORT_QUEUE_LEN: usize = 8;
