//! Link between the two halves.
//!
//! Each half scans its own matrix and sends every debounced event to the
//! other half over the UART, so both halves run the full layout and the one
//! plugged into USB reports it.

use keyberon::layout::Event;

use crate::config::{COLS, ROWS};

const PRESS: u8 = b'P';
const RELEASE: u8 = b'R';
const END: u8 = b'\n';

pub const FRAME_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    Left,
    Right,
}

impl Half {
    /// Maps an event from this half's matrix to the keymap grid.
    ///
    /// The PCB is reversible, so the right half's matrix is mirrored.
    pub fn to_global(self, event: Event) -> Event {
        let mirror = |col: u8| COLS as u8 - 1 - col;
        match (self, event) {
            (Half::Left, event) => event,
            (Half::Right, Event::Press(row, col)) => Event::Press(row, mirror(col)),
            (Half::Right, Event::Release(row, col)) => Event::Release(row, mirror(col)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[error("frame of {0} bytes, expected {expected}", expected = FRAME_LEN)]
    Length(usize),
    #[error("unknown event kind {0:#04x}")]
    Kind(u8),
    #[error("key ({0}, {1}) is outside the matrix")]
    Position(u8, u8),
    #[error("frame is not terminated")]
    Unterminated,
}

pub fn ser(event: Event) -> [u8; FRAME_LEN] {
    match event {
        Event::Press(row, col) => [PRESS, row, col, END],
        Event::Release(row, col) => [RELEASE, row, col, END],
    }
}

pub fn de(frame: &[u8]) -> Result<Event, FrameError> {
    match *frame {
        [kind, row, col, END] => {
            let event = match kind {
                PRESS => Event::Press(row, col),
                RELEASE => Event::Release(row, col),
                kind => return Err(FrameError::Kind(kind)),
            };
            if usize::from(row) < ROWS && usize::from(col) < COLS {
                Ok(event)
            } else {
                Err(FrameError::Position(row, col))
            }
        }
        [_, _, _, _] => Err(FrameError::Unterminated),
        _ => Err(FrameError::Length(frame.len())),
    }
}

/// Reassembles frames from the UART byte stream.
///
/// Row and column never reach the terminator's value, so a terminator always
/// ends a frame. Bytes in front of a frame are line noise and are dropped.
#[derive(Debug, Default)]
pub struct Decoder {
    window: [u8; FRAME_LEN],
    count: usize,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            window: [0; FRAME_LEN],
            count: 0,
        }
    }

    pub fn push(&mut self, byte: u8) -> Result<Option<Event>, FrameError> {
        self.window.rotate_left(1);
        self.window[FRAME_LEN - 1] = byte;
        self.count = self.count.saturating_add(1);
        if byte != END {
            return Ok(None);
        }
        match core::mem::take(&mut self.count) {
            count if count < FRAME_LEN => Err(FrameError::Length(count)),
            _ => de(&self.window).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut Decoder, bytes: &[u8]) -> Vec<Result<Option<Event>, FrameError>> {
        bytes.iter().map(|&b| decoder.push(b)).collect()
    }

    fn events(results: &[Result<Option<Event>, FrameError>]) -> Vec<Event> {
        results.iter().filter_map(|r| r.ok().flatten()).collect()
    }

    #[test]
    fn left_half_is_unchanged() {
        assert_eq!(Half::Left.to_global(Event::Press(1, 4)), Event::Press(1, 4));
    }

    #[test]
    fn right_half_is_mirrored() {
        assert_eq!(Half::Right.to_global(Event::Press(0, 0)), Event::Press(0, 9));
        assert_eq!(Half::Right.to_global(Event::Release(2, 4)), Event::Release(2, 5));
        // the innermost thumb of both halves sits next to the split
        assert_eq!(Half::Right.to_global(Event::Press(3, 4)), Event::Press(3, 5));
        assert_eq!(Half::Left.to_global(Event::Press(3, 4)), Event::Press(3, 4));
    }

    #[test]
    fn frame_layout() {
        assert_eq!(ser(Event::Press(3, 7)), [b'P', 3, 7, b'\n']);
        assert_eq!(ser(Event::Release(0, 9)), [b'R', 0, 9, b'\n']);
    }

    #[test]
    fn de_reads_what_ser_writes() {
        for event in [Event::Press(2, 5), Event::Release(3, 2)] {
            assert_eq!(de(&ser(event)), Ok(event));
        }
    }

    #[test]
    fn de_rejects_bad_frames() {
        assert_eq!(de(b"X12\n"), Err(FrameError::Kind(b'X')));
        assert_eq!(de(b"P12x"), Err(FrameError::Unterminated));
        assert_eq!(de(b"P\n"), Err(FrameError::Length(2)));
    }

    #[test]
    fn de_rejects_keys_outside_the_matrix() {
        assert_eq!(de(&[b'P', 4, 0, b'\n']), Err(FrameError::Position(4, 0)));
        assert_eq!(de(&[b'R', 0, 10, b'\n']), Err(FrameError::Position(0, 10)));
        assert_eq!(de(&[b'P', 3, 9, b'\n']), Ok(Event::Press(3, 9)));
    }

    #[test]
    fn length_error_names_the_frame_size() {
        let message = FrameError::Length(2).to_string();
        assert!(message.ends_with(&format!("expected {}", FRAME_LEN)));
    }

    #[test]
    fn decoder_reads_back_to_back_frames() {
        let mut decoder = Decoder::new();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&ser(Event::Press(1, 1)));
        bytes.extend_from_slice(&ser(Event::Release(1, 1)));
        let results = feed(&mut decoder, &bytes);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(
            events(&results),
            [Event::Press(1, 1), Event::Release(1, 1)]
        );
    }

    #[test]
    fn decoder_drops_noise_in_front_of_a_frame() {
        let mut decoder = Decoder::new();
        let mut bytes = b"\x00\x01".to_vec();
        bytes.extend_from_slice(&ser(Event::Press(0, 3)));
        let results = feed(&mut decoder, &bytes);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(events(&results), [Event::Press(0, 3)]);
    }

    #[test]
    fn decoder_reports_short_frames() {
        let mut decoder = Decoder::new();
        let results = feed(&mut decoder, b"P\n");
        assert_eq!(results[1], Err(FrameError::Length(2)));
        let results = feed(&mut decoder, &ser(Event::Release(2, 2)));
        assert_eq!(events(&results), [Event::Release(2, 2)]);
    }

    #[test]
    fn decoder_reports_unknown_kinds() {
        let mut decoder = Decoder::new();
        let results = feed(&mut decoder, b"X12\n");
        assert_eq!(results[3], Err(FrameError::Kind(b'X')));
    }

    #[test]
    fn decoder_drops_frames_outside_the_matrix() {
        let mut decoder = Decoder::new();
        let results = feed(&mut decoder, &[b'P', 200, 7, b'\n']);
        assert_eq!(results[3], Err(FrameError::Position(200, 7)));
        let results = feed(&mut decoder, &ser(Event::Press(1, 2)));
        assert_eq!(events(&results), [Event::Press(1, 2)]);
    }
}
