use crkbd::config::{HALF_COLS, ROWS};
use keyberon::matrix::Matrix;
use sparkfun_pro_micro_rp2040::hal::gpio::{DynPin, Error};

// refer to this: https://cdn.sparkfun.com/assets/e/2/7/6/b/ProMicroRP2040_Graphical_Datasheet.pdf
// for the pin definitions

/// One half of the Corne, both halves are wired the same way.
pub type HalfMatrix = Matrix<DynPin, DynPin, HALF_COLS, ROWS>;

/// Pins of one half in matrix order, the outer column first.
pub struct MatrixPins {
    pub cols: [DynPin; HALF_COLS],
    pub rows: [DynPin; ROWS],
}

// Columns are read through pull-ups while the scanned row is driven low.
pub fn init_matrix(mut pins: MatrixPins) -> Result<HalfMatrix, Error> {
    for col in pins.cols.iter_mut() {
        col.into_pull_up_input();
    }
    for row in pins.rows.iter_mut() {
        row.into_push_pull_output();
    }
    Matrix::new(pins.cols, pins.rows)
}
