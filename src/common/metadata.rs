use std::ops::Not;

use super::error::QRError;

// Color of a module
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ECLevel {
    L,
    M,
    Q,
    H,
}

impl ECLevel {
    // 2-bit code embedded in the format info
    pub fn format_bits(self) -> u16 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl TryFrom<i32> for ECLevel {
    type Error = QRError;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}


// Version 1 geometry & capacity
//------------------------------------------------------------------------------

pub const MATRIX_SIZE: usize = 21;

pub const GRID_SIZE: usize = MATRIX_SIZE * MATRIX_SIZE;

// Codeword layout for the single level-L block
pub const DATA_CODEWORDS: usize = 19;
pub const EC_CODEWORDS: usize = 7;
pub const TOTAL_CODEWORDS: usize = DATA_CODEWORDS + EC_CODEWORDS;

pub const MAX_INPUT_LEN: usize = 24;

pub const MODE_INDICATOR: u8 = 0b0010;
pub const MODE_BITS: usize = 4;
pub const CHAR_COUNT_BITS: usize = 9;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

// Format info strips, most significant bit first. Bits 0-5 and 8-14 are
// mirrored between the two strips, bits 6 and 7 live in shared cells.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 7),
    (8, 20),
    (8, 19),
    (8, 18),
    (8, 17),
    (8, 16),
    (8, 15),
    (8, 14),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (7, 8),
    (8, 7),
    (20, 8),
    (19, 8),
    (18, 8),
    (17, 8),
    (16, 8),
    (15, 8),
    (14, 8),
];
