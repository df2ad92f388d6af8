use std::ops::Deref;

use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, FORMAT_INFO_BIT_LEN};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        debug_assert!(*self < 8, "Invalid pattern");

        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }
}

// Format info
//------------------------------------------------------------------------------

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u16 = 0b10100110111;

const FORMAT_MASK: u16 = 0b101010000010010;

pub fn generate_format_info(ecl: ECLevel, pattern: MaskPattern) -> u16 {
    let format = (ecl.format_bits() << 3) | *pattern as u16;
    apply_bch_correction(format) ^ FORMAT_MASK
}

// Checked front door for raw indices, used at the public boundary
pub fn calculate_format_bits(ec_level: i32, pattern: u8) -> QRResult<u16> {
    let ecl = ECLevel::try_from(ec_level)?;
    if pattern >= 8 {
        return Err(QRError::InvalidMaskingPattern);
    }
    Ok(generate_format_info(ecl, MaskPattern::new(pattern)))
}

// Appends the 10-bit BCH remainder of the 5 format bits against the
// format generator polynomial
fn apply_bch_correction(format: u16) -> u16 {
    let mut rem = format << 10;
    for i in (10..FORMAT_INFO_BIT_LEN).rev() {
        if rem & (1 << i) != 0 {
            rem ^= FORMAT_GENERATOR << (i - 10);
        }
    }
    (format << 10) | rem
}
