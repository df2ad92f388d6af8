use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{
    CHAR_COUNT_BITS, DATA_CODEWORDS, MAX_INPUT_LEN, MODE_BITS, MODE_INDICATOR,
};

// Alphanumeric codec
//------------------------------------------------------------------------------

pub const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

// Ordinal of each byte in the charset, 255 marks bytes outside it
static CHAR_ORDINALS: [u8; 256] = build_ordinal_table();

const fn build_ordinal_table() -> [u8; 256] {
    let mut table = [255u8; 256];
    let mut i = 0;
    while i < ALPHANUMERIC_CHARSET.len() {
        table[ALPHANUMERIC_CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

// Lowercase letters map onto their uppercase ordinals
pub fn ordinal(c: u8) -> QRResult<u16> {
    match CHAR_ORDINALS[c.to_ascii_uppercase() as usize] {
        255 => Err(QRError::InvalidChar),
        v => Ok(v as u16),
    }
}

pub fn validate(text: &str) -> QRResult<()> {
    if text.is_empty() {
        return Err(QRError::EmptyData);
    }
    if text.len() > MAX_INPUT_LEN {
        return Err(QRError::DataTooLong);
    }
    for c in text.bytes() {
        ordinal(c)?;
    }
    Ok(())
}

// Encodes text as a single alphanumeric segment: mode indicator, character
// count indicator, 11-bit character pairs and a 6-bit trailing character
// when the length is odd
pub fn encode_alphanumeric(text: &str) -> QRResult<BitStream> {
    validate(text)?;

    let mut bs = BitStream::new(DATA_CODEWORDS << 3);
    bs.push_bits(MODE_INDICATOR, MODE_BITS);
    bs.push_bits(text.len() as u16, CHAR_COUNT_BITS);

    let mut chunks = text.as_bytes().chunks_exact(2);
    for pair in chunks.by_ref() {
        let value = ordinal(pair[0])? * 45 + ordinal(pair[1])?;
        bs.push_bits(value, 11);
    }
    if let [c] = chunks.remainder() {
        bs.push_bits(ordinal(*c)?, 6);
    }

    Ok(bs)
}

// Terminator & padding
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0b11101100, 0b00010001];

// Four-bit terminator, truncated when fewer bits of capacity remain
pub fn push_terminator(bs: &mut BitStream) {
    let remaining = bs.capacity() - bs.len();
    bs.push_bits(0u8, remaining.min(4));
}

pub fn pad_remaining_capacity(bs: &mut BitStream) {
    // Zero-fill up to the next codeword boundary
    let offset = bs.len() & 7;
    if offset != 0 {
        bs.push_bits(0u8, 8 - offset);
    }

    // Alternating padding codewords up to the data capacity
    let mut i = 0;
    while bs.len() < bs.capacity() {
        bs.push_bits(PADDING_CODEWORDS[i & 1], 8);
        i += 1;
    }
}
