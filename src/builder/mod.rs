pub mod qr;

use crate::common::bitstream::BitStream;
use crate::common::codec::{encode_alphanumeric, pad_remaining_capacity, push_terminator};
use crate::common::ec::ecc;
use crate::common::error::QRResult;
use crate::common::mask::{generate_format_info, MaskPattern};
use crate::common::metadata::{ECLevel, EC_CODEWORDS, TOTAL_CODEWORDS};

use self::qr::QR;

// QR builder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    text: &'a str,
    ec_level: ECLevel,
    mask: MaskPattern,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, ec_level: ECLevel::L, mask: MaskPattern::new(7) }
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = mask;
        self
    }

    pub fn build(&self) -> QRResult<QR> {
        let payload = compute_payload(self.text)?;

        let mut qr = QR::new(self.ec_level);
        qr.stamp_function_patterns();
        qr.place_payload(payload);

        let mut masked = qr.masked(self.mask);
        masked.draw_format_info(generate_format_info(self.ec_level, self.mask));

        Ok(masked)
    }
}

// Encodes the text, terminates and pads it to the data capacity, then
// appends the error correction codewords
fn compute_payload(text: &str) -> QRResult<BitStream> {
    let mut data = encode_alphanumeric(text)?;
    push_terminator(&mut data);
    pad_remaining_capacity(&mut data);

    let ecc = ecc(data.data(), EC_CODEWORDS);

    let mut payload = BitStream::new(TOTAL_CODEWORDS << 3);
    payload.extend(data.data());
    payload.extend(&ecc);
    Ok(payload)
}

pub fn generate(text: &str) -> QRResult<QR> {
    QRBuilder::new(text).build()
}
