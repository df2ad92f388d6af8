use image::{GrayImage, Luma};

use crate::common::bitstream::BitStream;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{
    Color, ECLevel, FORMAT_INFO_BIT_LEN, FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE,
    GRID_SIZE, MATRIX_SIZE,
};

// QR matrix
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Box<[Color; GRID_SIZE]>,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

impl QR {
    pub fn new(ecl: ECLevel) -> Self {
        Self { grid: Box::new([Color::Light; GRID_SIZE]), ecl, mask: None }
    }

    pub fn width(&self) -> usize {
        MATRIX_SIZE
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Color::Dark).count()
    }

    fn coord_to_index(r: i16, c: i16) -> usize {
        let w = MATRIX_SIZE as i16;
        debug_assert!(0 <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(0 <= c && c < w, "Column out of bounds: {c}");
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        self.grid[Self::coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, clr: Color) {
        self.grid[Self::coord_to_index(r, c)] = clr;
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = MATRIX_SIZE as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                res.push(self.get(i, j).select('#', '.'));
            }
            res.push('\n');
        }
        res
    }
}

// Reserved area
//------------------------------------------------------------------------------

impl QR {
    // Cells no data or mask bit may touch: the finder corners with their
    // bands, the timing row and column, and the two format info strips.
    // Shared verbatim by placement and masking.
    pub fn is_reserved(r: i16, c: i16) -> bool {
        let w = MATRIX_SIZE as i16;
        (r <= 7 && c <= 7)
            || (r <= 7 && c >= w - 8)
            || (r >= w - 8 && c <= 7)
            || r == 6
            || c == 6
            || (r == 8 && (c <= 7 || c >= 12))
            || (c == 8 && (r <= 7 || r >= 12))
    }
}

#[cfg(test)]
mod reserved_area_tests {
    use super::{QR, MATRIX_SIZE};

    #[test]
    fn test_reserved_cell_count() {
        let w = MATRIX_SIZE as i16;
        let reserved =
            (0..w).flat_map(|r| (0..w).map(move |c| (r, c))).filter(|&(r, c)| QR::is_reserved(r, c));
        assert_eq!(reserved.count(), 234);
    }

    #[test]
    fn test_format_strips_reserved() {
        for i in 0..6 {
            assert!(QR::is_reserved(i, 8));
            assert!(QR::is_reserved(8, i));
        }
        assert!(QR::is_reserved(7, 8));
        assert!(QR::is_reserved(8, 7));
        for i in 14..=20 {
            assert!(QR::is_reserved(8, i));
            assert!(QR::is_reserved(i, 8));
        }
        // Cell between the strips carries data
        assert!(!QR::is_reserved(8, 8));
        assert!(!QR::is_reserved(8, 9));
        assert!(!QR::is_reserved(9, 8));
    }
}

// Finder & timing patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn stamp_function_patterns(&mut self) {
        self.stamp_finder_pattern_at(0, 0);
        self.stamp_finder_pattern_at(0, 14);
        self.stamp_finder_pattern_at(14, 0);
        self.stamp_timing_patterns();
    }

    // Glyph plus a light border four modules past it, clipped to bounds
    fn stamp_finder_pattern_at(&mut self, top: i16, left: i16) {
        let w = MATRIX_SIZE as i16;
        for r in top - 4..top + 11 {
            for c in left - 4..left + 11 {
                if r < 0 || r >= w || c < 0 || c >= w {
                    continue;
                }
                if (top..top + 7).contains(&r) && (left..left + 7).contains(&c) {
                    continue;
                }
                self.set(r, c, Color::Light);
            }
        }
        self.stamp_finder_glyph_at(top, left);
    }

    // 7x7 ring of dark modules around a 3x3 dark center
    fn stamp_finder_glyph_at(&mut self, top: i16, left: i16) {
        for i in 0..7 {
            for j in 0..7 {
                let dark =
                    i == 0 || i == 6 || j == 0 || j == 6 || ((2..=4).contains(&i) && (2..=4).contains(&j));
                self.set(top + i, left + j, if dark { Color::Dark } else { Color::Light });
            }
        }
    }

    // Alternating modules on row 6 and column 6, dark at even indices
    fn stamp_timing_patterns(&mut self) {
        let w = MATRIX_SIZE as i16;
        for i in 8..=w - 9 {
            let clr = if i & 1 == 0 { Color::Dark } else { Color::Light };
            self.set(6, i, clr);
            self.set(i, 6, clr);
        }
    }

    // Drawn again after placement so wrap-around traversal can never leave a
    // structural cell overwritten. The light borders are not redrawn: border
    // cells outside the reserved area legally carry data.
    fn restamp_structural_patterns(&mut self) {
        self.stamp_finder_glyph_at(0, 0);
        self.stamp_finder_glyph_at(0, 14);
        self.stamp_finder_glyph_at(14, 0);
        self.stamp_timing_patterns();
    }
}


// Data placement
//------------------------------------------------------------------------------

impl QR {
    // Boustrophedon traversal in column pairs from the bottom-right: the
    // right column walks top to bottom, the left column bottom to top.
    // Column 0 is only ever visited as a right column.
    pub fn place_payload(&mut self, payload: BitStream) {
        let w = MATRIX_SIZE as i16;
        let mut bits = payload;
        let mut col = w - 1;
        while col >= 0 {
            for r in 0..w {
                self.place_bit(r, col, &mut bits);
            }
            if col >= 1 {
                for r in (0..w).rev() {
                    self.place_bit(r, col - 1, &mut bits);
                }
            }
            col -= 2;
        }
        self.restamp_structural_patterns();
    }

    // Cells past the end of the payload keep their light default; leftover
    // bits past the last free cell are dropped. Neither is an error.
    fn place_bit(&mut self, r: i16, c: i16, bits: &mut BitStream) {
        if Self::is_reserved(r, c) {
            return;
        }
        if let Some(bit) = bits.take() {
            self.set(r, c, if bit { Color::Dark } else { Color::Light });
        }
    }
}

#[cfg(test)]
mod placement_tests {
    use super::{Color, ECLevel, QR, MATRIX_SIZE};
    use crate::common::bitstream::BitStream;
    use crate::common::metadata::TOTAL_CODEWORDS;

    #[test]
    fn test_placement_fills_every_free_cell() {
        let mut payload = BitStream::new(TOTAL_CODEWORDS << 3);
        payload.extend(&[0xFF; TOTAL_CODEWORDS]);

        let mut qr = QR::new(ECLevel::L);
        qr.stamp_function_patterns();
        let stamped = qr.clone();
        qr.place_payload(payload);

        let w = MATRIX_SIZE as i16;
        for r in 0..w {
            for c in 0..w {
                if QR::is_reserved(r, c) {
                    assert_eq!(qr.get(r, c), stamped.get(r, c), "reserved cell ({r}, {c})");
                } else {
                    assert_eq!(qr.get(r, c), Color::Dark, "free cell ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_placement_with_short_payload() {
        // A single dark byte fills the first eight free cells of the
        // rightmost column, every other free cell keeps its light default
        let mut payload = BitStream::new(TOTAL_CODEWORDS << 3);
        payload.extend(&[0xFF]);

        let mut qr = QR::new(ECLevel::L);
        qr.stamp_function_patterns();
        qr.place_payload(payload);

        let dark_free = (0..MATRIX_SIZE as i16)
            .flat_map(|r| (0..MATRIX_SIZE as i16).map(move |c| (r, c)))
            .filter(|&(r, c)| !QR::is_reserved(r, c) && qr.get(r, c) == Color::Dark)
            .collect::<Vec<_>>();
        let expected = (9..17).map(|r| (r, 20)).collect::<Vec<_>>();
        assert_eq!(dark_free, expected);
    }
}

// Masking & format info
//------------------------------------------------------------------------------

impl QR {
    // Copy-on-mask: reserved cells are carried over verbatim, free cells are
    // flipped wherever the pattern predicate holds
    pub fn masked(&self, pattern: MaskPattern) -> QR {
        let mask_fn = pattern.mask_function();
        let w = MATRIX_SIZE as i16;
        let mut masked = self.clone();
        for r in 0..w {
            for c in 0..w {
                if !Self::is_reserved(r, c) && mask_fn(r, c) {
                    masked.set(r, c, !self.get(r, c));
                }
            }
        }
        masked.mask = Some(pattern);
        masked
    }

    pub fn draw_format_info(&mut self, format_info: u16) {
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE);
    }

    fn draw_number(&mut self, number: u16, bit_len: usize, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            let clr = if number & mask == 0 { Color::Light } else { Color::Dark };
            self.set(*r, *c, clr);
            mask >>= 1;
        }
    }
}


// Render
//------------------------------------------------------------------------------

impl QR {
    // Quiet zone of four light modules on every side
    const QUIET_ZONE: usize = 4;

    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = Self::QUIET_ZONE as u32 * module_sz;
        let qr_sz = MATRIX_SIZE as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.put_pixel(j, i, self.get(r, c).select(Luma([0]), Luma([255])));
            }
        }

        canvas
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = Self::QUIET_ZONE * module_sz;
        let qr_sz = MATRIX_SIZE * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::new();
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push(' ');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use super::{Color, ECLevel, QR, MATRIX_SIZE};

    #[test]
    fn test_to_image_dimensions() {
        let qr = QR::new(ECLevel::L);
        let img = qr.to_image(2);
        let expected = ((MATRIX_SIZE + 8) * 2) as u32;
        assert_eq!(img.dimensions(), (expected, expected));
    }

    #[test]
    fn test_to_str_marks_dark_modules() {
        let mut qr = QR::new(ECLevel::L);
        qr.set(0, 0, Color::Dark);
        let canvas = qr.to_str(1);
        let lines = canvas.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), MATRIX_SIZE + 8);
        assert_eq!(&lines[4][4..5], "█");
        assert_eq!(&lines[4][5..6], " ");
    }
}
