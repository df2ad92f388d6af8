// Galois field GF(2^8) arithmetic for Reed-Solomon coding
//------------------------------------------------------------------------------

// x^8 + x^4 + x^3 + x + 1
const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

// Exp table spans two periods of the multiplicative group so that multiply
// lookups with summed logs never need an explicit modulo
pub static EXP_TABLE: [u8; 510] = build_exp_table();
pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 510] {
    let mut table = [0u8; 510];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        table[i + 255] = x as u8;
        x <<= 1;
        if x >= 256 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[x as usize] = i as u8;
        x <<= 1;
        if x >= 256 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    table
}

pub const fn gf_add(a: u8, b: u8) -> u8 {
    a ^ b
}

pub const fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
}

#[cfg(test)]
mod gf_tests {
    use super::{gf_add, gf_mul, EXP_TABLE, LOG_TABLE};

    #[test]
    fn test_table_bijection() {
        for v in 1..=255usize {
            assert_eq!(EXP_TABLE[LOG_TABLE[v] as usize], v as u8, "v {v}");
        }
    }

    #[test]
    fn test_exp_table_periodic() {
        for i in 0..255 {
            assert_eq!(EXP_TABLE[i], EXP_TABLE[i + 255]);
        }
    }

    #[test]
    fn test_addition_is_xor() {
        assert_eq!(gf_add(0b00110011, 0b11100011), 0b11010000);
    }

    #[test]
    fn test_addition_commutative() {
        for a in 0..=255 {
            for b in a..=255 {
                assert_eq!(gf_add(a, b), gf_add(b, a));
            }
        }
    }

    #[test]
    fn test_multiplication_by_zero() {
        for a in 0..=255 {
            assert_eq!(gf_mul(a, 0), 0);
            assert_eq!(gf_mul(0, a), 0);
        }
    }

    #[test]
    fn test_multiplication_commutative() {
        for a in 0..=255 {
            for b in a..=255 {
                assert_eq!(gf_mul(a, b), gf_mul(b, a));
            }
        }
    }

    #[test]
    fn test_multiplication_by_one() {
        for a in 0..=255 {
            assert_eq!(gf_mul(a, 1), a);
        }
    }
}
