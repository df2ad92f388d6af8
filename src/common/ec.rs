use super::gf::{gf_add, gf_mul, EXP_TABLE};

// Reed-Solomon error correction
//------------------------------------------------------------------------------

// Builds the generator polynomial as the product of (x - α^i) for i in
// 0..ec_count. Coefficient 0 is always 1.
pub fn generator_polynomial(ec_count: usize) -> Vec<u8> {
    let mut gen = vec![0u8; ec_count + 1];
    gen[0] = 1;
    for i in 0..ec_count {
        let root = EXP_TABLE[i];
        for j in (0..=i).rev() {
            gen[j + 1] = gf_add(gen[j + 1], gf_mul(gen[j], root));
        }
    }
    gen
}

// Performs polynomial long division with the data polynomial (num) and the
// generator polynomial (den); the remainder coefficients are the ecc
pub fn ecc(data: &[u8], ec_count: usize) -> Vec<u8> {
    let len = data.len();
    let gen = generator_polynomial(ec_count);

    let mut msg = data.to_vec();
    msg.resize(len + ec_count, 0);

    for i in 0..len {
        let coeff = msg[i];
        if coeff == 0 {
            continue;
        }
        for (j, &g) in gen.iter().enumerate() {
            msg[i + j] = gf_add(msg[i + j], gf_mul(coeff, g));
        }
    }

    msg.split_off(len)
}

#[cfg(test)]
mod ec_tests {
    use rand::Rng;

    use super::{ecc, generator_polynomial};

    #[test]
    fn test_generator_polynomial() {
        let gen = generator_polynomial(7);
        assert_eq!(gen, [1, 127, 122, 154, 164, 11, 68, 117]);
    }

    #[test]
    fn test_ecc() {
        // "HELLO WORLD" with terminator and padding
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17, 236, 17, 236,
        ];
        let res = ecc(&data, 7);
        assert_eq!(res, [209, 239, 196, 207, 78, 195, 109]);
    }

    #[test]
    fn test_ecc_deterministic() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17, 236, 17, 236,
        ];
        assert_eq!(ecc(&data, 7), ecc(&data, 7));
    }

    #[test]
    fn test_ecc_is_linear() {
        // The remainder of a sum is the sum of the remainders in GF(2^8)
        let mut rng = rand::rng();
        for _ in 0..50 {
            let a: [u8; 19] = rng.random();
            let b: [u8; 19] = rng.random();
            let sum = a.iter().zip(&b).map(|(x, y)| x ^ y).collect::<Vec<_>>();
            let expected =
                ecc(&a, 7).iter().zip(ecc(&b, 7)).map(|(x, y)| x ^ y).collect::<Vec<_>>();
            assert_eq!(ecc(&sum, 7), expected);
        }
    }

    #[test]
    fn test_ecc_length() {
        for n in 1..=10 {
            assert_eq!(ecc(b"\x20\x5b\x0b", n).len(), n);
            assert_eq!(generator_polynomial(n).len(), n + 1);
        }
    }
}
