//! Conversion between bit strings and dense bytes.
//!
//! Eight bits go into each byte, first bit in the most significant position.
//! A final partial byte is padded with zero bits, and the padding is not
//! recorded: unpacking always yields a multiple of eight bits, so callers that
//! need the exact length must keep it alongside the bytes.

use bitvec::prelude::*;

use crate::Bits;

fn bit_value(c: u8) -> bool {
    match c {
        b'0' => false,
        b'1' => true,
        other => panic!("{:?} is not a bit character", other as char),
    }
}

/// Render bits as a string of `'0'` and `'1'` characters.
pub fn to_ascii(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

/// Parse a string of `'0'` and `'1'` characters.
///
/// # Panics
///
/// Panics on any other character.
pub fn from_ascii(s: &str) -> Bits {
    s.bytes().map(bit_value).collect()
}

/// Pack an ASCII bit string into `ceil(len / 8)` bytes.
///
/// # Panics
///
/// Panics if `bits` holds anything other than `'0'` and `'1'`.
pub fn pack(bits: &str) -> Vec<u8> {
    bits.as_bytes()
        .chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .filter(|&(_, &c)| bit_value(c))
                .fold(0u8, |byte, (i, _)| byte | (0x80 >> i))
        })
        .collect()
}

/// Expand every byte into eight ASCII bits, most significant first.
pub fn unpack(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            out.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }

    out
}

/// [`pack`] for bits that are already in memory.
pub fn pack_bits(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks(8)
        .map(|group| {
            group
                .iter()
                .by_vals()
                .enumerate()
                .filter(|&(_, b)| b)
                .fold(0u8, |byte, (i, _)| byte | (0x80 >> i))
        })
        .collect()
}

/// [`unpack`] without the ASCII step.
pub fn unpack_bits(bytes: &[u8]) -> Bits {
    Bits::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_ascii(rng: &mut StdRng, len: usize) -> String {
        (0..len)
            .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn pack_nine_bits() {
        assert_eq!(pack("000101011"), vec![0x15, 0x80]);
    }

    #[test]
    fn pack_places_first_bit_highest() {
        assert_eq!(pack("1"), vec![0x80]);
        assert_eq!(pack("00000001"), vec![0x01]);
        assert_eq!(pack("11111111"), vec![0xff]);
        assert_eq!(pack("111111111"), vec![0xff, 0x80]);
    }

    #[test]
    fn pack_empty() {
        assert!(pack("").is_empty());
        assert!(unpack(&[]).is_empty());
    }

    #[test]
    fn unpack_bytes() {
        assert_eq!(unpack(&[0x15, 0x80]), "0001010110000000");
        assert_eq!(unpack(&[0x00, 0xff, 0xa5]), "000000001111111110100101");
    }

    #[test]
    #[should_panic(expected = "not a bit character")]
    fn pack_rejects_other_characters() {
        pack("0102");
    }

    #[test]
    #[should_panic(expected = "not a bit character")]
    fn from_ascii_rejects_other_characters() {
        from_ascii("01 1");
    }

    #[test]
    fn ascii_round_trip_pads_to_whole_bytes() {
        let mut rng = StdRng::seed_from_u64(0x1234_5678);
        for len in 0..100 {
            let s = random_ascii(&mut rng, len);
            let packed = pack(&s);
            let back = unpack(&packed);

            assert_eq!(packed.len(), len.div_ceil(8));
            assert_eq!(back.len(), packed.len() * 8);
            assert_eq!(&back[..len], s);
            assert!(back[len..].bytes().all(|c| c == b'0'));
        }
    }

    #[test]
    fn bitvec_packing_agrees_with_ascii_packing() {
        let mut rng = StdRng::seed_from_u64(99);
        for len in 0..100 {
            let s = random_ascii(&mut rng, len);
            let bits = from_ascii(&s);

            assert_eq!(to_ascii(&bits), s);
            assert_eq!(pack_bits(&bits), pack(&s));
            assert_eq!(to_ascii(&unpack_bits(&pack(&s))), unpack(&pack(&s)));
        }
    }

    #[test]
    fn pack_bits_zeroes_padding_of_truncated_vectors() {
        let mut bits = Bits::from_slice(&[0xff, 0xff]);
        bits.truncate(9);

        assert_eq!(pack_bits(&bits), vec![0xff, 0x80]);
    }
}
