//! Request signing for the translate endpoint.
//!
//! The endpoint expects a `tk` query parameter derived from the request text.
//! The derivation is the service's own client-side hash: every UTF-8 byte of
//! the text is folded into a 32-bit accumulator through a pair of shift/add/xor
//! "scramble" patterns, then the result is reduced to six decimal digits.
//!
//! All arithmetic is done on `u32` with explicit wrapping, which reproduces the
//! 32-bit integer coercions of the original function exactly. A token that is
//! off by a single bit is silently rejected by the service.

use std::fmt;
use std::str::FromStr;

/// Pattern applied after each byte of input.
const BYTE_PATTERN: &[u8] = b"+-a^+6";

/// Pattern applied once after all bytes have been folded in.
const FINAL_PATTERN: &[u8] = b"+-3^+b+-f";

const TOKEN_MODULUS: u32 = 1_000_000;

/// Two-part key `"<h>.<s>"` controlling the accumulator's starting value (`h`)
/// and the final XOR mask (`s`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedKey {
    h: u32,
    s: u32,
}

impl SeedKey {
    /// The degenerate key `"0"` used for every request.
    pub const DEFAULT: SeedKey = SeedKey { h: 0, s: 0 };

    pub const fn new(h: u32, s: u32) -> Self {
        Self { h, s }
    }

    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn s(&self) -> u32 {
        self.s
    }

    /// Compute the signing token for `text` under this key.
    pub fn sign(&self, text: &str) -> SigningToken {
        let mut a = self.h;
        for byte in expand(text) {
            a = scramble(a.wrapping_add(u32::from(byte)), BYTE_PATTERN);
        }
        a = scramble(a, FINAL_PATTERN);
        a ^= self.s;

        // The original masks negatives into [2^31, 2^32); on u32 that is the identity.
        let first = a % TOKEN_MODULUS;
        let second = (first as i32) ^ (self.h as i32);

        SigningToken(format!("{}.{}", first, second))
    }
}

impl FromStr for SeedKey {
    type Err = std::convert::Infallible;

    /// Parse `"<h>.<s>"`. Missing or non-numeric parts read as 0 and values
    /// wrap modulo 2^32, mirroring how the service coerces its own key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let h = parts.next().map(coerce_part).unwrap_or(0);
        let s = parts.next().map(coerce_part).unwrap_or(0);
        Ok(Self { h, s })
    }
}

impl fmt::Display for SeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.s == 0 {
            write!(f, "{}", self.h)
        } else {
            write!(f, "{}.{}", self.h, self.s)
        }
    }
}

fn coerce_part(part: &str) -> u32 {
    part.trim().parse::<i64>().map(|v| v as u32).unwrap_or(0)
}

/// The `tk` value: `"<n1>.<n2>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SigningToken(String);

impl SigningToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SigningToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign `text` with [`SeedKey::DEFAULT`].
pub fn sign(text: &str) -> SigningToken {
    SeedKey::DEFAULT.sign(text)
}

/// Re-encode the text's UTF-16 code units as UTF-8 style byte values.
///
/// Surrogate pairs are combined into one four-byte sequence; an unpaired
/// surrogate is emitted as three bytes. For a valid `&str` the output equals
/// `text.as_bytes()`.
fn expand(text: &str) -> Vec<u8> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out = Vec::with_capacity(units.len() * 3);
    let mut i = 0;

    while i < units.len() {
        let mut c = u32::from(units[i]);
        if c < 0x80 {
            out.push(c as u8);
        } else if c < 0x800 {
            out.push((c >> 6 | 0xC0) as u8);
            out.push((c & 0x3F | 0x80) as u8);
        } else {
            let next = units.get(i + 1).copied().map(u32::from);
            match next {
                Some(low) if c & 0xFC00 == 0xD800 && low & 0xFC00 == 0xDC00 => {
                    i += 1;
                    c = 0x10000 + ((c & 0x3FF) << 10) + (low & 0x3FF);
                    out.push((c >> 18 | 0xF0) as u8);
                    out.push((c >> 12 & 0x3F | 0x80) as u8);
                }
                _ => out.push((c >> 12 | 0xE0) as u8),
            }
            out.push((c >> 6 & 0x3F | 0x80) as u8);
            out.push((c & 0x3F | 0x80) as u8);
        }
        i += 1;
    }

    out
}

/// Walk `pattern` three characters at a time: `(op, dir, shift)`.
///
/// `shift` is a digit or a lowercase letter (`a` = 10 .. `f` = 15). `dir == '+'`
/// is a logical right shift, anything else a left shift. `op == '+'` is a
/// wrapping add, anything else XOR.
fn scramble(mut a: u32, pattern: &[u8]) -> u32 {
    for step in pattern.chunks_exact(3) {
        let (op, dir, shift_char) = (step[0], step[1], step[2]);
        let shift = if shift_char >= b'a' {
            u32::from(shift_char) - 87
        } else {
            u32::from(shift_char - b'0')
        };
        let shifted = if dir == b'+' { a >> shift } else { a << shift };
        a = if op == b'+' {
            a.wrapping_add(shifted)
        } else {
            a ^ shifted
        };
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Reference Vectors ====================

    #[test]
    fn test_sign_empty_text() {
        assert_eq!(sign("").as_str(), "0.0");
    }

    #[test]
    fn test_sign_ascii_vectors() {
        assert_eq!(sign("a").as_str(), "50242.50242");
        assert_eq!(sign("hello").as_str(), "29979.29979");
        assert_eq!(sign("Hello World").as_str(), "212756.212756");
        assert_eq!(
            sign("The quick brown fox jumps over the lazy dog").as_str(),
            "346549.346549"
        );
    }

    #[test]
    fn test_sign_multibyte_vectors() {
        assert_eq!(sign("Ünïcödé ñ").as_str(), "48395.48395");
        assert_eq!(sign("床前明月光，疑是地上霜").as_str(), "919332.919332");
        assert_eq!(sign("اطلع على الكلمات كاملةً").as_str(), "427053.427053");
        assert_eq!(
            sign("危楼高百尺，手可摘星辰\n不敢高声语，恐惊天上人").as_str(),
            "551241.551241"
        );
    }

    #[test]
    fn test_sign_astral_plane_vector() {
        assert_eq!(sign("😀").as_str(), "804362.804362");
    }

    #[test]
    fn test_sign_long_input_wraps_32_bits() {
        let text = "x".repeat(1000);
        assert_eq!(sign(&text).as_str(), "425023.425023");
    }

    #[test]
    fn test_sign_with_real_seed_key() {
        let key: SeedKey = "406398.2087938574".parse().unwrap();
        assert_eq!(key.sign("Hello World").as_str(), "955043.565725");
        assert_eq!(key.sign("").as_str(), "263193.145255");
    }

    #[test]
    fn test_sign_with_small_seed_key() {
        let key: SeedKey = "1.2".parse().unwrap();
        assert_eq!(key.sign("hello").as_str(), "209809.209808");
    }

    // ==================== Seed Key Parsing ====================

    #[test]
    fn test_seed_key_parse_degenerate() {
        let key: SeedKey = "0".parse().unwrap();
        assert_eq!(key, SeedKey::DEFAULT);
    }

    #[test]
    fn test_seed_key_parse_non_numeric_is_zero() {
        let key: SeedKey = "abc".parse().unwrap();
        assert_eq!(key, SeedKey::DEFAULT);
        assert_eq!(key.sign("hello"), sign("hello"));
    }

    #[test]
    fn test_seed_key_parse_wraps_large_second_part() {
        let key: SeedKey = "1.4294967298".parse().unwrap();
        assert_eq!(key.h(), 1);
        assert_eq!(key.s(), 2);
    }

    #[test]
    fn test_seed_key_display() {
        assert_eq!(SeedKey::DEFAULT.to_string(), "0");
        assert_eq!(SeedKey::new(406398, 7).to_string(), "406398.7");
    }

    // ==================== Scramble ====================

    #[test]
    fn test_scramble_zero_is_fixed_point() {
        assert_eq!(scramble(0, BYTE_PATTERN), 0);
        assert_eq!(scramble(0, FINAL_PATTERN), 0);
    }

    #[test]
    fn test_scramble_single_byte() {
        // 97 + (97 << 10) = 99425; 99425 ^ (99425 >> 6) = 99425 ^ 1553
        assert_eq!(scramble(97, BYTE_PATTERN), 99425 ^ 1553);
    }

    // ==================== Expansion ====================

    #[test]
    fn test_expand_surrogate_pair_is_four_bytes() {
        assert_eq!(expand("😀"), vec![0xF0, 0x9F, 0x98, 0x80]);
    }

    proptest! {
        #[test]
        fn prop_expand_matches_utf8(text in any::<String>()) {
            prop_assert_eq!(expand(&text), text.as_bytes().to_vec());
        }

        #[test]
        fn prop_sign_is_deterministic(text in any::<String>()) {
            prop_assert_eq!(sign(&text), sign(&text));
        }

        #[test]
        fn prop_default_token_format(text in any::<String>()) {
            let token = sign(&text);
            let (first, second) = token.as_str().split_once('.').unwrap();
            let first: i64 = first.parse().unwrap();
            let second: i64 = second.parse().unwrap();
            prop_assert!((0..1_000_000).contains(&first));
            prop_assert_eq!(first, second);
        }
    }
}
