//! AVX-512 tier: 64-byte-lane scanner, self-contained (no SIMD string
//! library dependency per spec C1). For needles of length >= 4, the first
//! four bytes of the needle are broadcast into a 16-lane 32-bit vector;
//! each 64-byte haystack block is read four times at byte offsets 0..3 so
//! that every 4-byte window in the block is compared exactly once against
//! the broadcast prefix. Matching 32-bit lanes are then verified against
//! the needle tail with a byte-wise compare. Needles of length 2-3 use a
//! first-and-last-byte broadcast with a mask intersection; length 1 falls
//! through to a single-character scan.

#[cfg(feature = "debug")]
use tracing::{instrument, trace};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Leftmost occurrence of `needle` in `haystack`.
///
/// # Safety
/// Caller must have confirmed AVX-512F and AVX-512BW are available
/// (`is_x86_feature_detected!("avx512f")` and `"avx512bw"`).
#[cfg_attr(feature = "debug", instrument(skip(haystack, needle)))]
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
pub unsafe fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let n = haystack.len();
    let m = needle.len();
    if m == 0 || n < m {
        return None;
    }
    match m {
        1 => find_byte(haystack, needle[0]),
        2 | 3 => find_short(haystack, needle),
        _ => find_long(haystack, needle),
    }
}

/// Single-character scan over 64-byte lanes.
///
/// # Safety
/// Caller must have confirmed AVX-512F/BW are available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn find_byte(haystack: &[u8], byte: u8) -> Option<usize> {
    let n = haystack.len();
    let target = _mm512_set1_epi8(byte as i8);
    let mut i = 0usize;
    while i + 64 <= n {
        let block = _mm512_loadu_si512(haystack[i..].as_ptr() as *const i32);
        let mask = _mm512_cmpeq_epi8_mask(block, target);
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += 64;
    }
    while i < n {
        if haystack[i] == byte {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// 2- or 3-byte needle: broadcast first and last byte, intersect masks.
///
/// # Safety
/// Caller must have confirmed AVX-512F/BW are available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn find_short(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let n = haystack.len();
    let m = needle.len();
    let last_start = n - m;
    let first = _mm512_set1_epi8(needle[0] as i8);
    let last = _mm512_set1_epi8(needle[m - 1] as i8);

    let mut i = 0usize;
    while i + 64 + (m - 1) <= n {
        let block_first = _mm512_loadu_si512(haystack[i..].as_ptr() as *const i32);
        let block_last = _mm512_loadu_si512(haystack[i + m - 1..].as_ptr() as *const i32);
        let eq_first = _mm512_cmpeq_epi8_mask(block_first, first);
        let eq_last = _mm512_cmpeq_epi8_mask(block_last, last);
        let mut mask = eq_first & eq_last;
        while mask != 0 {
            let bit = mask.trailing_zeros() as usize;
            let cand = i + bit;
            if cand <= last_start && &haystack[cand..cand + m] == needle {
                return Some(cand);
            }
            mask &= mask - 1;
        }
        i += 64;
    }
    while i <= last_start {
        if &haystack[i..i + m] == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Needles of length >= 4: four shifted 4-byte-lane views per 64-byte block.
///
/// # Safety
/// Caller must have confirmed AVX-512F/BW are available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn find_long(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let n = haystack.len();
    let m = needle.len();
    let last_start = n - m;

    let mut prefix_buf = [0u8; 4];
    prefix_buf.copy_from_slice(&needle[..4]);
    let prefix = i32::from_le_bytes(prefix_buf);
    let prefix_vec = _mm512_set1_epi32(prefix);

    let mut i = 0usize;
    // Each shifted view needs 64 + shift bytes available; shift <= 3, and a
    // verified candidate needs the full needle (m bytes) in range, so the
    // block loop only runs while the widest read (64 + 3) plus the tail
    // verification (m - 4 more bytes past the 4-byte prefix) stays in bounds.
    while i + 64 + 3 + m.saturating_sub(4) <= n {
        // candidates[s] bit j set means haystack[i+s+4*j .. +4] == needle[..4]
        let mut combined: u64 = 0;
        for s in 0..4usize {
            let view = _mm512_loadu_si512(haystack[i + s..].as_ptr() as *const i32);
            let mask = _mm512_cmpeq_epi32_mask(view, prefix_vec) as u64;
            // Spread the 16 lane bits out to absolute positions s, s+4, s+8, ...
            for lane in 0..16u32 {
                if mask & (1 << lane) != 0 {
                    let pos = s + 4 * lane as usize;
                    combined |= 1u64 << pos;
                }
            }
        }

        while combined != 0 {
            let bit = combined.trailing_zeros() as usize;
            let cand = i + bit;
            if cand <= last_start && haystack[cand + 4..cand + m] == needle[4..] {
                #[cfg(feature = "debug")]
                trace!(offset = cand, "avx512 tier match");
                return Some(cand);
            }
            combined &= combined - 1;
        }
        i += 64;
    }

    while i <= last_start {
        if &haystack[i..i + m] == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;

    fn available() -> bool {
        is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw")
    }

    fn run(h: &[u8], n: &[u8]) -> Option<usize> {
        if !available() {
            return crate::scanner::scalar::find(h, n);
        }
        unsafe { find(h, n) }
    }

    #[test]
    fn empty_needle() {
        assert_eq!(run(b"hello world", b""), None);
    }

    #[test]
    fn single_char() {
        assert_eq!(run(b"hello", b"l"), Some(2));
    }

    #[test]
    fn two_byte_needle() {
        assert_eq!(run(b"abcdeabce", b"bc"), Some(1));
    }

    #[test]
    fn three_byte_needle() {
        assert_eq!(run(b"xxxabcxxx", b"abc"), Some(3));
    }

    #[test]
    fn four_byte_needle_crossing_block() {
        let mut hay = vec![b'x'; 70];
        hay[66..70].copy_from_slice(b"nddl");
        assert_eq!(run(&hay, b"nddl"), Some(66));
    }

    #[test]
    fn long_needle_in_large_block() {
        let mut hay = vec![b'x'; 200];
        hay[120..130].copy_from_slice(b"needle1234");
        assert_eq!(run(&hay, b"needle1234"), Some(120));
    }

    #[test]
    fn no_match_long_needle() {
        let hay = vec![b'x'; 200];
        assert_eq!(run(&hay, b"needle1234"), None);
    }

    #[test]
    fn leftmost_of_several_candidates() {
        let mut hay = vec![b'a'; 67];
        hay.extend_from_slice(b"abcdxxabcd");
        assert_eq!(run(&hay, b"abcd"), Some(67));
    }
}
