//! AVX2 tier: 32-byte-lane first-byte broadcast search with scalar tail
//! verification, grounded on the SSE2 broadcast-and-verify shape in
//! `mtb0x1-simd_needle`'s `search/simdx86_64.rs`, widened to 32-byte lanes
//! and changed from whole-needle-in-one-lane to first-byte-then-verify so
//! needles longer than the lane width are supported.

#[cfg(feature = "debug")]
use tracing::{instrument, trace};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Leftmost occurrence of `needle` in `haystack`. Needle must be non-empty
/// and no longer than `haystack`; callers (the tiered dispatcher) already
/// check this, but this function re-checks defensively.
///
/// # Safety
/// Caller must have confirmed AVX2 is available (`is_x86_feature_detected!
/// ("avx2")`) before calling.
#[cfg_attr(feature = "debug", instrument(skip(haystack, needle)))]
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let n = haystack.len();
    let m = needle.len();
    if m == 0 || n < m {
        return None;
    }

    if m == 1 {
        return find_byte(haystack, needle[0]);
    }

    let first = _mm256_set1_epi8(needle[0] as i8);
    let last = _mm256_set1_epi8(needle[m - 1] as i8);

    let mut i = 0usize;
    // Each 32-byte block is checked for needle[0] and needle[m-1] at the
    // matching offset (i, i + m - 1) simultaneously; only positions with
    // both bytes right are scalar-verified, which prunes almost all
    // candidates for any needle of reasonable selectivity.
    let last_start = n - m;
    while i + 32 <= last_start + 1 {
        let block_first = _mm256_loadu_si256(haystack[i..].as_ptr() as *const __m256i);
        let block_last = _mm256_loadu_si256(haystack[i + m - 1..].as_ptr() as *const __m256i);

        let eq_first = _mm256_cmpeq_epi8(block_first, first);
        let eq_last = _mm256_cmpeq_epi8(block_last, last);
        let mut mask = _mm256_movemask_epi8(_mm256_and_si256(eq_first, eq_last)) as u32;

        while mask != 0 {
            let bit = mask.trailing_zeros() as usize;
            let cand = i + bit;
            if &haystack[cand..cand + m] == needle {
                return Some(cand);
            }
            mask &= mask - 1;
        }
        i += 32;
    }

    // Scalar tail for the remaining bytes.
    while i + m <= n {
        if &haystack[i..i + m] == needle {
            #[cfg(feature = "debug")]
            trace!(offset = i, "avx2 tail match");
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Single-byte search over 32-byte lanes; also reused by the line emitter
/// for newline lookups (spec C1 note: "length-1 needles degenerate to a
/// pure character search and is reused by the emitter").
///
/// # Safety
/// Caller must have confirmed AVX2 is available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn find_byte(haystack: &[u8], byte: u8) -> Option<usize> {
    let n = haystack.len();
    let needle = _mm256_set1_epi8(byte as i8);
    let mut i = 0usize;
    while i + 32 <= n {
        let block = _mm256_loadu_si256(haystack[i..].as_ptr() as *const __m256i);
        let eq = _mm256_cmpeq_epi8(block, needle);
        let mask = _mm256_movemask_epi8(eq) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += 32;
    }
    while i < n {
        if haystack[i] == byte {
            return Some(i);
        }
        i += 1;
    }
    None
}
