//! Angular similarity between a spread byte and a target label.
use crate::angle::{compass_distance, LABEL_COUNT};

/// Score for an exact label match.
pub const MAX_SIMILARITY: u8 = 4;

/// `[label][half][nibble]` flattened: index `32 * label + 16 * half + nibble`.
///
/// `half == 0` covers labels 0..4 (low nibble), `half == 1` labels 4..8.
/// An entry is the best score among the set bits of the nibble: 4 for the
/// target label itself, 3 for a neighbour on the compass, 0 otherwise.
pub const SIMILARITY_LUT: [u8; 256] = build_lut();

const fn label_score(label: u8, target: u8) -> u8 {
    match compass_distance(label, target) {
        0 => MAX_SIMILARITY,
        1 => 3,
        _ => 0,
    }
}

const fn build_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut target = 0;
    while target < LABEL_COUNT {
        let mut half = 0;
        while half < 2 {
            let mut nibble = 1;
            while nibble < 16 {
                let mut best = 0;
                let mut bit = 0;
                while bit < 4 {
                    if nibble & (1 << bit) != 0 {
                        let s = label_score((bit + 4 * half) as u8, target as u8);
                        if s > best {
                            best = s;
                        }
                    }
                    bit += 1;
                }
                lut[target * 32 + half * 16 + nibble] = best;
                nibble += 1;
            }
            half += 1;
        }
        target += 1;
    }
    lut
}

/// Similarity of `spread_byte` to `label`, in `0..=4`.
#[inline]
pub fn similarity(spread_byte: u8, label: usize) -> u8 {
    let base = label * 32;
    let lo = SIMILARITY_LUT[base + (spread_byte & 15) as usize];
    let hi = SIMILARITY_LUT[base + 16 + (spread_byte >> 4) as usize];
    lo.max(hi)
}
