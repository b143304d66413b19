use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Background level shared by patches and noise frames.
pub const BACKGROUND: u8 = 40;

/// Square patch with a hard-edged bright disk centred in it.
pub fn disk_patch(size: usize, radius: f32) -> Vec<u8> {
    assert!(size > 0, "patch size must be positive");
    let c = size as f32 / 2.0;
    let mut img = vec![BACKGROUND; size * size];
    for y in 0..size {
        for x in 0..size {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if (px - c).hypot(py - c) <= radius {
                img[y * size + x] = 200;
            }
        }
    }
    img
}

/// Square patch with a bright axis-aligned square of side `inner` centred in it.
pub fn square_patch(size: usize, inner: usize) -> Vec<u8> {
    assert!(inner < size, "inner square must fit the patch");
    let start = (size - inner) / 2;
    let mut img = vec![BACKGROUND; size * size];
    for y in start..start + inner {
        for x in start..start + inner {
            img[y * size + x] = 210;
        }
    }
    img
}

/// Uniform frame.
pub fn flat_frame(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Seeded uniform noise above the patch background: values in
/// `BACKGROUND..BACKGROUND + amplitude`. Amplitudes above roughly 10 push
/// Sobel magnitudes past the default weak threshold.
pub fn noise_frame(width: usize, height: usize, amplitude: u8, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| BACKGROUND + rng.gen_range(0..amplitude))
        .collect()
}

/// Copy a `patch_w × patch_h` gray patch into a gray frame at `(x, y)`.
pub fn embed(
    frame: &mut [u8],
    frame_w: usize,
    patch: &[u8],
    patch_w: usize,
    patch_h: usize,
    x: usize,
    y: usize,
) {
    for row in 0..patch_h {
        let dst = (y + row) * frame_w + x;
        frame[dst..dst + patch_w].copy_from_slice(&patch[row * patch_w..(row + 1) * patch_w]);
    }
}

/// Interleaved RGB image whose green channel carries `gray` and whose other
/// channels stay flat.
pub fn gray_in_green(gray: &[u8]) -> Vec<u8> {
    gray.iter()
        .flat_map(|&g| [BACKGROUND, g, BACKGROUND])
        .collect()
}
