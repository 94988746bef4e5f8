use rayon::prelude::*;

use crate::foundation::error::{CountryballError, CountryballResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let inv = match src[3] {
        0 => return dst,
        255 => return src,
        a => 255 - u16::from(a),
    };
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Alpha intersection: `dst` survives wherever `mask` has any alpha and is cleared elsewhere.
pub fn mask_in(dst: PremulRgba8, mask: PremulRgba8) -> PremulRgba8 {
    if mask[3] == 0 { [0, 0, 0, 0] } else { dst }
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> CountryballResult<()> {
    check_pair(dst, src, "over_in_place")?;
    dst.par_chunks_exact_mut(4)
        .zip(src.par_chunks_exact(4))
        .for_each(|(d, s)| {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        });
    Ok(())
}

pub fn mask_in_place(dst: &mut [u8], mask: &[u8]) -> CountryballResult<()> {
    check_pair(dst, mask, "mask_in_place")?;
    dst.par_chunks_exact_mut(4)
        .zip(mask.par_chunks_exact(4))
        .for_each(|(d, m)| {
            let out = mask_in([d[0], d[1], d[2], d[3]], [m[0], m[1], m[2], m[3]]);
            d.copy_from_slice(&out);
        });
    Ok(())
}

fn check_pair(dst: &[u8], src: &[u8], op: &str) -> CountryballResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CountryballError::render(format!(
            "{op} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
