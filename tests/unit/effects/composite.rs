use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_blends_premultiplied() {
    assert_eq!(over([0, 0, 255, 255], [64, 0, 0, 128]), [64, 0, 127, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn mask_alpha_zero_always_clears() {
    for src in [[255, 0, 0, 255], [9, 9, 9, 9], [0, 0, 0, 0]] {
        for mask_rgb in [[0, 0, 0], [255, 255, 255], [12, 200, 7]] {
            let mask = [mask_rgb[0], mask_rgb[1], mask_rgb[2], 0];
            assert_eq!(mask_in(src, mask), [0, 0, 0, 0]);
        }
    }
}

#[test]
fn opaque_mask_keeps_source_regardless_of_mask_color() {
    let src = [10, 20, 30, 40];
    assert_eq!(mask_in(src, [0, 0, 0, 255]), src);
    assert_eq!(mask_in(src, [255, 255, 255, 255]), src);
}

#[test]
fn partial_mask_alpha_keeps_full_source() {
    assert_eq!(mask_in([255, 0, 0, 255], [0, 0, 0, 128]), [255, 0, 0, 255]);
    assert_eq!(mask_in([40, 30, 20, 40], [0, 0, 0, 1]), [40, 30, 20, 40]);
}

#[test]
fn mask_in_place_gates_per_pixel() {
    let mut dst = [255u8, 0, 0, 255].repeat(3);
    let mask = [
        [0u8, 0, 0, 255],
        [0u8, 0, 0, 0],
        [50u8, 60, 70, 255],
    ]
    .concat();
    mask_in_place(&mut dst, &mask).unwrap();
    assert_eq!(dst, [[255, 0, 0, 255], [0, 0, 0, 0], [255, 0, 0, 255]].concat());
}

#[test]
fn length_mismatch_is_an_error() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(mask_in_place(&mut dst, &[0u8; 12]).is_err());
}

#[test]
fn over_in_place_matches_scalar_over() {
    let mut dst = [0u8, 0, 255, 255].repeat(4);
    let src = [
        [255u8, 0, 0, 255],
        [0, 0, 0, 0],
        [64, 0, 0, 128],
        [0, 255, 0, 255],
    ]
    .concat();
    let expected: Vec<u8> = dst
        .chunks_exact(4)
        .zip(src.chunks_exact(4))
        .flat_map(|(d, s)| over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]))
        .collect();
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, expected);
}
