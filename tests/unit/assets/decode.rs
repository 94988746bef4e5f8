use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = encode_png(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let raster = decode_image(&buf).unwrap();
    assert_eq!(raster.width, 1);
    assert_eq!(raster.height, 1);
    assert_eq!(
        raster.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_keeps_non_square_dimensions() {
    let buf = encode_png(3, 2, vec![255u8; 3 * 2 * 4]);
    let raster = decode_image(&buf).unwrap();
    assert_eq!((raster.width, raster.height), (3, 2));
    assert_eq!(raster.pixel(2, 1), Some([255, 255, 255, 255]));
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn transparent_pixels_lose_color() {
    let mut px = [10u8, 20, 30, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}
