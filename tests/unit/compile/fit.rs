use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn letterbox_wide_image_fills_width() {
    let p = letterbox_fit(200, 100, 400, Vec2::ZERO, 400.0);
    assert!(approx(p.dst.width(), 400.0));
    assert!(approx(p.dst.height(), 200.0));
    assert!(approx(p.dst.x0, 0.0));
    assert!(approx(p.dst.y0, 100.0));
}

#[test]
fn letterbox_tall_and_square_images_fill_height() {
    let tall = letterbox_fit(50, 100, 400, Vec2::ZERO, 400.0);
    assert!(approx(tall.dst.width(), 200.0));
    assert!(approx(tall.dst.height(), 400.0));
    assert!(approx(tall.dst.x0, 100.0));

    let square = letterbox_fit(64, 64, 400, Vec2::ZERO, 400.0);
    assert_eq!(square.dst, Rect::new(0.0, 0.0, 400.0, 400.0));
}

#[test]
fn letterbox_preserves_aspect_ratio() {
    for (w, h, target) in [(3u32, 7u32, 123.0), (640, 480, 200.0), (1, 999, 400.0)] {
        let p = letterbox_fit(w, h, 400, Vec2::ZERO, target);
        let src_ratio = f64::from(w) / f64::from(h);
        let dst_ratio = p.dst.width() / p.dst.height();
        assert!((src_ratio - dst_ratio).abs() < 1e-9, "{w}x{h}");
        assert!(approx(p.dst.width().max(p.dst.height()), target));
    }
}

#[test]
fn letterbox_is_centered_then_offset() {
    let centered = letterbox_fit(10, 10, 400, Vec2::ZERO, 200.0);
    assert!(approx(centered.dst.center().x, 200.0));
    assert!(approx(centered.dst.center().y, 200.0));

    let moved = letterbox_fit(10, 10, 400, Vec2::new(15.0, -30.0), 200.0);
    assert!(approx(moved.dst.x0, 115.0));
    assert!(approx(moved.dst.y0, 70.0));
}

#[test]
fn letterbox_of_empty_raster_is_empty() {
    assert!(letterbox_fit(0, 10, 400, Vec2::ZERO, 400.0).is_empty());
    assert!(letterbox_fit(10, 0, 400, Vec2::ZERO, 400.0).is_empty());
}

#[test]
fn cover_crop_takes_centered_min_square() {
    let p = cover_crop(300, 200, 400);
    assert_eq!(p.src, Rect::new(50.0, 0.0, 250.0, 200.0));
    assert_eq!(p.dst, Rect::new(0.0, 0.0, 400.0, 400.0));

    let tall = cover_crop(100, 161, 400);
    assert!(approx(tall.src.y0, 30.5));
    assert!(approx(tall.src.width(), tall.src.height()));
}

#[test]
fn full_frame_stretches_to_output() {
    let p = full_frame(200, 100, 400);
    assert_eq!(p.dst, Rect::new(0.0, 0.0, 400.0, 400.0));
    let a = p.to_affine();
    assert_eq!(a * kurbo::Point::new(200.0, 100.0), kurbo::Point::new(400.0, 400.0));
}

#[test]
fn affine_maps_src_corners_to_dst_corners() {
    let p = cover_crop(300, 200, 400);
    let a = p.to_affine();
    let tl = a * kurbo::Point::new(p.src.x0, p.src.y0);
    let br = a * kurbo::Point::new(p.src.x1, p.src.y1);
    assert!(approx(tl.x, 0.0) && approx(tl.y, 0.0));
    assert!(approx(br.x, 400.0) && approx(br.y, 400.0));
}
