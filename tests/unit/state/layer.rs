use super::*;

fn red() -> Raster {
    Raster::solid(2, 2, [255, 0, 0, 255])
}

fn blue() -> Raster {
    Raster::solid(2, 2, [0, 0, 255, 255])
}

#[test]
fn defaults_match_startup_selection() {
    let s = LayerState::new();
    assert_eq!(s.background(), &Background::None);
    assert_eq!(s.template_index(), 0);
    assert_eq!(s.eye_style(), EyeStyle::S1);
    assert_eq!(s.eye_index(), 0);
    assert_eq!(s.side(), Side::Left);
    assert_eq!(s.eye_placement(), EyePlacement::default());
    assert_eq!(s.eye_placement().size, 200);
}

#[test]
fn upload_replaces_flag() {
    let mut s = LayerState::new();
    let t = s.begin_load(LoadSlot::Flag);
    assert!(s.complete_flag(t, Some(red())));
    assert!(s.background().is_flag());

    s.set_uploaded(blue());
    assert!(s.background().is_uploaded());
    assert!(!s.background().is_flag());
    assert_eq!(s.background().raster(), Some(&blue()));
}

#[test]
fn flag_replaces_upload() {
    let mut s = LayerState::new();
    s.set_uploaded(blue());
    let t = s.begin_load(LoadSlot::Flag);
    assert!(s.complete_flag(t, Some(red())));
    assert!(s.background().is_flag());
    assert!(!s.background().is_uploaded());
}

#[test]
fn upload_invalidates_pending_flag_load() {
    let mut s = LayerState::new();
    let t = s.begin_load(LoadSlot::Flag);
    s.set_uploaded(blue());
    assert!(!s.complete_flag(t, Some(red())));
    assert!(s.background().is_uploaded());
}

#[test]
fn failed_flag_load_leaves_no_background() {
    let mut s = LayerState::new();
    let t = s.begin_load(LoadSlot::Flag);
    assert!(s.complete_flag(t, None));
    assert_eq!(s.background(), &Background::None);
}

#[test]
fn eye_mode_follows_style() {
    let mut s = LayerState::new();
    assert_eq!(s.eye_mode(), EyeMode::FullFrame);
    s.set_eye_style(EyeStyle::S2);
    assert_eq!(s.eye_mode(), EyeMode::Adjustable);
    s.set_eye_style(EyeStyle::S3);
    assert_eq!(s.eye_mode(), EyeMode::Adjustable);
    s.set_eye_style(EyeStyle::S1);
    assert_eq!(s.eye_mode(), EyeMode::FullFrame);
}

#[test]
fn eye_style_change_resets_index_and_clears_eyes() {
    let mut s = LayerState::new();
    s.set_eye_index(5);
    let t = s.begin_load(LoadSlot::Eyes);
    assert!(s.complete_eyes(t, Some(red())));

    s.set_eye_style(EyeStyle::S2);
    assert_eq!(s.eye_index(), 0);
    assert!(s.eyes().is_none());
}

#[test]
fn eye_style_change_drops_in_flight_eye_load() {
    let mut s = LayerState::new();
    let t = s.begin_load(LoadSlot::Eyes);
    s.set_eye_style(EyeStyle::S3);
    assert!(!s.complete_eyes(t, Some(red())));
    assert!(s.eyes().is_none());
}

#[test]
fn out_of_order_completion_keeps_newest_request() {
    let mut s = LayerState::new();
    let older = s.begin_load(LoadSlot::Eyes);
    let newer = s.begin_load(LoadSlot::Eyes);

    assert!(s.complete_eyes(newer, Some(blue())));
    assert!(!s.complete_eyes(older, Some(red())));
    assert_eq!(s.eyes(), Some(&blue()));
}

#[test]
fn slots_have_independent_generations() {
    let mut s = LayerState::new();
    let eyes = s.begin_load(LoadSlot::Eyes);
    let _template = s.begin_load(LoadSlot::Template);
    let _flag = s.begin_load(LoadSlot::Flag);
    assert!(s.is_current(eyes));
    assert!(s.complete_eyes(eyes, Some(red())));
}

#[test]
fn ticket_for_another_slot_is_rejected() {
    let mut s = LayerState::new();
    let eyes = s.begin_load(LoadSlot::Eyes);
    assert!(!s.complete_flag(eyes, Some(red())));
    assert_eq!(s.background(), &Background::None);
}

#[test]
fn template_and_mask_are_replaced_together() {
    let mut s = LayerState::new();
    let t = s.begin_load(LoadSlot::Template);
    assert!(s.complete_template(t, Some(red()), Some(blue())));
    assert!(s.template().is_some() && s.mask().is_some());

    let t = s.begin_load(LoadSlot::Template);
    assert!(s.complete_template(t, Some(blue()), None));
    assert_eq!(s.template(), Some(&blue()));
    assert!(s.mask().is_none());
}

#[test]
fn flip_toggles_side() {
    let mut s = LayerState::new();
    assert_eq!(s.flip_side(), Side::Right);
    assert_eq!(s.flip_side(), Side::Left);
}

#[test]
fn eye_size_must_be_positive() {
    let mut s = LayerState::new();
    assert!(s.set_eye_size(0).is_err());
    s.set_eye_size(120).unwrap();
    s.set_eye_offset_x(-7);
    s.set_eye_offset_y(9);
    assert_eq!(
        s.eye_placement(),
        EyePlacement {
            offset_x: -7,
            offset_y: 9,
            size: 120
        }
    );
}
