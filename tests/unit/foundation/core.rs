use super::*;

#[test]
fn transparent_pixels_drop_color() {
    let mut px = [10u8, 20, 30, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn unpremultiply_restores_half_alpha() {
    let mut px = [100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px.iter().zip([100u8, 50, 200, 128]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
}
