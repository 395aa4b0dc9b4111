use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};

#[test]
fn outline_is_two_strokes_on_the_disc_path() {
    let geom = Geometry::compute(512, 52);
    let mut s = RecordingSurface::new();
    s.resize(512, 512).unwrap();
    let green = Color::rgb(0, 128, 0);
    paint_outline(&mut s, &geom, green, Color::BLACK).unwrap();

    let cmds = s.commands();
    assert_eq!(cmds.len(), 3);
    let DrawCommand::StrokeArc { arc, width, color, .. } = &cmds[1] else {
        panic!("expected stroke");
    };
    assert_eq!(*arc, geom.disc());
    assert_eq!(*width, 65.0);
    assert_eq!(*color, green);
    let DrawCommand::StrokeArc { width, color, .. } = &cmds[2] else {
        panic!("expected stroke");
    };
    assert_eq!(*width, 45.0);
    assert_eq!(*color, Color::BLACK);
}

#[test]
fn decal_is_drawn_into_fitted_rect() {
    let geom = Geometry::compute(512, 52);
    let image = DecalImage::from_premul_rgba8(2, 1, vec![255; 8]).unwrap();
    let mut s = RecordingSurface::new();
    let dst = paint_decal(&mut s, &geom, 1.0, &image).unwrap();
    assert_eq!(dst, Rect::new(128.0, 192.0, 384.0, 320.0));
    assert!(matches!(
        s.commands().as_slice(),
        [DrawCommand::DrawImage { image_width: 2, image_height: 1, .. }]
    ));
}

#[test]
fn disc_fill_uses_background() {
    let geom = Geometry::compute(100, 10);
    let mut s = RecordingSurface::new();
    paint_disc(&mut s, &geom, Color::rgb(1, 2, 3)).unwrap();
    let cmds = s.commands();
    let [DrawCommand::FillArc { arc, color, .. }] = cmds.as_slice() else {
        panic!("expected a single fill");
    };
    assert_eq!(arc.radius, 50.0 - 6.0);
    assert_eq!(*color, Color::rgb(1, 2, 3));
}
