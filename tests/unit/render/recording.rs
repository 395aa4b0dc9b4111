use super::*;

#[test]
fn resize_restarts_the_log() {
    let mut s = RecordingSurface::new();
    s.resize(10, 10).unwrap();
    s.clear();
    s.save();
    s.resize(20, 30).unwrap();
    assert_eq!(
        s.commands(),
        vec![DrawCommand::Resize {
            width: 20,
            height: 30
        }]
    );
    assert_eq!(s.size(), (20, 30));
    assert_eq!(s.save_depth(), 0);
    assert!(s.resize(0, 1).is_err());
}

#[test]
fn paint_commands_capture_the_current_transform() {
    let mut s = RecordingSurface::new();
    let log = s.log();
    s.save();
    s.translate(Vec2::new(5.0, 0.0));
    s.fill_arc(&ArcPath::circle(Point::ORIGIN, 1.0), Color::BLACK)
        .unwrap();
    s.restore();
    s.stroke_arc(&ArcPath::circle(Point::ORIGIN, 1.0), 2.0, Color::BLACK)
        .unwrap();

    let cmds = log.snapshot();
    assert_eq!(log.len(), 5);
    let DrawCommand::FillArc { transform, .. } = &cmds[2] else {
        panic!("expected fill");
    };
    assert_eq!(*transform, Affine::translate(Vec2::new(5.0, 0.0)));
    let DrawCommand::StrokeArc { transform, .. } = &cmds[4] else {
        panic!("expected stroke");
    };
    assert_eq!(*transform, Affine::IDENTITY);
    assert_eq!(cmds.iter().filter(|c| c.is_paint()).count(), 2);
}

#[test]
fn text_records_font_descriptor() {
    let mut s = RecordingSurface::new();
    let font = FontDescriptor::new("Courier", false, 12);
    s.fill_text("A", Point::new(1.0, 2.0), &font, Color::BLACK)
        .unwrap();
    let cmds = s.commands();
    let [DrawCommand::FillText { text, font, .. }] = cmds.as_slice() else {
        panic!("expected text");
    };
    assert_eq!(text, "A");
    assert_eq!(font, "12px Courier");
}
