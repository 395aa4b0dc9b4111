use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#ff0000").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(parse_css_color("#0F0").unwrap(), Color::rgb(0, 255, 0));
    assert_eq!(
        parse_css_color("#0000ff80").unwrap(),
        Color::rgba(0, 0, 255, 128)
    );
    assert_eq!(
        parse_css_color("#fff8").unwrap(),
        Color::rgba(255, 255, 255, 136)
    );
    assert!(parse_css_color("#12345").is_err());
    assert!(parse_css_color("#gg0000").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        parse_css_color("rgb(10, 20, 30)").unwrap(),
        Color::rgb(10, 20, 30)
    );
    assert_eq!(
        parse_css_color("rgba(10,20,30,0.5)").unwrap(),
        Color::rgba(10, 20, 30, 128)
    );
    assert_eq!(
        parse_css_color("rgb(100%, 0%, 0%)").unwrap(),
        Color::rgb(255, 0, 0)
    );
    // Pure red.
    assert_eq!(
        parse_css_color("hsl(0, 100%, 50%)").unwrap(),
        Color::rgb(255, 0, 0)
    );
    assert_eq!(
        parse_css_color("hsla(120deg, 100%, 25%, 1)").unwrap(),
        Color::rgb(0, 128, 0)
    );
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(parse_css_color("green").unwrap(), Color::rgb(0, 128, 0));
    assert_eq!(parse_css_color(" White ").unwrap(), Color::rgb(255, 255, 255));
    assert_eq!(
        parse_css_color("transparent").unwrap(),
        Color::rgba(0, 0, 0, 0)
    );
    assert_eq!(
        parse_css_color("rebeccapurple").unwrap(),
        Color::rgb(102, 51, 153)
    );
    assert!(parse_css_color("not-a-color").is_err());
    assert!(parse_css_color("").is_err());
}

#[test]
fn parses_hwb() {
    assert_eq!(
        parse_css_color("hwb(0 0% 0%)").unwrap(),
        Color::rgb(255, 0, 0)
    );
}

#[test]
fn resolve_falls_back_to_black() {
    assert_eq!(resolve_color("fontColor", "bogus"), Color::BLACK);
    assert_eq!(resolve_color("fontColor", "white"), Color::rgb(255, 255, 255));
}
