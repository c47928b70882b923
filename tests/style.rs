use std::collections::HashSet;

use catalogue_tools::ToolError;
use catalogue_tools::render::{Rgb, StyleSet};

#[test]
fn lighten_with_factor_zero_keeps_the_color() {
    let color = Rgb::from_hex("#1EAAF0").expect("color parsed");
    assert_eq!(color.lighten(0.0), color);
}

#[test]
fn lighten_with_factor_one_yields_white() {
    let color = Rgb::from_hex("#1EAAF0").expect("color parsed");
    assert_eq!(color.lighten(1.0), Rgb::from_hex("#FFFFFF").expect("white parsed"));
}

#[test]
fn lighten_moves_channels_toward_white() {
    let color = Rgb::from_hex("#000000").expect("color parsed");
    assert_eq!(color.lighten(0.5).to_string(), "#808080");
}

#[test]
fn lighten_clamps_out_of_range_factors() {
    let color = Rgb::from_hex("#336699").expect("color parsed");
    assert_eq!(color.lighten(-2.0), color);
    assert_eq!(color.lighten(5.0).to_string(), "#FFFFFF");
}

#[test]
fn malformed_hex_colors_are_rejected() {
    for input in ["a9a9a9", "#12345", "#GGGGGG", "#1234567", ""] {
        let error = Rgb::from_hex(input).expect_err("malformed color");
        assert!(matches!(error, ToolError::InvalidColor(_)));
    }
}

#[test]
fn rgb_displays_as_uppercase_hex() {
    let color = Rgb::from_hex("#a9a9a9").expect("color parsed");
    assert_eq!(color.to_string(), "#A9A9A9");
}

#[test]
fn style_identity_is_structural() {
    let first = StyleSet::new().bold().text_size(8).angle();
    let second = StyleSet::new().angle().text_size(8).bold();
    assert_eq!(first, second);

    let mut styles = HashSet::new();
    styles.insert(first);
    styles.insert(second);
    assert_eq!(styles.len(), 1, "identical styles must deduplicate");
}

#[test]
fn differing_directives_break_style_equality() {
    let small = StyleSet::new().text_size(8);
    let large = StyleSet::new().text_size(10);
    assert_ne!(small, large);
    assert_ne!(StyleSet::new(), StyleSet::new().bold());
}
