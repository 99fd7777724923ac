use super::*;

fn state(text: &str, line: usize, buttons: bool) -> TypewriterState {
    TypewriterState {
        revealed_text: text.to_owned(),
        current_line_index: line,
        buttons_visible: buttons,
    }
}

#[test]
fn empty_text_renders_one_line_with_cursor() {
    let lines = render_lines(&TypewriterState::default());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "");
    assert!(lines[0].cursor);
}

#[test]
fn lines_get_their_styles() {
    let lines = render_lines(&state("Hello,\nWelcome to\nDOOFIO.SITE", 2, true));
    let styles: Vec<LineStyle> = lines.iter().map(|l| l.style).collect();
    assert_eq!(
        styles,
        vec![
            LineStyle::Plain,
            LineStyle::GradientPurpleBlueGreen,
            LineStyle::GradientGreenBluePurple
        ]
    );
    assert_eq!(LineStyle::for_line(7), LineStyle::Plain);
}

#[test]
fn cursor_only_on_last_line_when_it_is_current() {
    let lines = render_lines(&state("Hello,\nWel", 0, false));
    assert!(!lines[0].cursor);
    assert!(!lines[1].cursor);

    let lines = render_lines(&state("Hello,\nWelcome to", 1, false));
    assert!(!lines[0].cursor);
    assert!(lines[1].cursor);
}

#[test]
fn view_carries_static_content_and_toggles() {
    let view = render_view(&state("Hi", 0, false), true, false, Point::new(500.0, 200.0));
    assert_eq!(view.brand, "DOOFIO");
    assert_eq!(view.metadata.title, "DOOFIO");
    assert_eq!(view.actions[0].label, "Enter Site");
    assert_eq!(view.actions[1].action, NavAction::LearnMore);
    assert_eq!(view.status, "System Online • Ready to Connect");
    assert!(view.loaded);
    assert!(!view.actions_visible);
    assert_eq!(view.sound.tooltip, "Enable sounds");
    assert_eq!(view.dust_origin, Point::new(308.0, 8.0));

    let view = render_view(&state("Hi", 0, true), false, true, Point::ZERO);
    assert!(view.actions_visible);
    assert_eq!(view.sound.tooltip, "Mute sounds");
}

#[test]
fn view_serializes_for_hosts() {
    let view = render_view(&state("Hello,", 0, false), true, true, Point::ZERO);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["lines"][0]["text"], "Hello,");
    assert_eq!(json["lines"][0]["style"], "plain");
    assert_eq!(json["actions"][0]["variant"], "primary");
}
