use crossterm::event::KeyCode;
use kf_backtest::input::{parse_viewer_command, ViewerCommand};

#[test]
fn parse_viewer_command_maps_navigation_keys() {
    assert_eq!(
        parse_viewer_command(&KeyCode::Up),
        Some(ViewerCommand::ScrollUp)
    );
    assert_eq!(
        parse_viewer_command(&KeyCode::Down),
        Some(ViewerCommand::ScrollDown)
    );
    assert_eq!(
        parse_viewer_command(&KeyCode::PageDown),
        Some(ViewerCommand::PageDown)
    );
    assert_eq!(parse_viewer_command(&KeyCode::Home), Some(ViewerCommand::Top));
    assert_eq!(parse_viewer_command(&KeyCode::End), Some(ViewerCommand::Bottom));
}

#[test]
fn parse_viewer_command_maps_case_insensitive_char_keys() {
    assert_eq!(
        parse_viewer_command(&KeyCode::Char('j')),
        Some(ViewerCommand::ScrollDown)
    );
    assert_eq!(
        parse_viewer_command(&KeyCode::Char('K')),
        Some(ViewerCommand::ScrollUp)
    );
    assert_eq!(
        parse_viewer_command(&KeyCode::Char('Q')),
        Some(ViewerCommand::Quit)
    );
    assert_eq!(parse_viewer_command(&KeyCode::Esc), Some(ViewerCommand::Quit));
}

#[test]
fn parse_viewer_command_ignores_unbound_keys() {
    assert_eq!(parse_viewer_command(&KeyCode::Char('x')), None);
    assert_eq!(parse_viewer_command(&KeyCode::Tab), None);
}
