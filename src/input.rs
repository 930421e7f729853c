use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Quit,
}

pub fn parse_viewer_command(key_code: &KeyCode) -> Option<ViewerCommand> {
    match key_code {
        KeyCode::Up => Some(ViewerCommand::ScrollUp),
        KeyCode::Down => Some(ViewerCommand::ScrollDown),
        KeyCode::PageUp => Some(ViewerCommand::PageUp),
        KeyCode::PageDown => Some(ViewerCommand::PageDown),
        KeyCode::Home => Some(ViewerCommand::Top),
        KeyCode::End => Some(ViewerCommand::Bottom),
        KeyCode::Esc => Some(ViewerCommand::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'k' => Some(ViewerCommand::ScrollUp),
            'j' => Some(ViewerCommand::ScrollDown),
            'g' => Some(ViewerCommand::Top),
            'q' => Some(ViewerCommand::Quit),
            _ => None,
        },
        _ => None,
    }
}
