//! Key mapping from terminal events to game actions.

use crate::types::{Bin, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters are matched case-insensitively. Key releases map to nothing.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(GameAction::CursorDown),
        KeyCode::Left | KeyCode::Char('h') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(GameAction::CursorRight),

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::ToggleSelection),
        KeyCode::Backspace | KeyCode::Char('x') => Some(GameAction::ClearSelection),

        // Bins
        KeyCode::Char('w') => Some(GameAction::ChooseBin(Bin::W)),
        KeyCode::Char('f') => Some(GameAction::ChooseBin(Bin::F)),
        KeyCode::Char('d') => Some(GameAction::ChooseBin(Bin::D)),
        KeyCode::Char('m') => Some(GameAction::ChooseBin(Bin::M)),

        // Rolodex
        KeyCode::Char(']') | KeyCode::Char('.') | KeyCode::Tab => Some(GameAction::NextRuleset),
        KeyCode::Char('[') | KeyCode::Char(',') | KeyCode::BackTab => Some(GameAction::PrevRuleset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
