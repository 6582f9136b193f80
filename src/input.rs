use macroquad::prelude::{is_key_pressed, KeyCode};

/// Commands that act on the falling piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Everything a key press can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Start,
    ToggleMusic,
    CycleMusicMode,
    Quit,
}

const BINDINGS: [(KeyCode, Action); 10] = [
    (KeyCode::Left, Action::Game(Command::MoveLeft)),
    (KeyCode::Right, Action::Game(Command::MoveRight)),
    (KeyCode::Down, Action::Game(Command::SoftDrop)),
    (KeyCode::Up, Action::Game(Command::Rotate)),
    (KeyCode::Enter, Action::Start),
    (KeyCode::KpEnter, Action::Start),
    (KeyCode::Space, Action::Start),
    (KeyCode::M, Action::ToggleMusic),
    (KeyCode::Tab, Action::CycleMusicMode),
    (KeyCode::Escape, Action::Quit),
];

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, action)| action)
}

/// Actions for keys that went down this frame, one per key event.
pub fn pressed_actions() -> Vec<Action> {
    BINDINGS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, action)| action)
        .collect()
}
