use three_d::{Event, Key};

use crate::game::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::ArrowUp => Some(Command::Steer(Direction::Up)),
            Key::ArrowDown => Some(Command::Steer(Direction::Down)),
            Key::ArrowLeft => Some(Command::Steer(Direction::Left)),
            Key::ArrowRight => Some(Command::Steer(Direction::Right)),
            Key::Escape => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Commands for this frame's key presses, in arrival order.
pub fn commands(events: &[Event]) -> Vec<Command> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::KeyPress { kind, .. } => Command::from_key(*kind),
            _ => None,
        })
        .collect()
}
