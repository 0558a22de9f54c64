//! Key bindings: arrows move and drop, Q/W turn.

use crate::engine::Command;

/// Map a `KeyboardEvent.key` value to a command.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        "ArrowDown" => Some(Command::SoftDrop),
        "q" | "Q" => Some(Command::RotateCcw),
        "w" | "W" => Some(Command::RotateCw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(command_for_key("ArrowDown"), Some(Command::SoftDrop));
        assert_eq!(command_for_key("q"), Some(Command::RotateCcw));
        assert_eq!(command_for_key("W"), Some(Command::RotateCw));
    }

    #[test]
    fn unbound_keys() {
        for key in ["ArrowUp", " ", "Enter", "Escape", "e", ""] {
            assert_eq!(command_for_key(key), None, "{:?}", key);
        }
    }
}
