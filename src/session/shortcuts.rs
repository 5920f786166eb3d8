//! Keyboard shortcuts recognised by the builder

use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Shortcut {
    Undo,
    Redo,
    Save,
}

impl Shortcut {
    /// Map a key press to a shortcut.
    ///
    /// `modifier` is Ctrl on Windows/Linux and Cmd on macOS. Ctrl+Shift+Z and
    /// Ctrl+Y both redo.
    pub fn from_key(key: &str, modifier: bool, shift: bool) -> Option<Self> {
        if !modifier {
            return None;
        }

        match (key.to_ascii_lowercase().as_str(), shift) {
            ("z", false) => Some(Shortcut::Undo),
            ("z", true) | ("y", false) => Some(Shortcut::Redo),
            ("s", false) => Some(Shortcut::Save),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_mapping() {
        assert_eq!(Shortcut::from_key("z", true, false), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_key("Z", true, true), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key("y", true, false), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key("s", true, false), Some(Shortcut::Save));
    }

    #[test]
    fn test_plain_keys_ignored() {
        assert_eq!(Shortcut::from_key("z", false, false), None);
        assert_eq!(Shortcut::from_key("s", false, true), None);
        assert_eq!(Shortcut::from_key("x", true, false), None);
        assert_eq!(Shortcut::from_key("y", true, true), None);
    }
}
