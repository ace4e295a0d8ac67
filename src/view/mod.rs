//! Presentation facade
//!
//! The interactive session talks to the user only through the [`View`]
//! trait: show a line, ask for a line, ask yes/no, or pick a menu entry.
//!
//! - [`ConsoleView`]: styled terminal I/O over any reader/writer pair
//! - [`ScriptedView`]: replays queued answers and records output

mod console;
mod scripted;

pub use console::ConsoleView;
pub use scripted::ScriptedView;

use crate::error::RolodexResult;

/// The operations the interactive session needs from a front end
pub trait View {
    /// Show a line of output
    fn display(&mut self, text: &str);

    /// Show an error message
    fn display_error(&mut self, text: &str);

    /// Request one line of input
    fn prompt(&mut self, text: &str) -> RolodexResult<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, text: &str) -> RolodexResult<bool> {
        let answer = self.prompt(&format!("{} (yes/no): ", text))?;
        Ok(is_yes(&answer))
    }

    /// Show a titled menu and return the chosen key
    fn menu(&mut self, title: &str, options: &[(&str, &str)]) -> RolodexResult<String>;
}

/// Whether an answer counts as "yes"
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes"));
        assert!(is_yes(" Y "));
        assert!(is_yes("YES"));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
        assert!(!is_yes("yess"));
    }
}
