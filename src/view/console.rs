//! Terminal implementation of the presentation facade

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::style::{Color, Stylize};

use super::View;
use crate::error::{RolodexError, RolodexResult};

/// Console front end over a reader/writer pair
pub struct ConsoleView<R, W> {
    input: R,
    output: W,
    colored: bool,
}

impl ConsoleView<StdinLock<'static>, Stdout> {
    /// Console view over the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            colored: true,
        }
    }

    /// Disable colour codes in the output
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Consume the view, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    // Write errors on display lines are ignored
    fn write_line(&mut self, line: &str) {
        let _ = writeln!(self.output, "{}", line);
    }
}

impl<R: BufRead, W: Write> View for ConsoleView<R, W> {
    fn display(&mut self, text: &str) {
        self.write_line(text);
    }

    fn display_error(&mut self, text: &str) {
        let line = self.paint(&format!("Error: {}", text), Color::Red);
        self.write_line(&line);
    }

    fn prompt(&mut self, text: &str) -> RolodexResult<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RolodexError::Io("Unexpected end of input".into()));
        }
        Ok(line.trim().to_string())
    }

    fn menu(&mut self, title: &str, options: &[(&str, &str)]) -> RolodexResult<String> {
        let title = self.paint(title, Color::Cyan);
        self.write_line(&title);
        for (key, label) in options {
            let line = format!("{}. {}", self.paint(key, Color::Yellow), label);
            self.write_line(&line);
        }
        let question = self.paint("Please choose an option: ", Color::Cyan);
        self.prompt(&question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn view(input: &str) -> ConsoleView<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleView::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()).plain()
    }

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let mut view = view("  Alice \nnext\n");
        assert_eq!(view.prompt("Name: ").unwrap(), "Alice");
        assert_eq!(view.prompt("Again: ").unwrap(), "next");

        let output = String::from_utf8(view.into_output()).unwrap();
        assert_eq!(output, "Name: Again: ");
    }

    #[test]
    fn test_prompt_at_end_of_input() {
        let mut view = view("");
        assert!(matches!(view.prompt("Name: "), Err(RolodexError::Io(_))));
    }

    #[test]
    fn test_confirm() {
        let mut view = view("yes\nno\n");
        assert!(view.confirm("Continue?").unwrap());
        assert!(!view.confirm("Continue?").unwrap());

        let output = String::from_utf8(view.into_output()).unwrap();
        assert!(output.contains("Continue? (yes/no): "));
    }

    #[test]
    fn test_menu_lists_options() {
        let mut view = view("2\n");
        let choice = view
            .menu("Main Menu", &[("1", "Add"), ("2", "Delete")])
            .unwrap();
        assert_eq!(choice, "2");

        let output = String::from_utf8(view.into_output()).unwrap();
        assert!(output.starts_with("Main Menu\n1. Add\n2. Delete\n"));
        assert!(output.ends_with("Please choose an option: "));
    }

    #[test]
    fn test_display_error() {
        let mut view = ConsoleView::new(Cursor::new(Vec::new()), Vec::new());
        view.display_error("boom");
        let output = String::from_utf8(view.into_output()).unwrap();
        assert!(output.contains("Error: boom"));
    }
}
