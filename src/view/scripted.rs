//! Scripted implementation of the presentation facade

use std::collections::VecDeque;

use super::View;
use crate::error::{RolodexError, RolodexResult};

/// Front end that answers prompts from a queue and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedView {
    answers: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedView {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Lines shown so far, errors prefixed with `Error: `
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// All output joined by newlines
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl View for ScriptedView {
    fn display(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn display_error(&mut self, text: &str) {
        self.output.push(format!("Error: {}", text));
    }

    fn prompt(&mut self, _text: &str) -> RolodexResult<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| RolodexError::Io("No scripted input left".into()))
    }

    fn menu(&mut self, title: &str, _options: &[(&str, &str)]) -> RolodexResult<String> {
        self.output.push(title.to_string());
        self.prompt(title)
    }
}
