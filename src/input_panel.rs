// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::pagination::{Paginator, ValidationError};

pub const HELP_TEXT: &str = "commands: a <url> apply | <enter>/j down | k up | g top | G bottom | q quit";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(String),
    ScrollDown,
    ScrollUp,
    Top,
    Bottom,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" | "j" | "n" => Command::ScrollDown,
            "k" | "p" => Command::ScrollUp,
            "g" => Command::Top,
            "G" => Command::Bottom,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            "a" | "apply" => Command::Apply(rest.to_string()),
            _ if head.starts_with("http://") || head.starts_with("https://") => {
                Command::Apply(line.to_string())
            }
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// The endpoint field and the inline message shown next to it.
#[derive(Debug, Default)]
pub struct InputPanel {
    endpoint: String,
    notice: String,
}

impl InputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit `endpoint`. The field only changes when the session does.
    pub fn apply(&mut self, paginator: &mut Paginator, endpoint: &str) -> Result<(), ValidationError> {
        self.notice.clear();
        paginator.submit(endpoint)?;
        self.endpoint = endpoint.trim().to_string();
        Ok(())
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = notice.into();
    }

    /// Session errors take precedence over local notices.
    pub fn message<'a>(&'a self, paginator: &'a Paginator) -> &'a str {
        if !paginator.error().is_empty() {
            paginator.error()
        } else {
            &self.notice
        }
    }

    pub fn render(&self, paginator: &Paginator) -> String {
        let mut out = format!("[{}] ", self.endpoint);
        let message = self.message(paginator);
        if !message.is_empty() {
            out.push_str(message);
        }
        out
    }
}
