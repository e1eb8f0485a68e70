// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

pub mod codes {
    /// Keys: pastel cyan / steel blue
    pub const KEY: u8 = 74;
    /// Comments: darker grey
    pub const COMMENT: u8 = 240;
    /// Line numbers and entry kinds: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str, colorize: bool) -> String {
    if colorize {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Colors for one output run, decided once.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    colorize: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            colorize: should_colorize(),
        }
    }

    pub fn plain() -> Self {
        Self { colorize: false }
    }

    pub fn key(&self, text: &str) -> String {
        paint(codes::KEY, text, self.colorize)
    }

    pub fn comment(&self, text: &str) -> String {
        paint(codes::COMMENT, text, self.colorize)
    }

    pub fn context(&self, text: &str) -> String {
        paint(codes::CONTEXT, text, self.colorize)
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
