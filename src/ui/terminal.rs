//! Line-oriented terminal frontend: events are printed, menus are numbered
//! and answered on stdin.

use crossterm::style::{style, Color, Stylize};
use std::io::{BufRead, Write};
use textcraft::core::{Frontend, GameEvent, Menu, Tone};

pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn tone_color(tone: Tone) -> Option<Color> {
        match tone {
            Tone::Plain => None,
            Tone::Good => Some(Color::Green),
            Tone::Bad => Some(Color::Red),
            Tone::Warning => Some(Color::Yellow),
        }
    }

    fn line(&mut self, text: &str, tone: Tone) {
        let result = match Self::tone_color(tone).filter(|_| self.color) {
            Some(color) => writeln!(self.output, "{}", style(text).with(color)),
            None => writeln!(self.output, "{}", text),
        };
        if let Err(e) = result {
            log::warn!("failed to write to terminal: {}", e);
        }
    }

    fn print_menu(&mut self, menu: &Menu) {
        if let Some(prompt) = &menu.prompt {
            self.line(prompt, Tone::Plain);
        }
        for (i, option) in menu.options.iter().enumerate() {
            self.line(&format!("{}: {}", i + 1, option), Tone::Plain);
        }
        // Prompt marker stays on the input line
        let _ = write!(self.output, "> ");
        let _ = self.output.flush();
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn present(&mut self, events: &[GameEvent]) {
        for event in events {
            self.line(&event.to_string(), event.tone());
        }
        self.line("", Tone::Plain);
    }

    /// Re-asks until a listed number is entered. End of input picks the last
    /// option, which is always the way out: Quit, Cancel, Flee, Ignore or No.
    fn choose(&mut self, menu: &Menu) -> usize {
        let last = menu.options.len().saturating_sub(1);
        loop {
            self.print_menu(menu);
            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                Ok(0) | Err(_) => {
                    log::debug!("input closed, choosing option {}", last + 1);
                    return last;
                }
                Ok(_) => {}
            }
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=menu.options.len()).contains(&n) => return n - 1,
                _ => self.line("Please enter one of the listed numbers.", Tone::Warning),
            }
        }
    }
}
