//! Terminal front-end
//!
//! Line-oriented widgets over stdin/stdout. A reader thread turns stdin
//! into a channel of lines, so a streaming response can check for Enter
//! between serial polls without blocking.
//!
//! ```text
//!  stdin ──► reader thread ──► mpsc ──► Terminal ──► Screen ──► TextBackend ──► stdout
//! ```

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use ghostlink_core::menu::Menu;
use ghostlink_core::traits::widgets::MAX_INPUT_LEN;
use ghostlink_core::traits::{
    DialogOutcome, DialogWidget, FilePicker, MenuWidget, PromptWidget, ResponseSurface, Ui,
};
use ghostlink_display::{render, DisplayBackend, DisplayError, MenuView, Screen, TextLog};
use ghostlink_hal::EntryName;
use log::{trace, warn};

/// Visible rows
pub const TERM_ROWS: usize = 20;

/// Visible columns
pub const TERM_COLS: usize = 80;

type TermScreen = Screen<TERM_ROWS, TERM_COLS>;
type TermLog = TextLog<512, TERM_COLS>;

const MENU_HINT: &str = "[Enter] select  [j/k] move  [number] jump  [b] back";
const CANCEL_WORD: &str = ":q";

/// Spawn a thread forwarding stdin lines; the channel closes at EOF
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        trace!("stdin closed");
    });
    rx
}

/// Character backend writing whole frames to a stream
///
/// With `ansi` set, each frame clears the terminal and highlights are drawn
/// in reverse video. Without it frames are just printed one after another.
pub struct TextBackend<W> {
    out: W,
    ansi: bool,
    rows: Vec<String>,
    inverted: Vec<Option<(u8, u8)>>,
}

impl<W: Write> TextBackend<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            rows: vec![String::new(); TERM_ROWS],
            inverted: vec![None; TERM_ROWS],
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn frame_line(&self, row: usize) -> String {
        let line = self.rows[row].trim_end();
        match self.inverted[row] {
            Some((start, end)) if self.ansi => {
                let chars: Vec<char> = line.chars().collect();
                let end = (end as usize).min(chars.len());
                let start = (start as usize).min(end);
                let before: String = chars[..start].iter().collect();
                let marked: String = chars[start..end].iter().collect();
                let after: String = chars[end..].iter().collect();
                format!("{before}\x1b[7m{marked}\x1b[0m{after}")
            }
            _ => line.to_string(),
        }
    }
}

impl<W: Write> DisplayBackend for TextBackend<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.rows.iter_mut().for_each(String::clear);
        self.inverted.iter_mut().for_each(|i| *i = None);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let line = self
            .rows
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        let mut chars: Vec<char> = line.chars().collect();
        let col = col as usize;
        if chars.len() < col {
            chars.resize(col, ' ');
        }
        chars.truncate(col);
        chars.extend(text.chars());
        *line = chars.into_iter().collect();
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let slot = self
            .inverted
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        *slot = Some((start_col, end_col));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut frame = String::new();
        if self.ansi {
            frame.push_str("\x1b[2J\x1b[H");
        }
        let used = self
            .rows
            .iter()
            .rposition(|r| !r.trim_end().is_empty())
            .map_or(0, |last| last + 1);
        for row in 0..used {
            frame.push_str(&self.frame_line(row));
            frame.push('\n');
        }
        self.out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u8, u8) {
        (TERM_COLS as u8, TERM_ROWS as u8)
    }
}

/// Terminal user interface: every widget plus the response surface
pub struct Terminal<W> {
    input: Receiver<String>,
    backend: TextBackend<W>,
    screen: TermScreen,
    log: TermLog,
}

impl<W: Write> Terminal<W> {
    pub fn new(input: Receiver<String>, out: W, ansi: bool) -> Self {
        Self {
            input,
            backend: TextBackend::new(out, ansi),
            screen: TermScreen::new(),
            log: TermLog::new(),
        }
    }

    /// The response log of the last command
    pub fn log(&self) -> &TermLog {
        &self.log
    }

    #[cfg(test)]
    fn writer(&mut self) -> &mut W {
        self.backend.writer()
    }

    fn draw(&mut self) {
        if let Err(e) = render(&mut self.screen, &mut self.backend) {
            warn!("terminal draw failed: {:?}", e);
        }
    }

    fn say(&mut self, text: &str) {
        let out = self.backend.writer();
        if writeln!(out, "{text}").and_then(|_| out.flush()).is_err() {
            warn!("terminal write failed");
        }
    }

    /// Next input line; `None` once stdin is closed
    fn read_line(&mut self) -> Option<String> {
        self.input
            .recv()
            .ok()
            .map(|l| l.trim_end_matches(['\r', '\n']).to_string())
    }

    fn choose<'a, I>(&mut self, header: &'a str, items: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut view = MenuView::new(header, items);
        loop {
            view.render(&mut self.screen);
            self.draw();
            self.say(MENU_HINT);

            let line = self.read_line()?;
            match line.trim() {
                "" if view.items().is_empty() => return None,
                "" => return Some(view.selected()),
                "j" | "n" | "+" => view.next(),
                "k" | "p" | "-" => view.prev(),
                "b" | "q" | "back" => return None,
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && view.select(n - 1) => return Some(n - 1),
                    _ => self.say("?"),
                },
            }
        }
    }

    fn redraw_log(&mut self) {
        self.log.render_into(&mut self.screen);
        self.draw();
    }
}

impl<W: Write> MenuWidget for Terminal<W> {
    fn show(&mut self, menu: &Menu) -> Option<usize> {
        self.choose(menu.header, menu.labels())
    }
}

impl<W: Write> PromptWidget for Terminal<W> {
    fn prompt(
        &mut self,
        header: &str,
        default: &str,
    ) -> Option<heapless::String<MAX_INPUT_LEN>> {
        self.say(&format!("{header} ({CANCEL_WORD} cancels):"));
        let line = self.read_line()?;
        if line == CANCEL_WORD {
            return None;
        }
        let text = if line.is_empty() { default } else { line.as_str() };

        let mut value = heapless::String::new();
        for c in text.chars() {
            if value.push(c).is_err() {
                warn!("input cut to {} bytes", MAX_INPUT_LEN);
                break;
            }
        }
        Some(value)
    }
}

impl<W: Write> DialogWidget for Terminal<W> {
    fn confirm(&mut self, header: &str, text: &str) -> DialogOutcome {
        self.say(&format!("{header}: {text} [Enter] OK  [c] Cancel"));
        match self.read_line() {
            Some(line) if matches!(line.trim(), "c" | "C" | "cancel") => DialogOutcome::Cancel,
            _ => DialogOutcome::Confirm,
        }
    }

    fn message(&mut self, header: &str, text: &str) {
        self.say(&format!("{header}: {text} [Enter]"));
        let _ = self.read_line();
    }
}

impl<W: Write> FilePicker for Terminal<W> {
    fn pick(&mut self, header: &str, entries: &[EntryName]) -> Option<usize> {
        self.choose(header, entries.iter().map(EntryName::as_str))
    }
}

impl<W: Write> ResponseSurface for Terminal<W> {
    fn open(&mut self, header: &str) {
        // Type-ahead must not dismiss the new response
        while self.input.try_recv().is_ok() {}
        self.log.open(&format!("{header}  [Enter] back"));
        self.redraw_log();
    }

    fn append(&mut self, bytes: &[u8]) {
        self.log.append(bytes);
        self.redraw_log();
    }

    fn is_open(&mut self) -> bool {
        if !self.log.is_open() {
            return false;
        }
        match self.input.try_recv() {
            Err(TryRecvError::Empty) => true,
            Ok(_) | Err(TryRecvError::Disconnected) => {
                self.log.close();
                false
            }
        }
    }
}

impl<W: Write> Ui for Terminal<W> {
    type Surface = Self;

    fn surface(&mut self) -> &mut Self {
        self
    }
}
