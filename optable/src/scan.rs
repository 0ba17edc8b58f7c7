use crate::table::Handler;

pub const COMMENT_OPEN: &str = "/*";
pub const COMMENT_CLOSE: &str = "*/";

/// Lines shorter than this never supply a pattern or a handler.
pub const MIN_CAPTURE_LEN: usize = 4;

// ----------------------------------------------------------------------------
// Entry

/// One (pattern, handler) pair found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub pattern: String,
    pub handler: Handler,
    /// Index of the line the pattern was taken from
    pub line: usize,
}

/// A comment block that never produced a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incomplete {
    /// Index of the line that opened the block
    pub line: usize,
    pub reason: Reason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Comment closed before any pattern line
    NoPattern,
    /// Follow-up line carries no `name(`
    NoHandler,
    /// Another comment opened first
    Interrupted,
    /// Input ended
    Unterminated,
}

// ----------------------------------------------------------------------------
// Scanner

#[derive(Debug, Clone)]
struct Captured {
    pattern: String,
    open: usize,
    line: usize,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    AwaitingPatternLine {
        open: usize,
    },
    PatternCaptured(Captured),
    AwaitingHandlerLine(Captured),
}

/// Extracts pairs from the two-line comment idiom:
///
/// ```text
/// /*
/// 00e0 clears the screen
/// */
/// void chip8_clear_screen(chip8_t* chip, opcode_params_t* params);
/// ```
///
/// The pattern may also follow `/*` on the same line, and the handler may
/// appear inside the comment (`/* 00e0 clear screen` / `  chip8_cls(p)` / `*/`).
#[derive(Debug, Default)]
pub struct Scanner {
    state: State,
    incomplete: Vec<Incomplete>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, idx: usize, raw: &str) -> Option<Entry> {
        let line = raw.trim_end_matches(['\r', '\n']);
        match std::mem::take(&mut self.state) {
            State::Idle => {
                if let Some(rest) = after(line, COMMENT_OPEN) {
                    self.open(idx, rest);
                }
                None
            }
            State::AwaitingPatternLine { open } => {
                if long_enough(line) {
                    match line.split_whitespace().next() {
                        Some(token) if !token.starts_with(COMMENT_CLOSE) => {
                            self.capture(open, idx, token, line)
                        }
                        _ => self.abandon(open, Reason::NoPattern),
                    }
                } else if line.contains(COMMENT_CLOSE) {
                    self.abandon(open, Reason::NoPattern);
                } else {
                    self.state = State::AwaitingPatternLine { open };
                }
                None
            }
            State::PatternCaptured(captured) => {
                if let Some(rest) = after(line, COMMENT_OPEN) {
                    self.abandon(captured.open, Reason::Interrupted);
                    self.open(idx, rest);
                    None
                } else if long_enough(line) && is_bare_call(line) {
                    self.emit(captured, line)
                } else if line.contains(COMMENT_CLOSE) {
                    self.state = State::AwaitingHandlerLine(captured);
                    None
                } else {
                    self.state = State::PatternCaptured(captured);
                    None
                }
            }
            State::AwaitingHandlerLine(captured) => {
                if long_enough(line) {
                    let entry = self.emit(captured, line);
                    if entry.is_none() {
                        if let Some(rest) = after(line, COMMENT_OPEN) {
                            self.open(idx, rest);
                        }
                    }
                    entry
                } else {
                    if let Some(rest) = after(line, COMMENT_OPEN) {
                        self.abandon(captured.open, Reason::NoHandler);
                        self.open(idx, rest);
                    } else {
                        self.state = State::AwaitingHandlerLine(captured);
                    }
                    None
                }
            }
        }
    }

    /// Close the input. A block still in progress is recorded as incomplete.
    pub fn finish(&mut self) {
        match std::mem::take(&mut self.state) {
            State::Idle => {}
            State::AwaitingPatternLine { open } => self.abandon(open, Reason::Unterminated),
            State::PatternCaptured(c) | State::AwaitingHandlerLine(c) => {
                self.abandon(c.open, Reason::Unterminated)
            }
        }
    }

    pub fn incomplete(&self) -> &[Incomplete] {
        &self.incomplete
    }

    fn open(&mut self, idx: usize, rest: &str) {
        if long_enough(rest) {
            match rest.split_whitespace().next() {
                Some(token) if token.starts_with(COMMENT_CLOSE) => {
                    self.abandon(idx, Reason::NoPattern);
                    return;
                }
                Some(token) => {
                    self.capture(idx, idx, token, rest);
                    return;
                }
                None => {}
            }
        }
        self.state = State::AwaitingPatternLine { open: idx };
    }

    fn capture(&mut self, open: usize, idx: usize, token: &str, line: &str) {
        let captured = Captured {
            pattern: token.to_string(),
            open,
            line: idx,
        };
        self.state = match after(line, token) {
            Some(rest) if rest.contains(COMMENT_CLOSE) => State::AwaitingHandlerLine(captured),
            _ => State::PatternCaptured(captured),
        };
    }

    fn emit(&mut self, captured: Captured, line: &str) -> Option<Entry> {
        match handler_name(line) {
            Some(name) => Some(Entry {
                pattern: captured.pattern,
                handler: Handler::new(name),
                line: captured.line,
            }),
            None => {
                self.abandon(captured.open, Reason::NoHandler);
                None
            }
        }
    }

    fn abandon(&mut self, line: usize, reason: Reason) {
        self.incomplete.push(Incomplete { line, reason });
        self.state = State::Idle;
    }
}

fn long_enough(text: &str) -> bool {
    text.trim().chars().count() >= MIN_CAPTURE_LEN
}

fn after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|pos| &line[pos + marker.len()..])
}

/// Handler line inside a comment: `  chip8_cls(params)` and nothing else.
/// Prose such as `at position (vx, vy)` waits for the declaration after `*/`.
fn is_bare_call(line: &str) -> bool {
    let text = line.trim().trim_end_matches(';');
    let Some((head, tail)) = text.split_once('(') else {
        return false;
    };
    !head.is_empty()
        && !head.starts_with(|c: char| c.is_ascii_digit())
        && head.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && tail.ends_with(')')
}

/// `void chip8_jump(chip8_t* chip, ...)` -> `chip8_jump`
fn handler_name(line: &str) -> Option<&str> {
    let (head, _) = line.split_once('(')?;
    head.split_whitespace().last()
}

/// Run a scanner over `lines`, yielding pairs as they complete.
pub fn scan<I, S>(lines: I) -> impl Iterator<Item = Entry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    lines
        .into_iter()
        .enumerate()
        .filter_map(move |(idx, line)| scanner.feed(idx, line.as_ref()))
}
