use crate::errors::ErrorKind;
use crate::history::{History, HistoryEntry};
use crate::parse;
use crate::store::{MemoryStore, Position, Store, WidgetState};
use crate::value::format_f64;

/// Function keys append their token plus an auto-opened bracket, so the
/// user never types a call by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
}

impl Function {
    /// The token appended to the buffer, without the bracket.
    pub fn token(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "√",
        }
    }
}

/// One discrete input event from a button press or key stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Clear,
    Backspace,
    Commit,
    Func(Function),
    /// Digits, the decimal point, brackets, `^` and the glyphs
    /// `+ × ÷ − π e`.
    Sym(char),
}

fn is_symbol(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '(' | ')' | '^' | '+' | '×' | '÷' | '−' | 'π' | 'e')
}

impl Key {
    /// Maps a button caption or keyboard key to an input event. Keyboard
    /// aliases follow the widget: `Enter` commits, `Escape` clears, and
    /// the ASCII operators arrive as their display glyphs. Anything
    /// outside the symbol space, the formula-panel toggle included, is
    /// `None` and must be ignored by the caller.
    pub fn from_label(label: &str) -> Option<Key> {
        let key = match label {
            "C" | "Escape" => Key::Clear,
            "⌫" | "Backspace" => Key::Backspace,
            "=" | "Enter" => Key::Commit,
            "sin" => Key::Func(Function::Sin),
            "cos" => Key::Func(Function::Cos),
            "tan" => Key::Func(Function::Tan),
            "log" => Key::Func(Function::Log),
            "ln" => Key::Func(Function::Ln),
            "√" => Key::Func(Function::Sqrt),
            "*" => Key::Sym('×'),
            "/" => Key::Sym('÷'),
            "-" => Key::Sym('−'),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if is_symbol(c) => Key::Sym(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Complete state of the input machine. The buffer is the expression
/// being built; the rest is display bookkeeping for the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub buffer: String,
    pub history: History,
    /// The expression behind the current result, shown as a label after a
    /// commit.
    pub last_expr: Option<String>,
    /// Error raised by the most recent commit, cleared by the next input.
    pub last_error: Option<ErrorKind>,
}

/// Applies one input event to a state. Pure: the given state is left
/// untouched, so every transition is testable in isolation. The returned
/// flag reports whether a commit succeeded, which is the cue to persist.
///
/// A failed commit leaves the buffer exactly as it was so the user can
/// correct it; a commit on an empty buffer does nothing at all.
pub fn step(state: &State, key: Key) -> (State, bool) {
    let mut next = state.clone();
    next.last_expr = None;
    next.last_error = None;

    match key {
        Key::Clear => next.buffer.clear(),
        Key::Backspace => {
            next.buffer.pop();
        }
        Key::Func(f) => {
            next.buffer.push_str(f.token());
            next.buffer.push('(');
        }
        Key::Sym(c) => next.buffer.push(c),
        Key::Commit => {
            if state.buffer.is_empty() {
                return (state.clone(), false);
            }
            match parse::evaluate(&state.buffer) {
                Ok(v) => {
                    next.history.push(HistoryEntry {
                        expr: state.buffer.clone(),
                        result: v,
                    });
                    next.buffer = format_f64(v);
                    next.last_expr = Some(state.buffer.clone());
                    return (next, true);
                }
                Err(e) => next.last_error = Some(e.kind()),
            }
        }
    }

    (next, false)
}

/// The input state machine plus its persistence collaborator. Processes
/// one event at a time to completion; nothing here ever panics across the
/// boundary, evaluation failures are absorbed into the error indicator.
pub struct Engine<S: Store> {
    state: State,
    position: Position,
    store: S,
}

impl Engine<MemoryStore> {
    pub fn new() -> Self {
        Engine::with_store(MemoryStore::default())
    }
}

impl Default for Engine<MemoryStore> {
    fn default() -> Self {
        Engine::new()
    }
}

impl<S: Store> Engine<S> {
    /// Restores history and window position from the collaborator.
    pub fn with_store(store: S) -> Self {
        let saved = store.load();
        Engine {
            state: State {
                history: History::from_entries(saved.history),
                ..Default::default()
            },
            position: saved.position,
            store,
        }
    }

    pub fn apply(&mut self, key: Key) {
        let (next, committed) = step(&self.state, key);
        self.state = next;
        if committed {
            self.persist();
        }
    }

    /// Applies a raw button caption or keyboard key. Unknown labels are
    /// ignored.
    pub fn apply_input(&mut self, label: &str) {
        if let Some(key) = Key::from_label(label) {
            self.apply(key);
        }
    }

    pub fn current_buffer(&self) -> &str {
        &self.state.buffer
    }

    /// Past evaluations, most recent first, at most five.
    pub fn history_snapshot(&self) -> &[HistoryEntry] {
        self.state.history.entries()
    }

    /// Loads a past expression back into the buffer without re-evaluating
    /// it.
    pub fn replay_from_history(&mut self, entry: &HistoryEntry) {
        self.state.buffer = entry.expr.clone();
        self.state.last_expr = None;
        self.state.last_error = None;
    }

    pub fn last_expr(&self) -> Option<&str> {
        self.state.last_expr.as_deref()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.state.last_error
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Called by the window glue when a drag ends; the new position is
    /// persisted together with the history.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Position { x, y };
        self.persist();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        self.store.save(&WidgetState {
            history: self.state.history.entries().to_vec(),
            position: self.position,
        });
    }
}
