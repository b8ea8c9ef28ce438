//! Six-box code entry model.
//!
//! Captures the multi-box input affordance (auto-advance, backspace,
//! arrows, paste) without depending on any widget, so the behavior is
//! testable on its own. The session reads the entered code from here.

/// Number of code boxes / digits.
pub const CODE_LEN: usize = 6;

/// One single-digit box per code position, with a focus cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeEntry {
    boxes: [Option<char>; CODE_LEN],
    cursor: usize,
}

impl CodeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused box index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Type a character into the focused box. Non-digits are ignored;
    /// a digit fills the box and advances focus to the next one.
    pub fn input(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        self.boxes[self.cursor] = Some(c);
        if self.cursor + 1 < CODE_LEN {
            self.cursor += 1;
        }
    }

    /// Clear the focused box, or move focus back when it is already empty.
    pub fn backspace(&mut self) {
        if self.boxes[self.cursor].is_some() {
            self.boxes[self.cursor] = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn arrow_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn arrow_right(&mut self) {
        if self.cursor + 1 < CODE_LEN {
            self.cursor += 1;
        }
    }

    /// Distribute a pasted string across the boxes in order, keeping only
    /// digits and truncating to the code length. Focus lands on the last
    /// filled box. Pastes without any digit are ignored.
    pub fn paste(&mut self, text: &str) {
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LEN)
            .collect();
        if digits.is_empty() {
            return;
        }
        for (i, d) in digits.iter().enumerate() {
            self.boxes[i] = Some(*d);
        }
        self.cursor = digits.len() - 1;
    }

    /// Concatenation of the filled boxes, in order.
    pub fn value(&self) -> String {
        self.boxes.iter().flatten().collect()
    }

    /// Replace the whole entry with the given code.
    pub fn set_code(&mut self, code: &str) {
        self.clear();
        self.paste(code);
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn is_complete(&self) -> bool {
        self.boxes.iter().all(Option::is_some)
    }
}
