#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub ch: usize,
}

/// Seam between the extension and whatever buffer the host editor uses. The
/// extension only ever reads text and hands back replacement text through
/// this trait; it never touches the host's widgets or performs I/O.
pub trait EditorBuffer {
    fn line_count(&self) -> usize;
    fn line(&self, ix: usize) -> Option<&str>;
    fn set_line(&mut self, ix: usize, text: String);
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str);
    fn cursor(&self) -> Cursor;
    fn set_cursor(&mut self, cursor: Cursor);
}

/// In-memory line buffer for tests and hosts without a native buffer model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    cursor: Cursor,
}

impl LineBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cursor: Cursor::default(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn clamp(&self, cursor: Cursor) -> Cursor {
        let line = cursor.line.min(self.lines.len().saturating_sub(1));
        let ch = cursor.ch.min(self.lines[line].len());
        Cursor { line, ch }
    }
}

impl EditorBuffer for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, ix: usize) -> Option<&str> {
        self.lines.get(ix).map(String::as_str)
    }

    fn set_line(&mut self, ix: usize, text: String) {
        if let Some(line) = self.lines.get_mut(ix) {
            *line = text;
        }
        self.cursor = self.clamp(self.cursor);
    }

    fn value(&self) -> String {
        self.lines.join("\n")
    }

    fn set_value(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = self.clamp(self.cursor);
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = self.clamp(cursor);
    }
}
