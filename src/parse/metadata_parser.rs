use crate::model::item::Metadata;

/// Result of parsing the text after a task's checkbox
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskContent {
    /// Plain words joined with single spaces
    pub description: String,
    pub metadata: Metadata,
}

/// A full task line: checkbox state plus content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub completed: bool,
    pub content: TaskContent,
}

/// Outcome of trying to read `key:value` at the cursor
#[derive(Debug, PartialEq, Eq)]
enum PairAttempt {
    Matched(String, String),
    NotAPair,
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    /// Letters, digits, `_`, `-`, `.`
    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Everything up to the next space or tab
    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ' ' && c != '\t') {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Scan a `"..."` value. The opening quote must be at the cursor.
    /// Returns `None` when the closing quote is missing.
    fn quoted(&mut self) -> Option<String> {
        self.bump();
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Some(value),
                '\\' if !self.at_end() => {
                    if let Some(next) = self.bump() {
                        value.push(match next {
                            'n' => '\n',
                            't' => '\t',
                            other => other,
                        });
                    }
                }
                other => value.push(other),
            }
        }
        None
    }

    /// `identifier ':' (quoted | identifier)`. Restores the cursor on failure.
    fn pair(&mut self) -> PairAttempt {
        let start = self.pos;
        let attempt = self.try_pair();
        if attempt == PairAttempt::NotAPair {
            self.pos = start;
        }
        attempt
    }

    fn try_pair(&mut self) -> PairAttempt {
        let key = self.identifier();
        if !key.starts_with(|c: char| c.is_alphabetic()) {
            return PairAttempt::NotAPair;
        }
        if !self.eat(':') {
            return PairAttempt::NotAPair;
        }
        let value = if self.peek() == Some('"') {
            self.quoted().unwrap_or_default()
        } else {
            self.identifier().to_string()
        };
        if value.is_empty() {
            return PairAttempt::NotAPair;
        }
        PairAttempt::Matched(key.to_string(), value)
    }
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// True if `key` would be read back as a metadata key
pub fn is_valid_key(key: &str) -> bool {
    key.starts_with(|c: char| c.is_alphabetic()) && key.chars().all(is_identifier_char)
}

/// Split task text into a description and inline `key:value` metadata.
///
/// Each whitespace-separated position is first tried as a pair; when that
/// fails the whole word becomes part of the description instead. Later
/// duplicate keys overwrite earlier ones.
pub fn parse_task_content(raw: &str) -> TaskContent {
    let mut cursor = Cursor::new(raw);
    let mut words: Vec<&str> = Vec::new();
    let mut metadata = Metadata::new();

    loop {
        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }
        match cursor.pair() {
            PairAttempt::Matched(key, value) => {
                metadata.insert(key, value);
            }
            PairAttempt::NotAPair => words.push(cursor.word()),
        }
    }

    TaskContent {
        description: words.join(" "),
        metadata,
    }
}

/// Parse a whole task line: `- [x] content`.
/// Returns `None` if the checkbox prefix is malformed.
pub fn parse_task_line(line: &str) -> Option<ParsedTask> {
    let mut cursor = Cursor::new(line.trim());

    if !cursor.eat('-') {
        return None;
    }
    cursor.skip_whitespace();
    if !cursor.eat('[') {
        return None;
    }
    let completed = match cursor.bump()? {
        'x' | 'X' => true,
        ' ' => false,
        _ => return None,
    };
    if !cursor.eat(']') {
        return None;
    }
    cursor.skip_whitespace();

    Some(ParsedTask {
        completed,
        content: parse_task_content(&cursor.input[cursor.pos..]),
    })
}
