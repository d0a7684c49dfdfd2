use indexmap::IndexMap;

/// Inline `key:value` pairs attached to a task, in first-seen order
pub type Metadata = IndexMap<String, String>;

/// Deepest heading level a section may have
pub const MAX_SECTION_LEVEL: u8 = 6;

/// A heading line: `## Title`
#[derive(Debug, Clone)]
pub struct Section {
    /// Heading depth, 1..=6
    pub level: u8,
    pub title: String,

    /// 1-based line in the source file, if this section was parsed
    pub line: Option<usize>,
}

impl Section {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Section {
            level,
            title: title.into(),
            line: None,
        }
    }

    /// The heading as it appears in the file, e.g. `## Backlog`
    pub fn heading(&self) -> String {
        format!("{} {}", "#".repeat(self.level as usize), self.title)
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.title == other.title
    }
}

impl Eq for Section {}

/// A checkbox line: `- [x] Description key:value`
#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub completed: bool,
    pub metadata: Metadata,

    /// 1-based line in the source file, if this task was parsed
    pub line: Option<usize>,
}

impl Task {
    /// Create an incomplete task with no metadata
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            completed: false,
            metadata: Metadata::new(),
            line: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.completed { 'x' } else { ' ' }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.completed == other.completed
            && self.metadata == other.metadata
    }
}

impl Eq for Task {}

/// One entry of an outline. Hierarchy is not stored here: a section owns
/// whatever follows it positionally (see `Outline::subtree_end`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Section(Section),
    Task(Task),
}

impl Item {
    pub fn section(level: u8, title: impl Into<String>) -> Self {
        Item::Section(Section::new(level, title))
    }

    pub fn task(description: impl Into<String>) -> Self {
        Item::Task(Task::new(description))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Item::Section(_))
    }

    /// Heading level for sections, `None` for tasks
    pub fn level(&self) -> Option<u8> {
        match self {
            Item::Section(s) => Some(s.level),
            Item::Task(_) => None,
        }
    }

    /// The searchable text: section title or task description
    pub fn text(&self) -> &str {
        match self {
            Item::Section(s) => &s.title,
            Item::Task(t) => &t.description,
        }
    }

    /// Source line recorded at parse time. Stale after mutations.
    pub fn line(&self) -> Option<usize> {
        match self {
            Item::Section(s) => s.line,
            Item::Task(t) => t.line,
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            Item::Task(t) => Some(t),
            Item::Section(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_source_line() {
        let mut parsed = Task::new("Write docs");
        parsed.line = Some(12);
        assert_eq!(Item::Task(parsed), Item::task("Write docs"));

        let mut heading = Section::new(2, "Backlog");
        heading.line = Some(3);
        assert_eq!(Item::Section(heading), Item::section(2, "Backlog"));
    }

    #[test]
    fn metadata_equality_is_order_insensitive() {
        let mut a = Metadata::new();
        a.insert("due".into(), "2025-08-05".into());
        a.insert("priority".into(), "high".into());
        let mut b = Metadata::new();
        b.insert("priority".into(), "high".into());
        b.insert("due".into(), "2025-08-05".into());
        assert_eq!(
            Task::new("t").with_metadata(a),
            Task::new("t").with_metadata(b)
        );
    }

    #[test]
    fn heading_renders_hashes() {
        assert_eq!(Section::new(3, "Later").heading(), "### Later");
    }

    #[test]
    fn text_and_level_per_variant() {
        let s = Item::section(1, "Work");
        let t = Item::task("Ship it");
        assert_eq!(s.text(), "Work");
        assert_eq!(t.text(), "Ship it");
        assert_eq!(s.level(), Some(1));
        assert_eq!(t.level(), None);
        assert!(s.as_task().is_none());
        assert_eq!(t.as_task().map(|t| t.checkbox_char()), Some(' '));
    }
}
