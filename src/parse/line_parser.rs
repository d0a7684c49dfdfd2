use std::sync::LazyLock;

use regex::Regex;

use crate::model::item::{MAX_SECTION_LEVEL, Section, Task};
use crate::parse::metadata_parser::{parse_task_content, parse_task_line};

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid section regex"));

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[([xX ])\]\s+(.+)$").expect("valid task regex"));

/// What a single source line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Section(Section),
    Task(Task),
    /// Blank lines, prose, and anything malformed
    Ignored,
}

/// Classify one line of an outline file.
///
/// Only two shapes are recognized: `#`–`######` headings and `- [ ]` /
/// `- [x]` checkboxes. Everything else is `Ignored`; callers keep going.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim_end();
    if line.is_empty() {
        return LineKind::Ignored;
    }

    if let Some(caps) = SECTION_RE.captures(line) {
        let level = caps[1].len() as u8;
        debug_assert!(level <= MAX_SECTION_LEVEL);
        return LineKind::Section(Section::new(level, caps[2].trim()));
    }

    if let Some(caps) = TASK_RE.captures(line) {
        let parsed = parse_task_line(line);
        let (completed, content) = match parsed {
            Some(p) => (p.completed, p.content),
            None => (
                matches!(&caps[1], "x" | "X"),
                parse_task_content(&caps[2]),
            ),
        };
        return LineKind::Task(Task {
            description: content.description,
            completed,
            metadata: content.metadata,
            line: None,
        });
    }

    LineKind::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(level: u8, title: &str) -> LineKind {
        LineKind::Section(Section::new(level, title))
    }

    #[test]
    fn test_section_levels() {
        assert_eq!(classify("# Inbox"), section(1, "Inbox"));
        assert_eq!(classify("###### Deep"), section(6, "Deep"));
        assert_eq!(classify("##   Padded title   "), section(2, "Padded title"));
    }

    #[test]
    fn test_not_sections() {
        assert_eq!(classify("####### Seven"), LineKind::Ignored);
        assert_eq!(classify("#NoSpace"), LineKind::Ignored);
        assert_eq!(classify("# "), LineKind::Ignored);
        assert_eq!(classify(" # Indented"), LineKind::Ignored);
    }

    #[test]
    fn test_task_lines() {
        match classify("- [x] Ship release version:1.2.0") {
            LineKind::Task(t) => {
                assert!(t.completed);
                assert_eq!(t.description, "Ship release");
                assert_eq!(t.metadata.get("version").map(String::as_str), Some("1.2.0"));
            }
            other => panic!("expected task, got {other:?}"),
        }
        match classify("    - [ ] Indented task") {
            LineKind::Task(t) => {
                assert!(!t.completed);
                assert_eq!(t.description, "Indented task");
            }
            other => panic!("expected task, got {other:?}"),
        }
        assert!(matches!(classify("- [X] Upper"), LineKind::Task(t) if t.completed));

        // No-break space after the dash: only the regex accepts it
        match classify("-\u{a0}[x] a due:today") {
            LineKind::Task(t) => {
                assert!(t.completed);
                assert_eq!(t.description, "a");
                assert_eq!(t.metadata.get("due").map(String::as_str), Some("today"));
            }
            other => panic!("expected task, got {other:?}"),
        }
    }

    #[test]
    fn test_not_tasks() {
        for line in [
            "",
            "   ",
            "Just some prose",
            "- plain bullet",
            "- [] missing state",
            "- [~] unknown state",
            "- [ ]",
            "- [ ]    ",
            "-[ ] no space after dash",
            "- [ ]no space after bracket",
        ] {
            assert_eq!(classify(line), LineKind::Ignored, "line: {line:?}");
        }
    }
}
