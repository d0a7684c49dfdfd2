use crate::model::item::Item;
use crate::model::outline::Outline;
use crate::parse::line_parser::{LineKind, classify};

/// Parse an outline file from its source text.
///
/// Returns the outline and the 1-based line numbers of non-blank lines that
/// were neither a section nor a task. Those lines are dropped; they never
/// stop the rest of the file from parsing.
pub fn parse_outline(source: &str) -> (Outline, Vec<usize>) {
    let mut items = Vec::new();
    let mut dropped = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        match classify(line) {
            LineKind::Section(mut section) => {
                section.line = Some(line_no);
                items.push(Item::Section(section));
            }
            LineKind::Task(mut task) => {
                task.line = Some(line_no);
                items.push(Item::Task(task));
            }
            LineKind::Ignored => {
                if !line.trim().is_empty() {
                    dropped.push(line_no);
                }
            }
        }
    }

    if !dropped.is_empty() {
        log::debug!("ignored {} unrecognized line(s): {:?}", dropped.len(), dropped);
    }

    (Outline::new(items), dropped)
}
