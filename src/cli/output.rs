use serde::Serialize;

use crate::model::item::{Item, Metadata};
use crate::model::outline::Outline;
use crate::ops::search::SearchResult;
use crate::ops::visibility::hidden_count;
use crate::parse::{serialize_section, serialize_task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    /// 1-based id, as accepted by the CLI
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub score: f64,
    #[serde(flatten)]
    pub item: ItemJson,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(index: usize, item: &Item, collapsed: bool) -> ItemJson {
    match item {
        Item::Section(s) => ItemJson {
            id: index + 1,
            kind: "section",
            text: s.title.clone(),
            level: Some(s.level),
            completed: None,
            metadata: None,
            line: s.line,
            collapsed,
        },
        Item::Task(t) => ItemJson {
            id: index + 1,
            kind: "task",
            text: t.description.clone(),
            level: None,
            completed: Some(t.completed),
            metadata: (!t.metadata.is_empty()).then(|| t.metadata.clone()),
            line: t.line,
            collapsed: false,
        },
    }
}

pub fn hit_to_json(hit: &SearchResult, item: &Item) -> SearchHitJson {
    SearchHitJson {
        score: hit.score,
        item: item_to_json(hit.index, item, false),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `3     - [ ] Description key:value` with a left-aligned id column
pub fn format_item_line(index: usize, item: &Item, id_width: usize) -> String {
    let body = match item {
        Item::Section(s) => serialize_section(s),
        Item::Task(t) => serialize_task(t),
    };
    format!("{:<width$} {}", index + 1, body, width = id_width)
}

/// One line per visible item. Collapsed sections show how much they hide.
pub fn format_listing(
    outline: &Outline,
    visible: &[usize],
    collapsed: &[bool],
    id_width: usize,
) -> Vec<String> {
    visible
        .iter()
        .map(|&i| {
            let mut line = format_item_line(i, &outline.items[i], id_width);
            if collapsed.get(i).copied().unwrap_or(false) {
                let hidden = hidden_count(outline, i);
                if hidden > 0 {
                    line.push_str(&format!(" (+{} hidden)", hidden));
                }
            }
            line
        })
        .collect()
}

/// Detailed view of a single item
pub fn format_item_detail(index: usize, item: &Item) -> Vec<String> {
    let mut lines = Vec::new();
    match item {
        Item::Section(s) => {
            lines.push(format!("id: {}", index + 1));
            lines.push(format!("section: {}", s.title));
            lines.push(format!("level: {}", s.level));
        }
        Item::Task(t) => {
            lines.push(format!("id: {}", index + 1));
            lines.push(format!("task: {}", t.description));
            lines.push(format!(
                "status: {}",
                if t.completed { "done" } else { "open" }
            ));
            let mut keys: Vec<&String> = t.metadata.keys().collect();
            keys.sort();
            for key in keys {
                lines.push(format!("  {}: {}", key, t.metadata[key]));
            }
        }
    }
    match item.line() {
        Some(line) => lines.push(format!("line: {}", line)),
        None => lines.push("line: unknown".to_string()),
    }
    lines
}

/// Short label used in confirmation messages
pub fn describe(item: &Item) -> String {
    match item {
        Item::Section(s) => format!("section {}", s.heading()),
        Item::Task(t) => format!("task \"{}\"", t.description),
    }
}
