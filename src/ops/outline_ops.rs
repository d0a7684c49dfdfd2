use crate::model::item::{Item, MAX_SECTION_LEVEL, Metadata, Section, Task};
use crate::model::outline::Outline;
use crate::parse::{is_valid_key, parse_task_content};

/// Error type for outline mutations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("invalid item index: {index} (outline has {len} items)")]
    InvalidIndex { index: usize, len: usize },
    #[error("invalid section level: {0} (must be 1-6)")]
    InvalidLevel(u8),
    #[error("item at index {0} is not a task")]
    NotATask(usize),
    #[error("text cannot be empty")]
    EmptyText,
    #[error("invalid metadata key: {0:?}")]
    InvalidKey(String),
    #[error("metadata value for {0:?} cannot be empty")]
    EmptyValue(String),
}

/// Where to insert a new item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Append to the end of the outline
    End,
    /// Insert directly after the item at this index
    After(usize),
}

/// Direction for a positional swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn get(outline: &Outline, index: usize) -> Result<&Item, OutlineError> {
    outline.get(index).ok_or(OutlineError::InvalidIndex {
        index,
        len: outline.len(),
    })
}

fn check_index(outline: &Outline, index: usize) -> Result<(), OutlineError> {
    get(outline, index).map(|_| ())
}

fn task_mut(outline: &mut Outline, index: usize) -> Result<&mut Task, OutlineError> {
    let len = outline.len();
    match outline.items.get_mut(index) {
        Some(Item::Task(task)) => Ok(task),
        Some(Item::Section(_)) => Err(OutlineError::NotATask(index)),
        None => Err(OutlineError::InvalidIndex { index, len }),
    }
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

/// Insert an incomplete task. Returns the index it landed at.
pub fn insert_task(
    outline: &mut Outline,
    description: String,
    metadata: Metadata,
    position: InsertPosition,
) -> Result<usize, OutlineError> {
    let task = Task::new(description).with_metadata(metadata);
    insert_at(outline, Item::Task(task), position)
}

/// Insert a section heading. The title is trimmed and must not be empty.
/// Returns the index it landed at.
pub fn insert_section(
    outline: &mut Outline,
    title: String,
    level: u8,
    position: InsertPosition,
) -> Result<usize, OutlineError> {
    if !(1..=MAX_SECTION_LEVEL).contains(&level) {
        return Err(OutlineError::InvalidLevel(level));
    }
    let title = title.trim();
    if title.is_empty() {
        return Err(OutlineError::EmptyText);
    }
    insert_at(outline, Item::Section(Section::new(level, title)), position)
}

fn insert_at(
    outline: &mut Outline,
    item: Item,
    position: InsertPosition,
) -> Result<usize, OutlineError> {
    let at = match position {
        InsertPosition::End => outline.len(),
        InsertPosition::After(index) => {
            check_index(outline, index)?;
            index + 1
        }
    };
    outline.items.insert(at, item);
    Ok(at)
}

// ---------------------------------------------------------------------------
// Toggle / edit
// ---------------------------------------------------------------------------

pub fn toggle(outline: &mut Outline, index: usize, completed: bool) -> Result<(), OutlineError> {
    task_mut(outline, index)?.completed = completed;
    Ok(())
}

/// Replace an item's text. Section titles are trimmed; task text is parsed,
/// so inline `key:value` pairs are merged into the existing metadata.
pub fn edit_text(outline: &mut Outline, index: usize, text: &str) -> Result<(), OutlineError> {
    check_index(outline, index)?;
    match &mut outline.items[index] {
        Item::Section(section) => {
            let title = text.trim();
            if title.is_empty() {
                return Err(OutlineError::EmptyText);
            }
            section.title = title.to_string();
        }
        Item::Task(task) => {
            let content = parse_task_content(text);
            if content.description.is_empty() {
                return Err(OutlineError::EmptyText);
            }
            task.description = content.description;
            task.metadata.extend(content.metadata);
        }
    }
    Ok(())
}

pub fn set_metadata(
    outline: &mut Outline,
    index: usize,
    key: &str,
    value: &str,
) -> Result<(), OutlineError> {
    if !is_valid_key(key) {
        return Err(OutlineError::InvalidKey(key.to_string()));
    }
    if value.is_empty() {
        return Err(OutlineError::EmptyValue(key.to_string()));
    }
    task_mut(outline, index)?
        .metadata
        .insert(key.to_string(), value.to_string());
    Ok(())
}

/// Remove a metadata key. Returns the old value if there was one.
pub fn remove_metadata(
    outline: &mut Outline,
    index: usize,
    key: &str,
) -> Result<Option<String>, OutlineError> {
    Ok(task_mut(outline, index)?.metadata.shift_remove(key))
}

// ---------------------------------------------------------------------------
// Delete / move
// ---------------------------------------------------------------------------

/// Delete a task, or a section together with everything it owns.
///
/// A section's range ends at the next section of the same or a shallower
/// level, so deleting the last top-level section removes the rest of the
/// outline. Returns the removed items in order.
pub fn delete_subtree(outline: &mut Outline, index: usize) -> Result<Vec<Item>, OutlineError> {
    check_index(outline, index)?;
    let range = outline.subtree_range(index);
    Ok(outline.items.drain(range).collect())
}

/// Swap an item with its neighbor in the flat list.
///
/// This is a plain positional swap: moving a section past a task or another
/// section changes which items it owns. Returns the item's new index.
pub fn move_item(
    outline: &mut Outline,
    index: usize,
    direction: Direction,
) -> Result<usize, OutlineError> {
    check_index(outline, index)?;
    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&i| i < outline.len()),
    };
    let target = target.ok_or(OutlineError::InvalidIndex {
        index: match direction {
            Direction::Up => index,
            Direction::Down => index + 1,
        },
        len: outline.len(),
    })?;
    outline.items.swap(index, target);
    Ok(target)
}
