use crate::model::item::{Item, Section, Task};

/// Serialize an outline to its canonical text form.
///
/// Every line ends with `\n`. A blank line precedes each section except the
/// first item, and follows a section when the next item is a task.
pub fn serialize_outline(items: &[Item]) -> String {
    let mut out = String::new();

    for (i, item) in items.iter().enumerate() {
        match item {
            Item::Section(section) => {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&serialize_section(section));
                out.push('\n');
                if items.get(i + 1).is_some_and(|next| !next.is_section()) {
                    out.push('\n');
                }
            }
            Item::Task(task) => {
                out.push_str(&serialize_task(task));
                out.push('\n');
            }
        }
    }

    out
}

/// `## Title`
pub fn serialize_section(section: &Section) -> String {
    section.heading()
}

/// `- [x] Description a:1 b:"two words"`, keys in ascending order
pub fn serialize_task(task: &Task) -> String {
    let mut line = format!("- [{}] {}", task.checkbox_char(), task.description);

    let mut keys: Vec<&String> = task.metadata.keys().collect();
    keys.sort();
    for key in keys {
        line.push(' ');
        line.push_str(key);
        line.push(':');
        line.push_str(&quote_if_needed(&task.metadata[key]));
    }

    line
}

/// Wrap values containing a space in quotes, escaping inner `"`
pub fn quote_if_needed(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Metadata;
    use crate::parse::outline_parser::parse_outline;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_serialize_task_minimal() {
        assert_eq!(serialize_task(&Task::new("Fix parser")), "- [ ] Fix parser");
    }

    #[test]
    fn test_serialize_task_sorts_keys() {
        let mut task =
            Task::new("Ship").with_metadata(meta(&[("priority", "high"), ("due", "2025-08-05")]));
        task.completed = true;
        assert_eq!(
            serialize_task(&task),
            "- [x] Ship due:2025-08-05 priority:high"
        );
    }

    #[test]
    fn test_serialize_quotes_spaced_values() {
        let task = Task::new("t").with_metadata(meta(&[("status", "in progress")]));
        assert_eq!(serialize_task(&task), r#"- [ ] t status:"in progress""#);

        let task = Task::new("t").with_metadata(meta(&[("said", r#"a "b" c"#)]));
        assert_eq!(serialize_task(&task), r#"- [ ] t said:"a \"b\" c""#);
    }

    #[test]
    fn test_quote_if_needed_leaves_bare_tokens() {
        assert_eq!(quote_if_needed("high"), "high");
        assert_eq!(quote_if_needed(r#"x"y"#), r#"x"y"#);
    }

    #[test]
    fn test_blank_lines_around_sections() {
        let items = vec![
            Item::section(1, "A"),
            Item::task("t1"),
            Item::section(2, "B"),
            Item::section(3, "C"),
            Item::task("t2"),
            Item::task("t3"),
        ];
        assert_eq!(
            serialize_outline(&items),
            "# A\n\n- [ ] t1\n\n## B\n\n### C\n\n- [ ] t2\n- [ ] t3\n"
        );
    }

    #[test]
    fn test_leading_tasks_and_trailing_section() {
        let items = vec![Item::task("loose"), Item::section(1, "End")];
        assert_eq!(serialize_outline(&items), "- [ ] loose\n\n# End\n");
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(serialize_outline(&[]), "");
    }

    #[test]
    fn test_parse_serialize_round_trip() {
        let items = vec![
            Item::section(1, "Home"),
            Item::Task(
                Task::new("Paint fence")
                    .with_metadata(meta(&[("status", "in progress"), ("color", "white")])),
            ),
            Item::section(2, "Garden"),
            Item::task("Plant tulips"),
        ];
        let text = serialize_outline(&items);
        let (outline, dropped) = parse_outline(&text);
        assert!(dropped.is_empty());
        assert_eq!(outline.items, items);
        assert_eq!(serialize_outline(&outline.items), text);
    }
}
