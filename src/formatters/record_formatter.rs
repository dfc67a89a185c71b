use colored::Colorize;

/// Spaces between the longest title's colon and its value.
const VALUE_GAP: usize = 2;

fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Width of the longest title in a header.
pub fn max_title_len(header: &[String]) -> usize {
    header.iter().map(|title| display_len(title)).max().unwrap_or(0)
}

/// Formats one matching record as `title: value` lines with the values
/// aligned in a single column. No trailing newline.
pub fn format_record(header: &[String], record: &[String], use_color: bool) -> String {
    let width = max_title_len(header);

    header
        .iter()
        .zip(record)
        .map(|(title, value)| {
            let padding = " ".repeat(width - display_len(title) + VALUE_GAP);
            let label = format!("{title}:");
            if use_color {
                format!("{}{}{}", label.bright_blue(), padding, value)
            } else {
                format!("{label}{padding}{value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
