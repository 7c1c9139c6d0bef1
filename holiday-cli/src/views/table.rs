//! Plain-text table layout

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Text spanning the whole body when there are no rows
    empty_message: Option<String>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn empty_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.width());
            }
        }

        if self.rows.is_empty() {
            if let Some(message) = &self.empty_message {
                // Widen the last column so the message fits
                let inner = inner_width(&widths);
                if let Some(last) = widths.last_mut() {
                    *last += message.width().saturating_sub(inner);
                }
            }
        }
        let total_inner = inner_width(&widths);

        let separator = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut out = String::new();
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&format_line(&self.headers, &widths));
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');

        if self.rows.is_empty() {
            if let Some(message) = &self.empty_message {
                out.push_str(&format!("| {} |\n", pad(message, total_inner)));
            }
        }
        for row in &self.rows {
            out.push_str(&format_line(row, &widths));
            out.push('\n');
        }

        out.push_str(&separator);
        out
    }
}

/// Width between the outer borders
fn inner_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w))
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align() {
        let mut table = Table::new(["ID", "Location"]);
        table.row(["1", "Pune"]).row(["12", "Bengaluru"]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], "| ID | Location  |");
        assert_eq!(lines[3], "| 1  | Pune      |");
        assert_eq!(lines[4], "| 12 | Bengaluru |");
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_empty_message_spans_table() {
        let mut table = Table::new(["A", "B"]);
        table.empty_message("Nothing here yet");
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "| Nothing here yet |");
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_missing_cells_render_blank() {
        let mut table = Table::new(["A", "B"]);
        table.row(["x"]);
        assert!(table.render().contains("| x |   |"));
    }
}
