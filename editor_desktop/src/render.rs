//! Terminal rendering of the editor state.
//!
//! Every character gets the colour of the last highlight span covering
//! it. Search matches are drawn in reverse video and the cursor cell is
//! underlined.

use crossterm::style::Stylize;
use lineedit_core::{Editor, Theme};
use std::fmt::Write;

/// Renders the whole document followed by a status line.
pub fn render(editor: &Editor, theme: &Theme) -> String {
    let mut out = String::new();
    let line_count = editor.document().line_count();
    let gutter = line_count.to_string().len();

    for row in 0..line_count {
        let _ = write!(out, "{:>width$} ", row + 1, width = gutter);
        render_line(&mut out, editor, theme, row);
        out.push('\n');
    }
    out.push_str(&status_line(editor));
    out.push('\n');
    out
}

fn render_line(out: &mut String, editor: &Editor, theme: &Theme, row: usize) {
    let Some(text) = editor.document().line(row) else {
        return;
    };
    let highlights = editor.highlight_line(row);
    let cursor = editor.cursor_position();
    let matches: Vec<_> = editor.search().matches_on_line(row).copied().collect();

    for (col, ch) in text.chars().enumerate() {
        let color = highlights
            .style_at(col)
            .map_or(theme.foreground, |style| theme.color(style));
        let mut styled = ch.with(color);
        if matches.iter().any(|m| col >= m.start && col < m.end) {
            styled = styled.reverse();
        }
        if cursor.line == row && cursor.col == col {
            styled = styled.underlined();
        }
        let _ = write!(out, "{}", styled);
    }

    // Cursor past the last character
    if cursor.line == row && cursor.col >= text.chars().count() {
        let _ = write!(out, "{}", ' '.underlined());
    }
}

/// File name, language, modified flag, cursor and match counter.
pub fn status_line(editor: &Editor) -> String {
    let name = editor
        .file_path()
        .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
    let language = editor.highlighter().language().map_or("Plain", |l| l.name());
    let modified = if editor.is_modified() { " [+]" } else { "" };
    let cursor = editor.cursor_position();

    let mut status = format!(
        "{}{} | {} | Ln {}, Col {}",
        name,
        modified,
        language,
        cursor.line + 1,
        cursor.col + 1
    );
    let search = editor.search();
    if search.has_matches() {
        let _ = write!(
            status,
            " | Match {}/{}",
            search.current_match_index(),
            search.match_count()
        );
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::{Attribute, SetAttribute};

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn test_render_plain_text() {
        let editor = Editor::from_text("hello\nworld");
        let output = strip_ansi(&render(&editor, &Theme::default()));
        assert_eq!(
            output,
            "1 hello\n2 world\n[No Name] | Plain | Ln 1, Col 1\n"
        );
    }

    #[test]
    fn test_render_marks_matches() {
        let mut editor = Editor::from_text("abc abc");
        editor.find("abc");
        let output = render(&editor, &Theme::default());
        assert!(output.contains(&SetAttribute(Attribute::Reverse).to_string()));
        assert!(status_line(&editor).ends_with("Match 1/2"));
    }

    #[test]
    fn test_status_shows_modified() {
        let mut editor = Editor::new();
        editor.insert_char('x');
        assert!(status_line(&editor).starts_with("[No Name] [+]"));
    }
}
