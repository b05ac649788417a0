use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// What `Enter` does in a [`TextEditor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnterBehavior {
    #[default]
    Newline,
    Submit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize, // char index within line
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
    Submitted(String),
}

/// A small, non-scrolling text buffer with a cursor.
///
/// Content grows downward instead of scrolling; rows past the render area are clipped. A
/// single-line editor folds pasted newlines into spaces.
#[derive(Clone, Debug)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor: Cursor,
    preferred_x: Option<usize>, // display columns
    multiline: bool,
    enter: EnterBehavior,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::multiline()
    }
}

impl TextEditor {
    pub fn multiline() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            preferred_x: None,
            multiline: true,
            enter: EnterBehavior::Newline,
        }
    }

    pub fn single_line() -> Self {
        Self {
            multiline: false,
            enter: EnterBehavior::Submit,
            ..Self::multiline()
        }
    }

    pub fn set_text(&mut self, text: &str) {
        let text = normalize_newlines(text);
        self.lines = if self.multiline {
            text.split('\n').map(str::to_string).collect()
        } else {
            vec![text.replace('\n', " ")]
        };
        let last = self.lines.len() - 1;
        self.cursor = Cursor {
            row: last,
            col: self.lines[last].chars().count(),
        };
        self.preferred_x = None;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn input(&mut self, event: InputEvent) -> EditorAction {
        match event {
            InputEvent::Paste(s) => {
                self.insert_str(&s);
                self.preferred_x = None;
                EditorAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            _ => EditorAction::None,
        }
    }

    /// Screen position of the cursor inside `area`, if visible.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let x = self.cursor_display_x();
        let y = self.cursor.row;
        if x >= area.width as usize || y >= area.height as usize {
            return None;
        }
        Some((area.x + x as u16, area.y + y as u16))
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer, style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for (row, line) in self.lines.iter().take(area.height as usize).enumerate() {
            let y = area.y + row as u16;
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            render::render_str_clipped(area.x, y, 0, area.width, buf, line, style);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Char(c) => {
                if !key.modifiers.is_plain() {
                    return EditorAction::None;
                }
                self.insert_char(c);
                self.preferred_x = None;
                EditorAction::Changed
            }
            KeyCode::Enter => match self.enter {
                EnterBehavior::Newline if self.multiline => {
                    self.insert_newline();
                    self.preferred_x = None;
                    EditorAction::Changed
                }
                EnterBehavior::Newline => EditorAction::None,
                EnterBehavior::Submit => EditorAction::Submitted(self.text()),
            },
            KeyCode::Backspace => self.changed_if(Self::backspace),
            KeyCode::Delete => self.changed_if(Self::delete),
            KeyCode::Left => {
                self.move_left();
                EditorAction::None
            }
            KeyCode::Right => {
                self.move_right();
                EditorAction::None
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                EditorAction::None
            }
            KeyCode::Down => {
                self.move_vertical(1);
                EditorAction::None
            }
            KeyCode::Home => {
                self.cursor.col = 0;
                self.preferred_x = Some(0);
                EditorAction::None
            }
            KeyCode::End => {
                self.cursor.col = self.current_line().chars().count();
                self.preferred_x = Some(self.cursor_display_x());
                EditorAction::None
            }
            KeyCode::Tab | KeyCode::Esc => EditorAction::None,
        }
    }

    fn changed_if(&mut self, edit: fn(&mut Self) -> bool) -> EditorAction {
        if edit(self) {
            self.preferred_x = None;
            EditorAction::Changed
        } else {
            EditorAction::None
        }
    }

    fn cursor_display_x(&self) -> usize {
        self.current_line()
            .chars()
            .take(self.cursor.col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn current_line(&self) -> &str {
        self.lines
            .get(self.cursor.row)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.current_line().chars().count();
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.current_line().chars().count() {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_vertical(&mut self, delta: isize) {
        let Some(row) = self.cursor.row.checked_add_signed(delta) else {
            return;
        };
        if row >= self.lines.len() {
            return;
        }
        let target_x = self.preferred_x.unwrap_or_else(|| self.cursor_display_x());
        self.cursor.row = row;
        self.cursor.col = col_from_display_x(self.current_line(), target_x);
        self.preferred_x = Some(target_x);
    }

    fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor.row];
        let byte_idx = byte_index_from_char_index(line, self.cursor.col);
        line.insert(byte_idx, ch);
        self.cursor.col += 1;
    }

    fn insert_newline(&mut self) {
        let row = self.cursor.row;
        let byte_idx = byte_index_from_char_index(&self.lines[row], self.cursor.col);
        let tail = self.lines[row].split_off(byte_idx);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor { row: row + 1, col: 0 };
    }

    fn insert_str(&mut self, s: &str) {
        let s = normalize_newlines(s);
        let mut parts = s.split('\n');
        let first = parts.next().unwrap_or("");
        for ch in first.chars() {
            self.insert_char(ch);
        }
        for part in parts {
            if self.multiline {
                self.insert_newline();
            } else {
                self.insert_char(' ');
            }
            for ch in part.chars() {
                self.insert_char(ch);
            }
        }
    }

    fn backspace(&mut self) -> bool {
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.row];
            let start = byte_index_from_char_index(line, self.cursor.col - 1);
            let end = byte_index_from_char_index(line, self.cursor.col);
            line.replace_range(start..end, "");
            self.cursor.col -= 1;
            return true;
        }
        if self.cursor.row > 0 {
            let cur = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            let prev = &mut self.lines[self.cursor.row];
            self.cursor.col = prev.chars().count();
            prev.push_str(&cur);
            return true;
        }
        false
    }

    fn delete(&mut self) -> bool {
        let row = self.cursor.row;
        let line_len = self.lines[row].chars().count();
        if self.cursor.col < line_len {
            let line = &mut self.lines[row];
            let start = byte_index_from_char_index(line, self.cursor.col);
            let end = byte_index_from_char_index(line, self.cursor.col + 1);
            line.replace_range(start..end, "");
            return true;
        }
        if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            return true;
        }
        false
    }
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(ed: &mut TextEditor, code: KeyCode) -> EditorAction {
        ed.input(InputEvent::Key(KeyEvent::new(code)))
    }

    fn type_str(ed: &mut TextEditor, s: &str) {
        for c in s.chars() {
            press(ed, KeyCode::Char(c));
        }
    }

    #[test]
    fn inserts_and_moves_cursor() {
        let mut ed = TextEditor::multiline();
        assert_eq!(press(&mut ed, KeyCode::Char('a')), EditorAction::Changed);
        assert_eq!(ed.cursor(), Cursor { row: 0, col: 1 });
        press(&mut ed, KeyCode::Left);
        press(&mut ed, KeyCode::Char('b'));
        assert_eq!(ed.text(), "ba");
    }

    #[test]
    fn multiline_enter_splits_line() {
        let mut ed = TextEditor::multiline();
        type_str(&mut ed, "ab");
        press(&mut ed, KeyCode::Left);
        assert_eq!(press(&mut ed, KeyCode::Enter), EditorAction::Changed);
        assert_eq!(ed.text(), "a\nb");
        assert_eq!(ed.cursor(), Cursor { row: 1, col: 0 });
    }

    #[test]
    fn single_line_enter_submits_without_clearing() {
        let mut ed = TextEditor::single_line();
        type_str(&mut ed, "cats");
        assert_eq!(
            press(&mut ed, KeyCode::Enter),
            EditorAction::Submitted("cats".to_string())
        );
        assert_eq!(ed.text(), "cats");
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ed = TextEditor::multiline();
        ed.set_text("a\nb");
        press(&mut ed, KeyCode::Home);
        assert_eq!(press(&mut ed, KeyCode::Backspace), EditorAction::Changed);
        assert_eq!(ed.text(), "ab");
        assert_eq!(ed.cursor(), Cursor { row: 0, col: 1 });
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut ed = TextEditor::single_line();
        assert_eq!(press(&mut ed, KeyCode::Backspace), EditorAction::None);
    }

    #[test]
    fn paste_respects_line_mode() {
        let mut ml = TextEditor::multiline();
        ml.input(InputEvent::Paste("a\r\nb\nc".to_string()));
        assert_eq!(ml.text(), "a\nb\nc");
        assert_eq!(ml.cursor().row, 2);

        let mut sl = TextEditor::single_line();
        sl.input(InputEvent::Paste("a\nb".to_string()));
        assert_eq!(sl.text(), "a b");
    }

    #[test]
    fn vertical_moves_keep_preferred_column() {
        let mut ed = TextEditor::multiline();
        ed.set_text("abcd\nx\nabcd");
        press(&mut ed, KeyCode::Up);
        assert_eq!(ed.cursor(), Cursor { row: 1, col: 1 });
        press(&mut ed, KeyCode::Up);
        assert_eq!(ed.cursor(), Cursor { row: 0, col: 4 });
    }

    #[test]
    fn renders_rows_and_reports_cursor() {
        let mut ed = TextEditor::multiline();
        ed.set_text("hi\nyo");
        let area = Rect::new(1, 1, 4, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 4));
        ed.render_ref(area, &mut buf, Style::default());
        assert_eq!(buf[(1, 1)].symbol(), "h");
        assert_eq!(buf[(2, 2)].symbol(), "o");
        assert_eq!(ed.cursor_pos(area), Some((3, 2)));
    }
}
