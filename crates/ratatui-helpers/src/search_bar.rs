use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

use crate::binding::Binding;
use crate::editor::EditorAction;
use crate::editor::TextEditor;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct SearchBarBindings {
    /// Starts editing while the bar is idle.
    pub focus: Vec<KeyEvent>,
    pub cancel: Vec<KeyEvent>,
}

impl Default for SearchBarBindings {
    fn default() -> Self {
        Self {
            focus: vec![keymap::key_char('/')],
            cancel: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchBarOptions {
    pub field_style: Style,
    pub text_style: Style,
    pub placeholder_style: Style,
    pub cancel_style: Style,
    pub icon: String,
    pub cancel_label: String,
    pub bindings: SearchBarBindings,
}

impl Default for SearchBarOptions {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            field_style: theme.surface,
            text_style: theme.text_primary,
            placeholder_style: theme.text_muted,
            cancel_style: theme.accent,
            icon: "⌕".to_string(),
            cancel_label: "Cancel".to_string(),
            bindings: SearchBarBindings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchBarAction {
    None,
    BeganEditing,
    EndedEditing,
    Changed,
    Submitted(String),
    /// The query was cleared; callers usually treat this as a search for `""`.
    Cancelled,
}

/// A one-row search field with a cancel button.
///
/// `text` and `is_searching` are caller-owned. Editing sets `is_searching`; cancelling clears
/// both the text and the flag. Submitting ends editing but keeps the cancel button so the user
/// can still back out of the results.
pub struct SearchBar {
    text: Binding<String>,
    is_searching: Binding<bool>,
    placeholder: String,
    editor: TextEditor,
    editing: bool,
    shows_cancel: bool,
    options: SearchBarOptions,
    field: Option<Rect>,
    cancel: Option<Rect>,
}

impl SearchBar {
    pub fn new(
        text: Binding<String>,
        is_searching: Binding<bool>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::with_options(text, is_searching, placeholder, SearchBarOptions::default())
    }

    pub fn with_options(
        text: Binding<String>,
        is_searching: Binding<bool>,
        placeholder: impl Into<String>,
        options: SearchBarOptions,
    ) -> Self {
        let mut editor = TextEditor::single_line();
        editor.set_text(&text.get());
        Self {
            text,
            is_searching,
            placeholder: placeholder.into(),
            editor,
            editing: false,
            shows_cancel: false,
            options,
            field: None,
            cancel: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn shows_cancel(&self) -> bool {
        self.shows_cancel
    }

    pub fn begin_editing(&mut self) -> SearchBarAction {
        if self.editing {
            return SearchBarAction::None;
        }
        self.editing = true;
        self.shows_cancel = true;
        self.is_searching.set(true);
        SearchBarAction::BeganEditing
    }

    pub fn end_editing(&mut self) -> SearchBarAction {
        if !self.editing {
            return SearchBarAction::None;
        }
        self.editing = false;
        SearchBarAction::EndedEditing
    }

    pub fn submit(&mut self) -> SearchBarAction {
        let query = self.text.get();
        debug!("search submitted: {query:?}");
        self.editing = false;
        SearchBarAction::Submitted(query)
    }

    pub fn cancel(&mut self) -> SearchBarAction {
        debug!("search cancelled");
        self.text.set(String::new());
        self.editor.set_text("");
        self.is_searching.set(false);
        self.shows_cancel = false;
        self.editing = false;
        SearchBarAction::Cancelled
    }

    pub fn input(&mut self, event: InputEvent) -> SearchBarAction {
        self.sync_from_binding();
        match event {
            InputEvent::Mouse(m) if m.is_left_down() => {
                let pos = (m.x, m.y).into();
                if self.shows_cancel && self.cancel.is_some_and(|r| r.contains(pos)) {
                    self.cancel()
                } else if self.field.is_some_and(|r| r.contains(pos)) {
                    self.begin_editing()
                } else {
                    self.end_editing()
                }
            }
            InputEvent::FocusLost => self.end_editing(),
            InputEvent::Key(key) if !self.editing => {
                if keymap::matches_any(&self.options.bindings.focus, &key) {
                    self.begin_editing()
                } else {
                    SearchBarAction::None
                }
            }
            InputEvent::Key(key) if keymap::matches_any(&self.options.bindings.cancel, &key) => {
                self.cancel()
            }
            event if self.editing => match self.editor.input(event) {
                EditorAction::Changed => {
                    self.text.set(self.editor.text());
                    SearchBarAction::Changed
                }
                EditorAction::Submitted(_) => self.submit(),
                EditorAction::None => SearchBarAction::None,
            },
            _ => SearchBarAction::None,
        }
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.editing {
            return None;
        }
        let (field, _) = self.split(area);
        self.editor.cursor_pos(self.text_area(field))
    }

    /// Draws the bar on the first row of `area`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.field = None;
        self.cancel = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.sync_from_binding();

        let row = Rect::new(area.x, area.y, area.width, 1);
        let (field, cancel) = self.split(row);
        buf.set_style(field, self.options.field_style);

        let icon_style = self.options.field_style.patch(self.options.placeholder_style);
        if !self.editing && self.editor.is_empty() {
            let label = format!("{} {}", self.options.icon, self.placeholder);
            render::render_str_centered(field, field.y, buf, &label, icon_style);
        } else {
            render::render_str_clipped(
                field.x + 1,
                field.y,
                0,
                field.width.saturating_sub(1),
                buf,
                &self.options.icon,
                icon_style,
            );
            let text = self.text_area(field);
            if self.editor.is_empty() {
                render::render_str_clipped(
                    text.x,
                    text.y,
                    0,
                    text.width,
                    buf,
                    &self.placeholder,
                    icon_style,
                );
            } else {
                let style = self.options.field_style.patch(self.options.text_style);
                self.editor.render_ref(text, buf, style);
            }
        }

        if let Some(cancel) = cancel {
            render::render_str_clipped(
                cancel.x + 1,
                cancel.y,
                0,
                cancel.width.saturating_sub(1),
                buf,
                &self.options.cancel_label,
                self.options.cancel_style,
            );
        }

        self.field = Some(field);
        self.cancel = cancel;
    }

    fn split(&self, row: Rect) -> (Rect, Option<Rect>) {
        let label_w = UnicodeWidthStr::width(self.options.cancel_label.as_str()) as u16 + 1;
        if !self.shows_cancel || label_w >= row.width {
            return (row, None);
        }
        let field = Rect::new(row.x, row.y, row.width - label_w, 1);
        let cancel = Rect::new(row.x + field.width, row.y, label_w, 1);
        (field, Some(cancel))
    }

    fn text_area(&self, field: Rect) -> Rect {
        let icon_w = UnicodeWidthStr::width(self.options.icon.as_str()) as u16 + 2;
        let x = field.x + icon_w.min(field.width);
        Rect::new(x, field.y, field.right().saturating_sub(x), 1)
    }

    fn sync_from_binding(&mut self) {
        let value = self.text.get();
        if value != self.editor.text() {
            self.editor.set_text(&value);
        }
    }
}
