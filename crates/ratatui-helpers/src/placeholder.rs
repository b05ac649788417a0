use log::trace;
use ratatui::buffer::Buffer;
use ratatui::layout::Margin;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;

use crate::binding::Binding;
use crate::editor::EditorAction;
use crate::editor::TextEditor;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct PlaceholderTextViewOptions {
    pub text_style: Style,
    pub placeholder_style: Style,
    pub border_style: Style,
    pub editing_border_style: Style,
    pub end_editing: Vec<KeyEvent>,
}

impl Default for PlaceholderTextViewOptions {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            text_style: theme.text_primary,
            placeholder_style: theme.text_muted,
            border_style: theme.border,
            editing_border_style: theme.accent,
            end_editing: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceholderAction {
    None,
    BeganEditing,
    Changed,
    EndedEditing,
}

/// A bordered multi-line text input that shows a placeholder while empty and idle.
///
/// The text lives behind a [`Binding<String>`]. Every edit writes the binding, and changes
/// made to it from outside show up on the next event or render.
pub struct PlaceholderTextView {
    text: Binding<String>,
    placeholder: String,
    editor: TextEditor,
    editing: bool,
    options: PlaceholderTextViewOptions,
    area: Option<Rect>,
}

impl PlaceholderTextView {
    pub fn new(text: Binding<String>, placeholder: impl Into<String>) -> Self {
        Self::with_options(text, placeholder, PlaceholderTextViewOptions::default())
    }

    pub fn with_options(
        text: Binding<String>,
        placeholder: impl Into<String>,
        options: PlaceholderTextViewOptions,
    ) -> Self {
        let mut editor = TextEditor::multiline();
        editor.set_text(&text.get());
        Self {
            text,
            placeholder: placeholder.into(),
            editor,
            editing: false,
            options,
            area: None,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn shows_placeholder(&self) -> bool {
        !self.editing && self.editor.is_empty()
    }

    /// Rows needed to show every line plus the border; the view never scrolls.
    pub fn desired_height(&self) -> u16 {
        (self.editor.line_count().min(u16::MAX as usize - 2) as u16) + 2
    }

    pub fn begin_editing(&mut self) -> PlaceholderAction {
        if self.editing {
            return PlaceholderAction::None;
        }
        self.editing = true;
        PlaceholderAction::BeganEditing
    }

    pub fn end_editing(&mut self) -> PlaceholderAction {
        if !self.editing {
            return PlaceholderAction::None;
        }
        self.editing = false;
        PlaceholderAction::EndedEditing
    }

    pub fn input(&mut self, event: InputEvent) -> PlaceholderAction {
        self.sync_from_binding();
        match event {
            InputEvent::Mouse(m) if m.is_left_down() => {
                let inside = self.area.is_some_and(|a| a.contains((m.x, m.y).into()));
                if inside {
                    self.begin_editing()
                } else {
                    self.end_editing()
                }
            }
            InputEvent::FocusLost => self.end_editing(),
            InputEvent::Key(key)
                if self.editing && keymap::matches_any(&self.options.end_editing, &key) =>
            {
                self.end_editing()
            }
            event if self.editing => match self.editor.input(event) {
                EditorAction::Changed => {
                    let text = self.editor.text();
                    trace!("placeholder text view changed ({} chars)", text.chars().count());
                    self.text.set(text);
                    PlaceholderAction::Changed
                }
                EditorAction::None | EditorAction::Submitted(_) => PlaceholderAction::None,
            },
            _ => PlaceholderAction::None,
        }
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.editing {
            return None;
        }
        self.editor.cursor_pos(text_area(area))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.area = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.sync_from_binding();
        self.area = Some(area);

        let border_style = if self.editing {
            self.options.editing_border_style
        } else {
            self.options.border_style
        };
        Block::bordered().border_style(border_style).render(area, buf);

        let inner = text_area(area);
        if self.shows_placeholder() {
            crate::render::render_str_clipped(
                inner.x,
                inner.y,
                0,
                inner.width,
                buf,
                &self.placeholder,
                self.options.placeholder_style,
            );
        } else {
            self.editor.render_ref(inner, buf, self.options.text_style);
        }
    }

    fn sync_from_binding(&mut self) {
        let value = self.text.get();
        if value != self.editor.text() {
            self.editor.set_text(&value);
        }
    }
}

fn text_area(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1)).inner(Margin::new(1, 0))
}
