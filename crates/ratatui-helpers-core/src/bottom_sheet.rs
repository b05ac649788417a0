//! A draggable panel anchored to the bottom of the screen.
//!
//! Visibility lives with the caller behind a [`Binding<bool>`]. The sheet reads it on every
//! layout pass and writes `false` when the user dismisses it, by flicking down, by dragging past
//! a fraction of its height, by tapping the scrim, or with a key binding.
//!
//! All geometry is in points. Terminal rows convert through
//! [`BottomSheetOptions::row_height`], so the velocity and distance constants mean the same
//! thing whether samples come from a touch screen or a mouse on a character grid.

use std::time::Duration;

use log::debug;
use log::trace;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

use crate::animation::Spring;
use crate::animation::SpringValue;
use crate::binding::Binding;
use crate::geometry::SheetHeight;
use crate::geometry::Viewport;
use crate::geometry::points_to_rows;
use crate::gesture::DragPhase;
use crate::gesture::DragSample;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::render;
use crate::theme::Theme;

const SCRIM_MAX_OPACITY: f64 = 0.4;
const SCRIM_FADE_DISTANCE: f64 = 600.0;
const GRIP_WIDTH: f64 = 40.0;

#[derive(Clone, Debug)]
pub struct SheetBindings {
    pub dismiss: Vec<KeyEvent>,
}

impl Default for SheetBindings {
    fn default() -> Self {
        Self {
            dismiss: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

#[derive(Clone, Debug)]
pub struct BottomSheetOptions {
    pub height: SheetHeight,
    pub top_bar_thickness: f64,
    /// `None` rounds the top corners by a third of the top bar thickness.
    pub top_bar_corner_radius: Option<f64>,
    pub top_bar_style: Style,
    pub content_style: Style,
    pub border_style: Style,
    pub grip_style: Style,
    pub show_top_indicator: bool,
    pub dismiss_animation: Spring,
    /// Downward speed, in points per second, that dismisses the sheet mid-drag.
    pub flick_velocity: f64,
    /// Fraction of the sheet height a released drag must exceed to dismiss.
    pub dismiss_fraction: f64,
    /// Points per terminal row.
    pub row_height: f64,
    /// Rows reserved at the bottom for host chrome.
    pub safe_area_rows: u16,
    pub scrim_color: Color,
    pub bindings: SheetBindings,
}

impl Default for BottomSheetOptions {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

impl BottomSheetOptions {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            height: SheetHeight::default(),
            top_bar_thickness: 30.0,
            top_bar_corner_radius: None,
            top_bar_style: theme.surface,
            content_style: theme.surface,
            border_style: theme.border,
            grip_style: theme.grip,
            show_top_indicator: true,
            dismiss_animation: Spring::bottom_sheet(),
            flick_velocity: 1400.0,
            dismiss_fraction: 0.2,
            row_height: 16.0,
            safe_area_rows: 0,
            scrim_color: theme.scrim,
            bindings: SheetBindings::default(),
        }
    }

    pub fn corner_radius(&self) -> f64 {
        self.top_bar_corner_radius
            .unwrap_or(self.top_bar_thickness / 3.0)
    }
}

/// Mutable interaction state owned by one sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PresentationState {
    pub dragged_offset: f64,
    pub previous_sample: Option<DragSample>,
    pub phase: DragPhase,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetAction {
    None,
    Redraw,
    /// The sheet wrote `false` to its binding.
    Dismissed,
}

#[derive(Clone, Copy, Debug)]
struct Pointer {
    anchor_row: u16,
    moved: bool,
    on_panel: bool,
}

pub struct BottomSheet {
    is_presented: Binding<bool>,
    options: BottomSheetOptions,
    state: PresentationState,
    displayed: Option<SpringValue>,
    last_presented: Option<bool>,
    viewport: Option<Viewport>,
    pointer: Option<Pointer>,
    panel: Option<Rect>,
}

impl BottomSheet {
    pub fn new(is_presented: Binding<bool>) -> Self {
        Self::with_options(is_presented, BottomSheetOptions::default())
    }

    pub fn with_options(is_presented: Binding<bool>, options: BottomSheetOptions) -> Self {
        Self {
            is_presented,
            options,
            state: PresentationState::default(),
            displayed: None,
            last_presented: None,
            viewport: None,
            pointer: None,
            panel: None,
        }
    }

    pub fn options(&self) -> &BottomSheetOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: BottomSheetOptions) {
        self.options = options;
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn is_presented(&self) -> bool {
        self.is_presented.get()
    }

    pub fn present(&self) {
        self.is_presented.set(true);
    }

    /// Rect of the panel as last rendered, clipped to the render area.
    pub fn panel_area(&self) -> Option<Rect> {
        self.panel
    }

    pub fn sheet_height(&self, viewport: Viewport) -> f64 {
        self.options.height.resolve(viewport.height)
    }

    pub fn dismiss_threshold(&self, viewport: Viewport) -> f64 {
        self.sheet_height(viewport) * self.options.dismiss_fraction
    }

    /// Vertical offset of the sheet relative to a vertically centred position.
    pub fn offset(&self, viewport: Viewport) -> f64 {
        let h = viewport.height;
        let s = self.sheet_height(viewport);
        let b = viewport.safe_area_bottom;
        if self.is_presented() {
            h / 2.0 - s / 2.0 + b + self.state.dragged_offset
        } else {
            h / 2.0 + s / 2.0 + b
        }
    }

    /// Scrim opacity straight from the fade formula; negative once dragged far enough.
    pub fn raw_scrim_opacity(&self) -> f64 {
        if self.is_presented() {
            SCRIM_MAX_OPACITY - self.state.dragged_offset / SCRIM_FADE_DISTANCE
        } else {
            0.0
        }
    }

    /// Scrim opacity clamped to `0.0..=0.4`.
    pub fn scrim_opacity(&self) -> f64 {
        self.raw_scrim_opacity().clamp(0.0, SCRIM_MAX_OPACITY)
    }

    pub fn drag_changed(&mut self, sample: DragSample) -> SheetAction {
        self.state.phase = DragPhase::Dragging;
        self.state.dragged_offset = sample.translation_y;

        if let Some(previous) = self.state.previous_sample {
            match sample.velocity_since(&previous) {
                Some(velocity) if velocity > self.options.flick_velocity => {
                    debug!("bottom sheet flicked at {velocity:.0} pt/s");
                    return self.request_dismissal();
                }
                Some(_) => {}
                None => trace!("bottom sheet drag sample without elapsed time"),
            }
        }

        self.state.previous_sample = Some(sample);
        SheetAction::Redraw
    }

    pub fn drag_ended(&mut self, translation_y: f64, viewport: Viewport) -> SheetAction {
        let threshold = self.dismiss_threshold(viewport);
        let action = if translation_y > threshold {
            debug!("bottom sheet dragged {translation_y:.0} pt past {threshold:.0} pt");
            self.request_dismissal()
        } else {
            SheetAction::Redraw
        };
        self.state = PresentationState::default();
        action
    }

    pub fn tap_scrim(&mut self) -> SheetAction {
        if !self.is_presented() {
            return SheetAction::None;
        }
        debug!("bottom sheet scrim tapped");
        self.request_dismissal()
    }

    fn request_dismissal(&mut self) -> SheetAction {
        let was_presented = self.is_presented();
        self.is_presented.set(false);
        if was_presented {
            SheetAction::Dismissed
        } else {
            SheetAction::Redraw
        }
    }

    /// Recomputes the target offset for `viewport` and starts a spring when presentation
    /// flipped since the last pass. Returns the target offset.
    pub fn layout(&mut self, viewport: Viewport) -> f64 {
        let target = self.offset(viewport);
        let presented = self.is_presented();
        let flipped = self.last_presented.is_some_and(|last| last != presented);
        let resized = self.viewport.is_some_and(|last| last != viewport);
        let dragging = self.state.phase == DragPhase::Dragging;

        match self.displayed.as_mut() {
            None => self.displayed = Some(SpringValue::new(target)),
            Some(displayed) => {
                if flipped {
                    displayed.animate_to(target, self.options.dismiss_animation);
                } else if dragging || resized {
                    displayed.snap_to(target);
                } else if displayed.target() != target {
                    displayed.animate_to(target, self.options.dismiss_animation);
                }
            }
        }

        self.last_presented = Some(presented);
        self.viewport = Some(viewport);
        target
    }

    /// Offset currently drawn, which trails [`BottomSheet::offset`] while animating.
    pub fn displayed_offset(&self) -> Option<f64> {
        self.displayed.as_ref().map(SpringValue::value)
    }

    pub fn is_animating(&self) -> bool {
        self.displayed
            .as_ref()
            .is_some_and(SpringValue::is_animating)
    }

    /// Advances the presentation animation. Returns `true` while a redraw is still needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.displayed
            .as_mut()
            .is_some_and(|displayed| displayed.tick(dt))
    }

    /// Feeds a host event. `timestamp` is the event time from any monotonic origin.
    ///
    /// Pointer input is ignored while the sheet is hidden so it does not swallow events meant
    /// for the content beneath it.
    pub fn handle_event(&mut self, event: InputEvent, timestamp: Duration) -> SheetAction {
        match event {
            InputEvent::Key(key) => {
                if self.is_presented() && keymap::matches_any(&self.options.bindings.dismiss, &key)
                {
                    debug!("bottom sheet dismissed from keyboard");
                    return self.request_dismissal();
                }
                SheetAction::None
            }
            InputEvent::Mouse(m) => {
                if !self.is_presented() && self.pointer.is_none() {
                    return SheetAction::None;
                }
                match m.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let on_panel = self
                            .panel
                            .is_some_and(|p| p.contains((m.x, m.y).into()));
                        self.pointer = Some(Pointer {
                            anchor_row: m.y,
                            moved: false,
                            on_panel,
                        });
                        SheetAction::None
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        let Some(pointer) = self.pointer.as_mut() else {
                            return SheetAction::None;
                        };
                        pointer.moved = true;
                        let translation = self.translation_for_row(m.y);
                        self.drag_changed(DragSample::new(translation, timestamp))
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        let Some(pointer) = self.pointer.take() else {
                            return SheetAction::None;
                        };
                        if pointer.moved {
                            let translation = (m.y as f64 - pointer.anchor_row as f64)
                                * self.options.row_height;
                            match self.viewport {
                                Some(viewport) => self.drag_ended(translation, viewport),
                                // No layout yet, so there is no sheet height to measure against.
                                None => {
                                    self.state = PresentationState::default();
                                    SheetAction::Redraw
                                }
                            }
                        } else if !pointer.on_panel {
                            self.tap_scrim()
                        } else {
                            SheetAction::None
                        }
                    }
                    _ => SheetAction::None,
                }
            }
            InputEvent::Resize(..) => SheetAction::Redraw,
            _ => SheetAction::None,
        }
    }

    fn translation_for_row(&self, row: u16) -> f64 {
        let anchor = self.pointer.map(|p| p.anchor_row).unwrap_or(row);
        (row as f64 - anchor as f64) * self.options.row_height
    }

    /// Lays out and draws the scrim and the panel over `area`.
    ///
    /// `content` receives the area below the top bar, minus the bottom safe-area rows, in screen
    /// coordinates. It is drawn off-screen at full sheet height and then copied in, so a sheet
    /// dragged past the bottom edge slides out instead of reflowing.
    pub fn render<F>(&mut self, area: Rect, buf: &mut Buffer, content: F)
    where
        F: FnOnce(Rect, &mut Buffer),
    {
        self.panel = None;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rh = self.options.row_height;
        let viewport = Viewport::from_area(area, rh, self.options.safe_area_rows);
        let target = self.layout(viewport);

        render::render_scrim(area, buf, self.options.scrim_color, self.scrim_opacity());

        let sheet_h = self.sheet_height(viewport);
        let offset = self.displayed_offset().unwrap_or(target);
        // Both edges round from points so a resting sheet's bottom edge is exact.
        let top_pt = (viewport.height - sheet_h) / 2.0 + offset;
        let top = area.y as i32 + points_to_rows(top_pt, rh);
        let bottom = area.y as i32 + points_to_rows(top_pt + sheet_h, rh);
        let rows = (bottom - top).clamp(0, u16::MAX as i32) as u16;
        let bottom = top + rows as i32;

        let visible_top = top.max(area.top() as i32);
        let visible_bottom = bottom.min(area.bottom() as i32);
        if rows == 0 || visible_bottom <= visible_top {
            return;
        }

        // Screen coordinates whenever the top edge is on screen, so content can hit-test.
        let origin = top.clamp(0, (u16::MAX - rows) as i32) as u16;
        let mut sheet = Buffer::empty(Rect::new(area.x, origin, area.width, rows));
        self.render_panel(sheet.area, &mut sheet, content);

        let panel = Rect::new(
            area.x,
            visible_top as u16,
            area.width,
            (visible_bottom - visible_top) as u16,
        );
        Clear.render(panel, buf);
        for y in panel.top()..panel.bottom() {
            let src_row = (origin as i32 + y as i32 - top) as u16;
            for x in panel.left()..panel.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    *cell = sheet[(x, src_row)].clone();
                }
            }
        }
        self.panel = Some(panel);
    }

    fn render_panel<F>(&self, area: Rect, buf: &mut Buffer, content: F)
    where
        F: FnOnce(Rect, &mut Buffer),
    {
        let opts = &self.options;
        buf.set_style(area, opts.content_style);

        let border_type = if opts.corner_radius() > 0.0 {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let block = Block::new()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(border_type)
            .border_style(opts.border_style);
        let mut inner = block.inner(area);
        block.render(area, buf);

        if opts.show_top_indicator && inner.height > 0 {
            let bar_rows = points_to_rows(opts.top_bar_thickness, opts.row_height)
                .clamp(1, inner.height as i32) as u16;
            let bar = Rect::new(inner.x, inner.y, inner.width, bar_rows);
            buf.set_style(bar, opts.top_bar_style);

            let grip_cols = points_to_rows(GRIP_WIDTH, opts.row_height / 2.0).max(1) as usize;
            let grip = "━".repeat(grip_cols);
            let grip_style = opts.top_bar_style.patch(opts.grip_style);
            render::render_str_centered(bar, bar.y + (bar_rows - 1) / 2, buf, &grip, grip_style);

            inner.y += bar_rows;
            inner.height -= bar_rows;
        }

        inner.height = inner.height.saturating_sub(opts.safe_area_rows);
        if inner.width > 0 && inner.height > 0 {
            content(inner, buf);
        }
    }
}
