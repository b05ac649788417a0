//! Widget modifiers: conditional transforms, visibility, loading overlays, fixed frames.
//!
//! ```
//! use ratatui::layout::Alignment;
//! use ratatui::widgets::Paragraph;
//! use ratatui_helpers::modifiers::WidgetExt;
//!
//! let is_loading = true;
//! let view = Paragraph::new("contacts")
//!     .when(false, |p| p.alignment(Alignment::Center))
//!     .loading(is_loading, Paragraph::new("Loading…"));
//! # let _ = view;
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Margin;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

/// One of two widgets, picked at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L: Widget, R: Widget> Widget for Either<L, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            Either::Left(w) => w.render(area, buf),
            Either::Right(w) => w.render(area, buf),
        }
    }
}

/// Renders the wrapped widget unless hidden. A hidden widget keeps its area; nothing is drawn.
#[derive(Clone, Debug)]
pub struct Hidden<W> {
    inner: W,
    hidden: bool,
}

impl<W: Widget> Widget for Hidden<W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.hidden {
            self.inner.render(area, buf);
        }
    }
}

/// Swaps the wrapped widget for `loading_content`, inset by one cell, while loading.
#[derive(Clone, Debug)]
pub struct Loading<W, L> {
    inner: W,
    loading_content: L,
    is_loading: bool,
}

impl<W: Widget, L: Widget> Widget for Loading<W, L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.is_loading {
            let padded = area.inner(Margin::new(1, 1));
            self.loading_content.render(padded, buf);
        } else {
            self.inner.render(area, buf);
        }
    }
}

/// Centres the wrapped widget in a `size`×`size` cell frame.
#[derive(Clone, Debug)]
pub struct Square<W> {
    inner: W,
    size: u16,
}

impl<W: Widget> Widget for Square<W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.inner.render(square_in(area, self.size), buf);
    }
}

/// The `size`×`size` rect centred in `area`, shrunk to fit.
pub fn square_in(area: Rect, size: u16) -> Rect {
    let w = size.min(area.width);
    let h = size.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

pub trait WidgetExt: Widget + Sized {
    /// Applies `transform` when `condition` holds, otherwise keeps `self`.
    fn when<W, F>(self, condition: bool, transform: F) -> Either<W, Self>
    where
        W: Widget,
        F: FnOnce(Self) -> W,
    {
        if condition {
            Either::Left(transform(self))
        } else {
            Either::Right(self)
        }
    }

    fn hidden(self, hidden: bool) -> Hidden<Self> {
        Hidden {
            inner: self,
            hidden,
        }
    }

    fn loading<L: Widget>(self, is_loading: bool, loading_content: L) -> Loading<Self, L> {
        Loading {
            inner: self,
            loading_content,
            is_loading,
        }
    }

    fn square(self, size: u16) -> Square<Self> {
        Square { inner: self, size }
    }
}

impl<W: Widget> WidgetExt for W {}
