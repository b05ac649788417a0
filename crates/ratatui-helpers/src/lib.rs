//! Small, batteries-included helpers for ratatui apps.
//!
//! Everything from `ratatui-helpers-core` is re-exported under the same module names, so
//! `ratatui_helpers::bottom_sheet::BottomSheet` and friends work without a second dependency.
//!
//! On top of the core this crate adds thin helpers:
//! - [`modifiers::WidgetExt`]: `when`, `hidden`, `loading`, `square` for any widget.
//! - [`ext`]: `push_if_some` for vectors and currency formatting for `f64`.
//! - [`search_bar::SearchBar`] and [`placeholder::PlaceholderTextView`]: bound text inputs.
//! - [`feedback`] and [`share`]: app-pluggable feedback and share requests.
pub use ratatui_helpers_core::animation;
pub use ratatui_helpers_core::binding;
pub use ratatui_helpers_core::bottom_sheet;
pub use ratatui_helpers_core::editor;
pub use ratatui_helpers_core::geometry;
pub use ratatui_helpers_core::gesture;
pub use ratatui_helpers_core::input;
pub use ratatui_helpers_core::keymap;
pub use ratatui_helpers_core::render;
pub use ratatui_helpers_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_helpers_core::crossterm_input;

pub mod ext;
pub mod feedback;
pub mod modifiers;
pub mod placeholder;
pub mod search_bar;
pub mod share;
