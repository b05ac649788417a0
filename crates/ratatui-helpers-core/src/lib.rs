//! `ratatui-helpers-core` provides the primitives behind `ratatui-helpers`.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: your app feeds events and frame times in and draws when told to.
//! - No async runtime: everything runs on the UI thread, and bindings are `!Send`.
//! - State you care about stays yours: components read and write it through
//!   [`binding::Binding`] instead of owning it.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-helpers`. Useful entry points here:
//! - [`bottom_sheet::BottomSheet`]: draggable bottom panel with flick and drag-to-dismiss.
//! - [`animation::SpringValue`]: spring animator driven by frame deltas.
//! - [`editor::TextEditor`]: small non-scrolling text buffer used by the input components.
//!
//! ## Units
//!
//! The sheet works in points. [`geometry::Viewport::from_area`] converts terminal rows with a
//! configurable number of points per row.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;

pub mod animation;
pub mod binding;
pub mod geometry;
pub mod gesture;

pub mod bottom_sheet;
pub mod editor;
