//! Two-way bindings to caller-owned state.
//!
//! Components never own the canonical value behind a [`Binding`]. They read it through the
//! getter and request changes through the setter, so the caller stays the source of truth.

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A getter/setter pair over a value owned elsewhere.
///
/// Bindings are cheap to clone; clones refer to the same underlying state. They are `!Send`:
/// everything here runs on the UI thread.
pub struct Binding<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T> Binding<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }
}

impl<T: Copy + 'static> Binding<T> {
    pub fn from_cell(cell: Rc<Cell<T>>) -> Self {
        let reader = Rc::clone(&cell);
        Self::new(move || reader.get(), move |v| cell.set(v))
    }
}

impl<T: Clone + 'static> Binding<T> {
    pub fn from_ref_cell(cell: Rc<RefCell<T>>) -> Self {
        let reader = Rc::clone(&cell);
        Self::new(
            move || reader.borrow().clone(),
            move |v| *cell.borrow_mut() = v,
        )
    }

    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: T) -> Self {
        Self::new(move || value.clone(), |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_binding_writes_through() {
        let shown = Rc::new(Cell::new(true));
        let binding = Binding::from_cell(Rc::clone(&shown));
        let other = binding.clone();

        other.set(false);
        assert!(!shown.get());
        assert!(!binding.get());
    }

    #[test]
    fn ref_cell_binding_reads_external_changes() {
        let text = Rc::new(RefCell::new(String::from("a")));
        let binding = Binding::from_ref_cell(Rc::clone(&text));
        text.borrow_mut().push('b');
        assert_eq!(binding.get(), "ab");
        binding.set("c".to_string());
        assert_eq!(*text.borrow(), "c");
    }

    #[test]
    fn constant_ignores_writes() {
        let binding = Binding::constant(7);
        binding.set(9);
        assert_eq!(binding.get(), 7);
    }
}
