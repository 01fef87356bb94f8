//! Typed event slots.
//!
//! Each named widget event is a dedicated slot owned by the widget state
//! that fires it, rather than an entry in a process-wide registry. A slot
//! holds at most one handler: binding replaces any prior handler, clearing
//! removes it, and emitting with no handler bound is a no-op. Emission is
//! synchronous; `emit` returns only after the handler has run, so handlers
//! may mutate state that later frame phases observe.
//!
//! Widgets conventionally clear and rebind their slots from `before_build`,
//! which gives handler registration the same per-frame cadence as child
//! appending.

use std::fmt;

/// A rebindable handler slot for one named widget event.
pub struct Slot<A> {
    /// The bound handler, if any.
    handler: Option<Box<dyn FnMut(A)>>,
}

impl<A> Slot<A> {
    /// An unbound slot.
    pub fn new() -> Self {
        Self { handler: None }
    }

    /// Bind a handler, replacing any prior one.
    pub fn bind(&mut self, handler: impl FnMut(A) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Remove the bound handler, if any.
    pub fn clear(&mut self) {
        self.handler = None;
    }

    /// True when a handler is bound.
    pub fn is_bound(&self) -> bool {
        self.handler.is_some()
    }

    /// Invoke the bound handler synchronously with `args`. No-op when
    /// unbound.
    pub fn emit(&mut self, args: A) {
        if let Some(handler) = self.handler.as_mut() {
            handler(args);
        }
    }
}

impl<A> Default for Slot<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Slot<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn emit_unbound_is_noop() {
        let mut slot: Slot<usize> = Slot::new();
        slot.emit(7);
        assert!(!slot.is_bound());
    }

    #[test]
    fn bind_replaces_prior_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new();

        let log = Rc::clone(&seen);
        slot.bind(move |v: usize| log.borrow_mut().push(("first", v)));
        let log = Rc::clone(&seen);
        slot.bind(move |v: usize| log.borrow_mut().push(("second", v)));

        slot.emit(3);
        assert_eq!(*seen.borrow(), vec![("second", 3)]);
    }

    #[test]
    fn bind_clear_emit_is_noop() {
        let seen = Rc::new(RefCell::new(0));
        let mut slot = Slot::new();
        let log = Rc::clone(&seen);
        slot.bind(move |v: i32| *log.borrow_mut() += v);
        slot.clear();
        slot.emit(5);
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn emission_is_synchronous() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new();
        let log = Rc::clone(&seen);
        slot.bind(move |v: i32| log.borrow_mut().push(v));
        seen.borrow_mut().push(0);
        slot.emit(1);
        seen.borrow_mut().push(2);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }
}
