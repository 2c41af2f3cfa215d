use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::slot::{FunctionSlot, MethodKind, MethodSlot, Slot};

/// An ordered collection of callable bindings sharing one call signature.
///
/// Every binding takes the event's argument type `A` and returns nothing.
/// Firing the event with [`Event::emit`] invokes each binding in the order
/// it was bound, handing every handler its own clone of the argument value.
/// Functions with more than one logical parameter use a tuple for `A`.
///
/// Bindings are removed selectively by identity: a free function matches by
/// its address, a method by method address plus owner instance plus borrow
/// kind. Removal of something that was never bound is a silent no-op, and
/// duplicates are allowed (each fires independently).
///
/// Dropping the event drops every binding. Bound owners are never kept
/// alive by the event; unbind a method before dropping its owner, or sweep
/// stale bindings with [`Event::unbind_dropped`].
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use beacon_events::Event;
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn record(&mut self, _value: i32) {
///         self.hits += 1;
///     }
/// }
///
/// fn print_value(value: i32) {
///     println!("value changed: {value}");
/// }
///
/// let mut on_change = Event::<i32>::new();
/// let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
///
/// on_change.bind(print_value);
/// on_change.bind_method_mut(Counter::record, &counter);
/// on_change.emit(5);
/// assert_eq!(counter.borrow().hits, 1);
///
/// on_change.unbind(print_value);
/// assert_eq!(on_change.len(), 1);
/// ```
pub struct Event<A: Clone + 'static> {
    slots: Vec<Slot<A>>,
}

impl<A: Clone + 'static> Event<A> {
    /// Creates an empty event.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Binds a free function. Binding the same function twice is allowed;
    /// both bindings fire on every emit.
    pub fn bind(&mut self, func: fn(A)) {
        self.slots.push(Slot::Function(FunctionSlot::new(func)));
        debug!(
            "Bound function handler for {}, {} total",
            type_name::<A>(),
            self.slots.len()
        );
    }

    /// Binds a method invoked through a shared borrow of `owner`.
    ///
    /// The event holds only a weak handle to `owner`; keep it alive for as
    /// long as the binding should fire.
    pub fn bind_method<T: 'static>(&mut self, method: fn(&T, A), owner: &Rc<RefCell<T>>) {
        self.slots.push(Slot::Method(MethodSlot::by_ref(method, owner)));
        debug!(
            "Bound {} method handler for {}, {} total",
            type_name::<T>(),
            type_name::<A>(),
            self.slots.len()
        );
    }

    /// Binds a method invoked through an exclusive borrow of `owner`.
    ///
    /// The event holds only a weak handle to `owner`; keep it alive for as
    /// long as the binding should fire.
    pub fn bind_method_mut<T: 'static>(&mut self, method: fn(&mut T, A), owner: &Rc<RefCell<T>>) {
        self.slots.push(Slot::Method(MethodSlot::by_mut(method, owner)));
        debug!(
            "Bound {} method handler for {}, {} total",
            type_name::<T>(),
            type_name::<A>(),
            self.slots.len()
        );
    }

    /// Fires the event: invokes every binding in binding order, on the
    /// calling thread, each with its own clone of `args`.
    ///
    /// A method binding whose owner has been dropped logs a warning and is
    /// skipped; the remaining bindings still fire.
    ///
    /// Handlers cannot bind to or unbind from the event they are being
    /// dispatched from: `emit` borrows the event shared while every
    /// mutation needs an exclusive borrow, and an event shared through a
    /// `RefCell` panics on the reentrant borrow instead.
    pub fn emit(&self, args: A) {
        trace!(
            "Dispatching {} to {} handlers",
            type_name::<A>(),
            self.slots.len()
        );
        for slot in &self.slots {
            slot.invoke(args.clone());
        }
    }

    /// Removes every binding of `func`. Unbinding a function that is not
    /// bound is a silent no-op.
    pub fn unbind(&mut self, func: fn(A)) {
        let before = self.slots.len();
        self.slots.retain(|slot| !slot.matches_function(func));
        debug!(
            "Unbound {} function handler(s) for {}",
            before - self.slots.len(),
            type_name::<A>()
        );
    }

    /// Removes every shared-borrow binding of `method` on this particular
    /// `owner` instance. Other instances bound with the same method keep
    /// their bindings.
    pub fn unbind_method<T: 'static>(&mut self, method: fn(&T, A), owner: &Rc<RefCell<T>>) {
        self.remove_method(method as usize, Rc::as_ptr(owner) as *const (), MethodKind::Ref);
    }

    /// Removes every exclusive-borrow binding of `method` on this particular
    /// `owner` instance.
    pub fn unbind_method_mut<T: 'static>(&mut self, method: fn(&mut T, A), owner: &Rc<RefCell<T>>) {
        self.remove_method(method as usize, Rc::as_ptr(owner) as *const (), MethodKind::Mut);
    }

    /// Removes every binding, returning the event to the empty state.
    pub fn unbind_all(&mut self) {
        debug!(
            "Unbound all {} handler(s) for {}",
            self.slots.len(),
            type_name::<A>()
        );
        self.slots.clear();
    }

    /// Removes every method binding whose owner has been dropped.
    pub fn unbind_dropped(&mut self) {
        let before = self.slots.len();
        self.slots.retain(|slot| !slot.is_dropped_method());
        debug!(
            "Swept {} dropped handler(s) for {}",
            before - self.slots.len(),
            type_name::<A>()
        );
    }

    /// Number of bindings currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn remove_method(&mut self, method: usize, owner: *const (), kind: MethodKind) {
        let before = self.slots.len();
        self.slots
            .retain(|slot| !slot.matches_method(method, owner, kind));
        debug!(
            "Unbound {} method handler(s) for {}",
            before - self.slots.len(),
            type_name::<A>()
        );
    }
}

impl<A: Clone + 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone + 'static> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("args", &type_name::<A>())
            .field("handlers", &self.slots.len())
            .finish()
    }
}
