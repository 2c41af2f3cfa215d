use std::any::{type_name, Any};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;

/// How a method slot borrows its owner when invoked.
///
/// The two kinds are never interchangeable for removal matching, even when
/// the recorded addresses happen to coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    /// `fn(&T, A)`, shared borrow of the owner
    Ref,
    /// `fn(&mut T, A)`, exclusive borrow of the owner
    Mut,
}

/// Slot holding a free function.
pub(crate) struct FunctionSlot<A> {
    func: fn(A),
}

impl<A> FunctionSlot<A> {
    pub(crate) fn new(func: fn(A)) -> Self {
        Self { func }
    }

    pub(crate) fn invoke(&self, args: A) {
        (self.func)(args)
    }

    /// Address identity, not value equality.
    pub(crate) fn matches(&self, func: fn(A)) -> bool {
        self.func as usize == func as usize
    }
}

/// Slot holding a method together with a non-owning handle to the instance
/// it must be invoked through.
///
/// The owner type is erased: invocation goes through a boxed closure that
/// captures a typed `Weak<RefCell<T>>`, while matching and liveness checks
/// use a second, type-erased weak handle. The slot never keeps the owner
/// alive; the binding site is expected to unbind before dropping it.
pub(crate) struct MethodSlot<A> {
    call: Box<dyn Fn(A)>,
    owner: Weak<dyn Any>,
    method: usize,
    kind: MethodKind,
}

impl<A: 'static> MethodSlot<A> {
    pub(crate) fn by_ref<T: 'static>(method: fn(&T, A), owner: &Rc<RefCell<T>>) -> Self {
        let target = Rc::downgrade(owner);
        let identity: Weak<dyn Any> = Rc::<RefCell<T>>::downgrade(owner);
        Self {
            call: Box::new(move |args: A| match target.upgrade() {
                Some(cell) => method(&cell.borrow(), args),
                None => warn!(
                    "Skipping {} handler: owner dropped without unbinding",
                    type_name::<T>()
                ),
            }),
            owner: identity,
            method: method as usize,
            kind: MethodKind::Ref,
        }
    }

    pub(crate) fn by_mut<T: 'static>(method: fn(&mut T, A), owner: &Rc<RefCell<T>>) -> Self {
        let target = Rc::downgrade(owner);
        let identity: Weak<dyn Any> = Rc::<RefCell<T>>::downgrade(owner);
        Self {
            call: Box::new(move |args: A| match target.upgrade() {
                Some(cell) => method(&mut cell.borrow_mut(), args),
                None => warn!(
                    "Skipping {} handler: owner dropped without unbinding",
                    type_name::<T>()
                ),
            }),
            owner: identity,
            method: method as usize,
            kind: MethodKind::Mut,
        }
    }

    pub(crate) fn invoke(&self, args: A) {
        (self.call)(args)
    }

    /// Conjunction of method address, owner instance address and borrow kind.
    /// This is the predicate removal uses; owner address alone is never
    /// enough because one instance can have several methods bound.
    pub(crate) fn matches(&self, method: usize, owner: *const (), kind: MethodKind) -> bool {
        self.kind == kind && self.method == method && self.owner_addr() == owner
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }

    // The address survives the owner; it is only ever compared, never
    // dereferenced.
    fn owner_addr(&self) -> *const () {
        Weak::as_ptr(&self.owner) as *const ()
    }
}

/// One bound callable, either a free function or a method on an instance.
///
/// A closed tagged union rather than a downcast-based hierarchy, so removal
/// can match on explicit identity fields instead of probing types.
pub(crate) enum Slot<A> {
    Function(FunctionSlot<A>),
    Method(MethodSlot<A>),
}

impl<A: 'static> Slot<A> {
    pub(crate) fn invoke(&self, args: A) {
        match self {
            Slot::Function(slot) => slot.invoke(args),
            Slot::Method(slot) => slot.invoke(args),
        }
    }

    pub(crate) fn matches_function(&self, func: fn(A)) -> bool {
        matches!(self, Slot::Function(slot) if slot.matches(func))
    }

    pub(crate) fn matches_method(&self, method: usize, owner: *const (), kind: MethodKind) -> bool {
        matches!(self, Slot::Method(slot) if slot.matches(method, owner, kind))
    }

    pub(crate) fn is_dropped_method(&self) -> bool {
        matches!(self, Slot::Method(slot) if !slot.is_alive())
    }
}
