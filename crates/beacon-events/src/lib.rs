//! In-process, synchronous event dispatch.
//!
//! An [`Event`] owns an ordered list of bindings sharing one call
//! signature: free functions, methods invoked through a shared borrow of
//! their owner, and methods invoked through an exclusive borrow. Firing
//! the event invokes every binding in binding order on the calling thread.
//! Bindings are removed selectively by identity (function address, or
//! method address plus owner instance).
//!
//! This is a local dispatch list, not a messaging system: there is no
//! thread safety, no handler priorities and no delivery guarantees beyond
//! "every binding, in order, right now". `Event` is not `Send`; external
//! synchronization is required to share one across threads.

mod event;
mod slot;


pub use event::Event;
