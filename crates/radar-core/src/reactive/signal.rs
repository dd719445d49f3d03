//! Signal - observable value cell
//!
//! `Signal<T>` holds a value shared by all of its clones and notifies
//! subscribers whenever the value is replaced or updated.
//!
//! ## Example
//!
//! ```
//! use radar_core::reactive::Signal;
//!
//! let count = Signal::new(0);
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

/// Handle returned by [`Signal::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
}

/// An observable value shared between clones.
///
/// Signals are single-threaded (`Rc`-based), matching the host's single
/// execution context. All clones observe the same value and subscribers.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<Subscribers<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Creates a new signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(Subscribers {
				next_id: Cell::new(0),
				entries: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Runs `f` with a reference to the current value.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
		T: Clone,
	{
		f(&mut *self.value.borrow_mut());
		self.notify();
	}

	/// Registers a callback invoked after every change.
	///
	/// Callbacks receive a snapshot of the new value, so they may read or
	/// write the signal themselves.
	pub fn subscribe<F>(&self, f: F) -> SubscriptionId
	where
		F: Fn(&T) + 'static,
	{
		let id = SubscriptionId(self.subscribers.next_id.get());
		self.subscribers.next_id.set(id.0 + 1);
		self.subscribers
			.entries
			.borrow_mut()
			.push((id, Rc::new(f)));
		id
	}

	/// Removes a subscriber. Returns whether it was registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut entries = self.subscribers.entries.borrow_mut();
		let before = entries.len();
		entries.retain(|(entry_id, _)| *entry_id != id);
		entries.len() != before
	}

	/// Returns the number of registered subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.entries.borrow().len()
	}

	fn notify(&self)
	where
		T: Clone,
	{
		// Callbacks and value are snapshotted so callbacks can re-enter the signal.
		let callbacks: Vec<Subscriber<T>> = self
			.subscribers
			.entries
			.borrow()
			.iter()
			.map(|(_, cb)| Rc::clone(cb))
			.collect();
		if callbacks.is_empty() {
			return;
		}
		let snapshot = self.value.borrow().clone();
		for callback in callbacks {
			callback(&snapshot);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_clones_share_value() {
		let a = Signal::new(String::from("home"));
		let b = a.clone();
		b.set("demandas".to_string());
		assert_eq!(a.get(), "demandas");
	}

	#[rstest]
	fn test_subscribers_see_every_change() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		signal.subscribe(move |v| sink.borrow_mut().push(*v));

		signal.set(1);
		signal.update(|v| *v += 10);

		assert_eq!(*seen.borrow(), vec![1, 11]);
	}

	#[rstest]
	fn test_unsubscribe() {
		let signal = Signal::new(0);
		let hits = Rc::new(Cell::new(0));
		let counter = Rc::clone(&hits);
		let id = signal.subscribe(move |_| counter.set(counter.get() + 1));

		signal.set(1);
		assert!(signal.unsubscribe(id));
		assert!(!signal.unsubscribe(id));
		signal.set(2);

		assert_eq!(hits.get(), 1);
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[rstest]
	fn test_subscriber_may_read_signal() {
		let signal = Signal::new(5);
		let reader = signal.clone();
		let seen = Rc::new(Cell::new(0));
		let sink = Rc::clone(&seen);
		signal.subscribe(move |_| sink.set(reader.get()));

		signal.set(7);
		assert_eq!(seen.get(), 7);
	}
}
