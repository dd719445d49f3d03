//! Eager and deferred route views.
//!
//! A [`LazyView`] wraps an asynchronous loader that yields a
//! [`ViewFactory`]. The first successful load is memoized for the lifetime
//! of the view; concurrent loads share one in-flight future, so the loader
//! runs at most once per successful load. A failed load is not cached and
//! the next request retries.

use super::error::LoadError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use radar_core::Page;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Renders a view into a page tree.
#[derive(Clone)]
pub struct ViewFactory(Arc<dyn Fn() -> Page + Send + Sync>);

impl ViewFactory {
	/// Wraps a render function.
	pub fn new<F>(render: F) -> Self
	where
		F: Fn() -> Page + Send + Sync + 'static,
	{
		Self(Arc::new(render))
	}

	/// Renders a fresh page tree.
	pub fn render(&self) -> Page {
		(self.0)()
	}

	/// Returns whether both factories wrap the same render function.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for ViewFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewFactory").finish_non_exhaustive()
	}
}

/// Future produced by a lazy view loader.
pub type LoadFuture = BoxFuture<'static, Result<ViewFactory, LoadError>>;

type Loader = dyn Fn() -> LoadFuture + Send + Sync;

struct LazyInner {
	cell: OnceCell<ViewFactory>,
	in_flight: Mutex<Option<Shared<LoadFuture>>>,
	loader: Box<Loader>,
	load_count: AtomicUsize,
}

/// A view fetched on first use and memoized afterwards.
///
/// Clones share the same cache.
///
/// # Examples
///
/// ```
/// use radar_core::Page;
/// use radar_urls::client_router::{LazyView, ViewFactory};
///
/// # futures::executor::block_on(async {
/// let view = LazyView::from_async(|| async {
///     Ok(ViewFactory::new(|| Page::text("Demandas")))
/// });
/// assert!(!view.is_loaded());
///
/// view.load().await.unwrap();
/// view.load().await.unwrap();
/// assert!(view.is_loaded());
/// assert_eq!(view.load_count(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct LazyView {
	inner: Arc<LazyInner>,
}

impl LazyView {
	/// Creates a lazy view from a loader returning a boxed future.
	pub fn new<F>(loader: F) -> Self
	where
		F: Fn() -> LoadFuture + Send + Sync + 'static,
	{
		Self {
			inner: Arc::new(LazyInner {
				cell: OnceCell::new(),
				in_flight: Mutex::new(None),
				loader: Box::new(loader),
				load_count: AtomicUsize::new(0),
			}),
		}
	}

	/// Creates a lazy view from an `async` loader.
	pub fn from_async<F, Fut>(loader: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<ViewFactory, LoadError>> + Send + 'static,
	{
		Self::new(move || loader().boxed())
	}

	/// Returns whether the view has been loaded.
	pub fn is_loaded(&self) -> bool {
		self.inner.cell.get().is_some()
	}

	/// Returns whether a load is currently in flight.
	pub fn is_loading(&self) -> bool {
		self.inner.in_flight.lock().is_some()
	}

	/// Returns the loaded view without triggering a load.
	pub fn get_if_loaded(&self) -> Option<ViewFactory> {
		self.inner.cell.get().cloned()
	}

	/// Returns how many times the loader has been invoked.
	pub fn load_count(&self) -> usize {
		self.inner.load_count.load(Ordering::SeqCst)
	}

	/// Loads the view, joining an in-flight load when there is one.
	///
	/// # Errors
	///
	/// Returns the loader's error. The view stays unloaded.
	pub async fn load(&self) -> Result<ViewFactory, LoadError> {
		if let Some(view) = self.inner.cell.get() {
			return Ok(view.clone());
		}

		let pending = {
			let mut slot = self.inner.in_flight.lock();
			if let Some(view) = self.inner.cell.get() {
				return Ok(view.clone());
			}
			match slot.as_ref() {
				Some(pending) => pending.clone(),
				None => {
					self.inner.load_count.fetch_add(1, Ordering::SeqCst);
					let pending = (self.inner.loader)().shared();
					*slot = Some(pending.clone());
					pending
				}
			}
		};

		let result = pending.clone().await;

		let mut slot = self.inner.in_flight.lock();
		if let Ok(view) = &result {
			// Another waiter on the same future may have stored it already.
			let _ = self.inner.cell.set(view.clone());
		}
		if slot.as_ref().is_some_and(|current| current.ptr_eq(&pending)) {
			*slot = None;
		}
		result
	}
}

impl fmt::Debug for LazyView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LazyView")
			.field("loaded", &self.is_loaded())
			.field("load_count", &self.load_count())
			.finish()
	}
}

/// The view bound to a route.
#[derive(Debug, Clone)]
pub enum RouteView {
	/// Available immediately.
	Eager(ViewFactory),
	/// Fetched on first navigation.
	Lazy(LazyView),
}

impl RouteView {
	/// Creates an eager view.
	pub fn eager<F>(render: F) -> Self
	where
		F: Fn() -> Page + Send + Sync + 'static,
	{
		Self::Eager(ViewFactory::new(render))
	}

	/// Creates a lazy view from an `async` loader.
	pub fn lazy<F, Fut>(loader: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<ViewFactory, LoadError>> + Send + 'static,
	{
		Self::Lazy(LazyView::from_async(loader))
	}

	/// Returns whether the view is deferred.
	pub fn is_lazy(&self) -> bool {
		matches!(self, Self::Lazy(_))
	}

	/// Returns the view if it can be mounted without waiting.
	pub fn ready(&self) -> Option<ViewFactory> {
		match self {
			Self::Eager(view) => Some(view.clone()),
			Self::Lazy(lazy) => lazy.get_if_loaded(),
		}
	}

	/// Returns the view, loading it first if needed.
	pub async fn resolve(&self) -> Result<ViewFactory, LoadError> {
		match self {
			Self::Eager(view) => Ok(view.clone()),
			Self::Lazy(lazy) => lazy.load().await,
		}
	}
}

impl From<ViewFactory> for RouteView {
	fn from(view: ViewFactory) -> Self {
		Self::Eager(view)
	}
}

impl From<LazyView> for RouteView {
	fn from(view: LazyView) -> Self {
		Self::Lazy(view)
	}
}
