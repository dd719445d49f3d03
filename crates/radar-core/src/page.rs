//! Page types for view rendering.
//!
//! The `Page` enum is the renderable unit handed to the host renderer. Route
//! views produce a `Page` every time they are mounted.
//!
//! ## Example
//!
//! ```
//! use radar_core::page::{IntoPage, PageElement};
//!
//! let page = PageElement::new("div")
//! 	.attr("class", "container")
//! 	.child("Hello, World!")
//! 	.into_page();
//!
//! assert_eq!(page.render_to_string(), "<div class=\"container\">Hello, World!</div>");
//! ```

mod util;

pub use util::{BOOLEAN_ATTRS, is_boolean_attr_truthy};
pub(crate) use util::html_escape;

use std::borrow::Cow;

/// A unified representation of renderable content.
#[derive(Debug)]
pub enum Page {
	/// A DOM element.
	Element(PageElement),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<Page>),
	/// An empty view (renders nothing).
	Empty,
}

/// Represents a DOM element in the view tree.
#[derive(Debug)]
pub struct PageElement {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Page>,
	is_void: bool,
}

impl PageElement {
	/// Creates a new element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a boolean attribute when `value` is true.
	pub fn bool_attr(self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
		if value {
			let name = name.into();
			self.attr(name.clone(), name)
		} else {
			self
		}
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_page()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute called `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[Page] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl Page {
	/// Creates an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_page()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns whether this page renders nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Page::Empty => true,
			Page::Fragment(children) => children.iter().all(Page::is_empty),
			_ => false,
		}
	}

	/// Renders the page to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			Page::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					let name_str: &str = name.as_ref();
					if BOOLEAN_ATTRS.contains(&name_str) && !is_boolean_attr_truthy(value) {
						continue;
					}

					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			Page::Text(text) => {
				output.push_str(&html_escape(text));
			}
			Page::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			Page::Empty => {}
		}
	}
}

/// Conversion into a renderable [`Page`].
pub trait IntoPage {
	/// Converts `self` into a page.
	fn into_page(self) -> Page;
}

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl IntoPage for &String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self.clone()))
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoPage> IntoPage for Option<T> {
	fn into_page(self) -> Page {
		match self {
			Some(inner) => inner.into_page(),
			None => Page::Empty,
		}
	}
}

impl IntoPage for () {
	fn into_page(self) -> Page {
		Page::Empty
	}
}

/// Trait for reusable UI components.
///
/// ```
/// use radar_core::page::{Component, IntoPage, Page, PageElement};
///
/// struct Greeting {
/// 	name: String,
/// }
///
/// impl Component for Greeting {
/// 	fn render(&self) -> Page {
/// 		PageElement::new("p")
/// 			.child(format!("Hello, {}!", self.name))
/// 			.into_page()
/// 	}
///
/// 	fn name() -> &'static str {
/// 		"Greeting"
/// 	}
/// }
///
/// let html = Greeting { name: "RADAR".into() }.render().render_to_string();
/// assert_eq!(html, "<p>Hello, RADAR!</p>");
/// ```
pub trait Component: 'static {
	/// Renders the component to a page.
	fn render(&self) -> Page;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_render_nested_element() {
		let page = PageElement::new("section")
			.attr("id", "main")
			.child(PageElement::new("h1").child("Title"))
			.child("body")
			.into_page();

		assert_eq!(
			page.render_to_string(),
			"<section id=\"main\"><h1>Title</h1>body</section>"
		);
	}

	#[rstest]
	fn test_render_escapes_text_and_attrs() {
		let page = PageElement::new("span")
			.attr("title", "a \"quoted\" <value>")
			.child("1 < 2 & 3")
			.into_page();

		assert_eq!(
			page.render_to_string(),
			"<span title=\"a &quot;quoted&quot; &lt;value&gt;\">1 &lt; 2 &amp; 3</span>"
		);
	}

	#[rstest]
	fn test_void_element() {
		let page = PageElement::new("img").attr("src", "/logo.svg").into_page();
		assert_eq!(page.render_to_string(), "<img src=\"/logo.svg\" />");
	}

	#[rstest]
	#[case("true", true)]
	#[case("false", false)]
	fn test_boolean_attr_rendering(#[case] value: &'static str, #[case] present: bool) {
		let html = PageElement::new("div")
			.attr("hidden", value)
			.into_page()
			.render_to_string();
		assert_eq!(html.contains("hidden"), present);
	}

	#[rstest]
	fn test_fragment_and_empty() {
		let page = Page::fragment(vec![Page::text("a"), Page::empty(), Page::text("b")]);
		assert_eq!(page.render_to_string(), "ab");
		assert!(!page.is_empty());
		assert!(Page::fragment(Vec::<Page>::new()).is_empty());
	}

	#[rstest]
	fn test_get_attr() {
		let el = PageElement::new("a").attr("href", "/demandas");
		assert_eq!(el.get_attr("href"), Some("/demandas"));
		assert_eq!(el.get_attr("class"), None);
	}
}
