//! Rendering helpers shared by the page tree.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text and attribute values.
///
/// Borrows the input when nothing needs escaping.
pub(crate) fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}

	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// HTML boolean attributes the renderer drops when their value is falsy.
pub const BOOLEAN_ATTRS: &[&str] = &[
	"async",
	"autofocus",
	"checked",
	"defer",
	"disabled",
	"hidden",
	"inert",
	"multiple",
	"open",
	"readonly",
	"required",
	"selected",
];

/// Returns `false` for empty strings, `"false"` and `"0"`.
pub fn is_boolean_attr_truthy(value: &str) -> bool {
	!value.is_empty() && value != "false" && value != "0"
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_html_escape_borrows_plain_text() {
		assert!(matches!(html_escape("Interrupções"), Cow::Borrowed(_)));
	}

	#[rstest]
	#[case("a & b", "a &amp; b")]
	#[case("<div>", "&lt;div&gt;")]
	#[case("\"x\" 'y'", "&quot;x&quot; &#x27;y&#x27;")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	#[case("true", true)]
	#[case("hidden", true)]
	#[case("", false)]
	#[case("false", false)]
	#[case("0", false)]
	fn test_is_boolean_attr_truthy(#[case] value: &str, #[case] expected: bool) {
		assert_eq!(is_boolean_attr_truthy(value), expected);
	}
}
