//! Route template compilation and reverse lookup.
//!
//! Route templates use the history-router grammar:
//! - `:name` captures one path segment (no `/` or `?`)
//! - `*name` captures the rest of the path, slashes included
//! - `( … )` marks an optional group, not nested
//! - everything else matches literally
//!
//! A matched fragment may carry a trailing `?query`, captured separately.

use crate::error::RouterError;
use crate::params::{ParamValue, ParameterMap};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Maximum allowed length for a route template in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed size for a compiled route regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Optional group or placeholder, whichever starts first.
static REVERSE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\((?P<group>.*?)\)|[:*](?P<param>\w+)").expect("static regex is valid")
});

/// Placeholder inside an optional group.
static PARAM_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[:*](?P<param>\w+)").expect("static regex is valid"));

/// Result of matching a fragment against a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
	/// One value per placeholder in declaration order. Placeholders inside an
	/// optional group that did not match are `Null`.
	pub values: Vec<ParamValue>,
	/// Raw query string after `?`, if any.
	pub query: Option<String>,
}

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	template: String,
	regex: Regex,
	param_names: Vec<String>,
}

impl RoutePattern {
	/// Compile a route template.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the template exceeds the
	/// maximum length, nests or leaves unbalanced optional groups, or compiles
	/// to a regex over the size limit.
	///
	/// # Examples
	///
	/// ```
	/// use shasta_urls::{ParamValue, RoutePattern};
	///
	/// let pattern = RoutePattern::new("animal/:name(/color/:color)").unwrap();
	/// assert_eq!(pattern.param_names(), &["name", "color"]);
	///
	/// let m = pattern.matches("animal/leland").unwrap();
	/// assert_eq!(m.values, vec![ParamValue::from("leland"), ParamValue::Null]);
	/// ```
	pub fn new(template: &str) -> Result<Self, RouterError> {
		if template.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(
				template,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					template.len(),
					MAX_PATTERN_LENGTH
				),
			));
		}

		let (regex_str, param_names) = Self::compile_template(template)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(template, format!("failed to compile regex: {}", e)))?;

		Ok(Self {
			template: template.to_string(),
			regex,
			param_names,
		})
	}

	/// Translate the template into an anchored regex and collect placeholder names.
	fn compile_template(template: &str) -> Result<(String, Vec<String>), RouterError> {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut in_group = false;
		let mut chars = template.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'(' => {
					if in_group {
						return Err(invalid(template, "nested optional groups are not supported"));
					}
					in_group = true;
					regex_str.push_str("(?:");
				}
				')' => {
					if !in_group {
						return Err(invalid(template, "unbalanced ')'"));
					}
					in_group = false;
					regex_str.push_str(")?");
				}
				':' | '*' => {
					let mut name = String::new();
					while let Some(&next) = chars.peek() {
						if !(next.is_alphanumeric() || next == '_') {
							break;
						}
						name.push(next);
						chars.next();
					}

					if name.is_empty() {
						// A bare sigil is literal text
						regex_str.push_str(&regex::escape(&c.to_string()));
					} else {
						regex_str.push_str(if c == ':' { "([^/?]+)" } else { "([^?]*?)" });
						param_names.push(name);
					}
				}
				_ => regex_str.push_str(&regex::escape(&c.to_string())),
			}
		}

		if in_group {
			return Err(invalid(template, "unclosed optional group"));
		}

		regex_str.push_str(r"(?:\?([\s\S]*))?$");
		Ok((regex_str, param_names))
	}

	/// Returns the original template.
	pub fn template(&self) -> &str {
		&self.template
	}

	/// Returns every placeholder name (required, optional and splat) in
	/// declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Checks if this pattern would match the given fragment.
	pub fn is_match(&self, fragment: &str) -> bool {
		self.regex.is_match(fragment)
	}

	/// Match a fragment, extracting percent-decoded values in declaration order.
	pub fn matches(&self, fragment: &str) -> Option<RouteMatch> {
		let caps = self.regex.captures(fragment)?;

		let values = (1..=self.param_names.len())
			.map(|i| {
				caps.get(i).map_or(ParamValue::Null, |m| {
					ParamValue::Str(decode(m.as_str()).into_owned())
				})
			})
			.collect();

		let query = caps
			.get(self.param_names.len() + 1)
			.map(|m| m.as_str().to_string());

		Some(RouteMatch { values, query })
	}

	/// Match a fragment and pair the values with their placeholder names.
	pub fn match_params(&self, fragment: &str) -> Option<ParameterMap> {
		self.matches(fragment)
			.map(|m| ParameterMap::from_values(&self.param_names, &m.values))
	}

	/// Build a URL from this template. See [`reverse_lookup`].
	pub fn reverse(&self, params: &ParameterMap) -> String {
		reverse_lookup(&self.template, params)
	}

	/// Build a URL from this template. See [`reverse_lookup_strict`].
	pub fn reverse_strict(&self, params: &ParameterMap) -> Result<String, RouterError> {
		reverse_lookup_strict(&self.template, params)
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.template == other.template
	}
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.template)
	}
}

fn invalid(template: &str, reason: impl Into<String>) -> RouterError {
	RouterError::InvalidPattern {
		template: template.to_string(),
		reason: reason.into(),
	}
}

fn decode(raw: &str) -> Cow<'_, str> {
	// Malformed escapes are passed through untouched
	urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Substitute parameters into a route template.
///
/// Each optional group is resolved on its own: when every placeholder in it is
/// present, the group is replaced by its substituted text without the
/// parentheses; otherwise the whole group disappears. A group with no
/// placeholder also disappears. Remaining placeholders take their value, or the
/// empty string when absent, so a missing required parameter leaves a dangling
/// separator behind. Values are inserted verbatim, without escaping.
///
/// # Examples
///
/// ```
/// use shasta_urls::{reverse_lookup, ParameterMap};
///
/// let template = "some-path/:id(/:name)";
/// let full = ParameterMap::new().with("id", 1).with("name", "leland");
/// let partial = ParameterMap::new().with("id", 1);
/// let none = ParameterMap::new().with("id", None::<i64>);
///
/// assert_eq!(reverse_lookup(template, &full), "some-path/1/leland");
/// assert_eq!(reverse_lookup(template, &partial), "some-path/1");
/// assert_eq!(reverse_lookup(template, &none), "some-path/");
/// ```
pub fn reverse_lookup(template: &str, params: &ParameterMap) -> String {
	let mut missing = Vec::new();
	substitute(template, params, &mut missing)
}

/// Like [`reverse_lookup`], but a required placeholder without a value is an
/// error instead of an empty substitution.
///
/// # Errors
///
/// Returns [`RouterError::MissingParameter`] naming the first absent required
/// placeholder.
pub fn reverse_lookup_strict(template: &str, params: &ParameterMap) -> Result<String, RouterError> {
	let mut missing = Vec::new();
	let url = substitute(template, params, &mut missing);
	match missing.into_iter().next() {
		Some(param) => Err(RouterError::MissingParameter {
			template: template.to_string(),
			param,
		}),
		None => Ok(url),
	}
}

/// Single left-to-right pass, so substituted values are never re-scanned.
fn substitute(template: &str, params: &ParameterMap, missing: &mut Vec<String>) -> String {
	REVERSE_TOKEN_RE
		.replace_all(template, |caps: &Captures<'_>| {
			if let Some(group) = caps.name("group") {
				resolve_group(group.as_str(), params)
			} else {
				let name = &caps["param"];
				match params.get_present(name) {
					Some(value) => value.to_string(),
					None => {
						missing.push(name.to_string());
						String::new()
					}
				}
			}
		})
		.into_owned()
}

fn resolve_group(group: &str, params: &ParameterMap) -> String {
	let mut placeholders = 0;
	let mut all_present = true;

	let substituted = PARAM_RE.replace_all(group, |caps: &Captures<'_>| {
		placeholders += 1;
		match params.get_present(&caps["param"]) {
			Some(value) => value.to_string(),
			None => {
				all_present = false;
				String::new()
			}
		}
	});

	if placeholders > 0 && all_present {
		substituted.into_owned()
	} else {
		String::new()
	}
}
