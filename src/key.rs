use std::fmt;

/// An ordered sequence of field names locating a value within a record
/// hierarchy.
///
/// Keys are immutable; [`Key::append`] copies rather than shares, so the keys
/// of sibling fields never alias each other. Equality and rendering depend
/// only on the segment contents and their order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Key(Vec<String>);

impl Key {
	/// The empty key naming the top-level record itself.
	pub fn root() -> Self {
		Key(Vec::new())
	}

	/// Returns a new key with `segment` appended. The receiver is unchanged.
	pub fn append(&self, segment: impl Into<String>) -> Key {
		let mut segments = self.0.clone();
		segments.push(segment.into());
		Key(segments)
	}

	pub fn segments(&self) -> &[String] {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Renders this key as a lookup token suitable for environment-style
	/// sources: segments joined by underscores, letters upper-cased.
	///
	/// An underscore is inserted before an uppercase letter only where it
	/// starts a new word: the previous character is lowercase or a digit, or
	/// the previous character is uppercase and the next one is lowercase.
	/// Runs of uppercase letters therefore stay whole (`URL` stays `URL`,
	/// `baseURLPath` becomes `BASE_URL_PATH`). Every non-alphanumeric
	/// character maps to an underscore, and consecutive underscores collapse
	/// to one, so a double underscore is never emitted. The root key renders
	/// as the empty token.
	///
	/// Distinct keys can normalize to the same token (`two_words` and
	/// `TwoWords` both yield `TWO_WORDS`). Collisions are not detected; pick
	/// field names that do not meet in upper snake case.
	pub fn as_env(&self) -> String {
		let mut token = String::new();
		let mut last_under = false;
		for (i, piece) in self.0.iter().enumerate() {
			if i > 0 && !last_under {
				token.push('_');
				last_under = true;
			}
			let chars: Vec<char> = piece.chars().collect();
			for (j, &c) in chars.iter().enumerate() {
				if c.is_uppercase() {
					let starts_word = match j.checked_sub(1).map(|p| chars[p]) {
						Some(prev) if prev.is_lowercase() || prev.is_numeric() => true,
						Some(prev) if prev.is_uppercase() => {
							chars.get(j + 1).is_some_and(|next| next.is_lowercase())
						}
						_ => false,
					};
					if starts_word && !last_under {
						token.push('_');
					}
					token.extend(c.to_uppercase());
					last_under = false;
				} else if c.is_alphanumeric() {
					token.extend(c.to_uppercase());
					last_under = false;
				} else if !last_under {
					token.push('_');
					last_under = true;
				}
			}
		}
		token
	}
}

/// Dot-joins the segments. The root key renders as `"."` so that it can never
/// be confused with a missing path in diagnostics.
impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			f.write_str(".")
		} else {
			f.write_str(&self.0.join("."))
		}
	}
}

impl<S: Into<String>> FromIterator<S> for Key {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Key(iter.into_iter().map(Into::into).collect())
	}
}
