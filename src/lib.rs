//! Populate typed, nested structs from a flat key/value source.
//!
//! A [`Source`] is anything that can hand back a raw string for a [`Key`] —
//! the process environment, a file, a remote configuration store. Deriving
//! [`Populate`] on a struct generates the field walk that looks up each
//! field under its hierarchical key, coerces the raw string to the field's
//! type, and recurses into nested records, lists, and optional fields.
//!
//! ```
//! use std::collections::HashMap;
//! use flatsource::Populate;
//!
//! #[derive(Debug, Default, Populate)]
//! struct Server {
//! 	host: String,
//! 	listen_port: u16,
//! }
//!
//! #[derive(Debug, Default, Populate)]
//! struct Config {
//! 	server: Server,
//! 	verbose: bool,
//! }
//!
//! let source: HashMap<String, String> = [
//! 	("SERVER_HOST".to_owned(), "0.0.0.0".to_owned()),
//! 	("SERVER_LISTEN_PORT".to_owned(), "8080".to_owned()),
//! 	("VERBOSE".to_owned(), "true".to_owned()),
//! ]
//! .into();
//!
//! let mut config = Config::default();
//! flatsource::populate(&mut config, &source)?;
//! assert_eq!(config.server.host, "0.0.0.0");
//! assert_eq!(config.server.listen_port, 8080);
//! assert!(config.verbose);
//! # Ok::<(), flatsource::Error>(())
//! ```
//!
//! Supported field shapes are fixed: terminals (`bool`, the integer
//! families, `f32`/`f64`, `String`), `Vec` of a terminal or of a boxed
//! terminal, nested records deriving [`Populate`], and `Option` around any
//! of these. Anything else is rejected when the struct is compiled, not at
//! run time:
//!
//! ```compile_fail
//! use flatsource::Populate;
//!
//! #[derive(Default, Populate)]
//! struct Bad {
//! 	lookup: std::collections::HashMap<String, bool>,
//! }
//! ```
//!
//! A list travels as one value holding a JSON array literal, e.g.
//! `SIBLINGS=["Dave","Eve"]`. Elements coerce through the same rules as
//! terminal fields, so the JSON number `3` and the JSON string `"3"` land
//! identically in an integer slot.
//!
//! Population is synchronous and single-threaded; lookups are issued one at
//! a time in field declaration order. Known limitations, by design:
//!
//! - Population is not atomic. The first error aborts the walk and fields
//!   written before it keep their values.
//! - A value that is present but empty is indistinguishable from an absent
//!   one; it is never coerced and the field keeps its current value.
//! - Distinct field paths can normalize to the same lookup token; see
//!   [`Key::as_env`].

#[cfg(feature = "encoding_rs")]
mod encoding;

mod coerce;
mod error;
mod key;
mod source;

pub use coerce::Coerce;
pub use error::{BoxError, Error, Result};
pub use key::Key;
pub use source::{ProcessEnvironment, Source};

/// Derives [`Populate`] for a named-field struct.
///
/// Fields are walked in declaration order; each field's key is the parent
/// prefix plus the field's name. Mark a field `#[flat(ignore)]` to exclude
/// it from population entirely. Mark the struct `#[flat(validate)]` to have
/// the entry points call its [`Validate`] implementation once population
/// completes.
pub use flatsource_macros::Populate;

/// A record that can be filled in from a [`Source`].
///
/// Implementations exist for the terminal types, for `Vec<T: Coerce>`, for
/// `Option<T: Populate + Default>`, and for `Box<T: Populate>`; structs get
/// theirs from `#[derive(Populate)]`.
pub trait Populate {
	/// Populates `self` from `source` under the key prefix `key`, returning
	/// the number of values that were actually set anywhere beneath it.
	///
	/// A missing value is not an error: the affected field simply keeps its
	/// current value and contributes nothing to the count. The first error
	/// encountered aborts the walk.
	fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize>;

	/// Hook invoked by the entry points on the top-level destination after
	/// a successful walk. The default does nothing; the derive overrides it
	/// to run the record's [`Validate`] implementation when the struct is
	/// marked `#[flat(validate)]`.
	fn post_populate(&self) -> Result<()> {
		Ok(())
	}
}

/// A record that knows how to validate itself once populated.
///
/// Opt in with `#[flat(validate)]` on the derived struct. The hook runs on
/// the top-level destination only, never on nested records, and its error is
/// returned to the caller verbatim.
pub trait Validate {
	fn validate(&self) -> Result<(), BoxError>;
}

/// Populates `dest` from `source`, then runs its validation hook.
pub fn populate<T: Populate>(dest: &mut T, source: &dyn Source) -> Result<()> {
	dest.populate(source, &Key::root())?;
	dest.post_populate()
}

/// Populates `dest` from the process environment.
///
/// Convenience entry point; equivalent to [`populate`] with a fresh
/// [`ProcessEnvironment`]. No process-wide state is involved — callers
/// wanting a different source pass it to [`populate`] explicitly.
pub fn populate_from_env<T: Populate>(dest: &mut T) -> Result<()> {
	populate(dest, &ProcessEnvironment)
}

/// Populates `dest` from `source` with every key nested under `prefix`,
/// e.g. a prefix of `"myapp"` looks fields up as `MYAPP_*`.
pub fn populate_prefixed<T: Populate>(
	dest: &mut T,
	source: &dyn Source,
	prefix: &str,
) -> Result<()> {
	dest.populate(source, &Key::root().append(prefix))?;
	dest.post_populate()
}

/// Single point through which every lookup goes: maps retrieval failures to
/// [`Error::SourceFailure`] and folds the present-but-empty case into
/// absence, since an empty string can never be coerced meaningfully.
fn fetch(source: &dyn Source, key: &Key) -> Result<Option<String>> {
	log::trace!("get {key} (token {})", key.as_env());
	match source.get(key) {
		Ok(Some(raw)) if raw.is_empty() => Ok(None),
		Ok(found) => Ok(found),
		Err(cause) => Err(Error::SourceFailure {
			key: key.clone(),
			cause,
		}),
	}
}

macro_rules! terminal {
	($($ty:ty),* $(,)?) => {$(
		impl Populate for $ty {
			fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize> {
				match fetch(source, key)? {
					Some(raw) => {
						*self = <$ty as Coerce>::coerce(&raw, key)?;
						Ok(1)
					}
					None => Ok(0),
				}
			}
		}
	)*};
}

terminal!(bool, String);
terminal!(i8, i16, i32, i64, i128, isize);
terminal!(u8, u16, u32, u64, u128, usize);
terminal!(f32, f64);

/// Lists travel as a single JSON array literal. Each element is re-rendered
/// as plain text and coerced exactly like a terminal field, so numbers and
/// their quoted spellings are interchangeable. The whole list is replaced on
/// success; an empty array yields an empty list and counts as zero values.
impl<T: Coerce> Populate for Vec<T> {
	fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize> {
		let Some(raw) = fetch(source, key)? else {
			return Ok(0);
		};
		let elements: Vec<serde_json::Value> = serde_json::from_str(&raw)
			.map_err(|cause| Error::malformed(key, &raw, cause))?;
		let mut values = Vec::with_capacity(elements.len());
		for element in &elements {
			values.push(T::coerce(&scalar_text(element, key)?, key)?);
		}
		let count = values.len();
		*self = values;
		Ok(count)
	}
}

fn scalar_text(element: &serde_json::Value, key: &Key) -> Result<String> {
	use serde_json::Value;
	match element {
		Value::String(text) => Ok(text.clone()),
		Value::Number(number) => Ok(number.to_string()),
		Value::Bool(flag) => Ok(flag.to_string()),
		other => Err(Error::malformed(
			key,
			&other.to_string(),
			"list element is not a scalar value",
		)),
	}
}

/// Optional fields are transparent to naming: the wrapped value is populated
/// under the same key. The inner value is allocated up front and committed
/// only if the pass set at least one value beneath it, so a caller never
/// observes an allocated record that is entirely defaults. A pass that sets
/// nothing leaves the field absent even if it held a value before.
impl<T: Populate + Default> Populate for Option<T> {
	fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize> {
		let mut inner = self.take().unwrap_or_default();
		let count = inner.populate(source, key)?;
		if count > 0 {
			*self = Some(inner);
		} else {
			log::debug!("nothing set under {key}; leaving it absent");
		}
		Ok(count)
	}
}

impl<T: Populate> Populate for Box<T> {
	fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize> {
		(**self).populate(source, key)
	}
}
