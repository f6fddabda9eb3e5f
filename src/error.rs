use thiserror::Error;

use crate::key::Key;

/// Boxed error type used at the crate's collaboration seams: [`Source`]
/// retrieval failures and [`Validate`] rejections.
///
/// [`Source`]: crate::Source
/// [`Validate`]: crate::Validate
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while populating a record.
///
/// Each variant carries the full dotted path of the offending field, so a
/// caller can locate it without extra logging. Shape errors — an unsupported
/// field type, a destination that is not a mutable named-field struct — do
/// not appear here because they are rejected at compile time by the
/// `Populate` bounds and the derive macro.
#[derive(Debug, Error)]
pub enum Error {
	/// A raw value could not be coerced to the field's type: a numeric
	/// parse failure, an unrecognized boolean spelling, or malformed list
	/// syntax. The underlying parse error is chained, not swallowed.
	#[error("malformed value for key {key}: cannot coerce {value:?}: {cause}")]
	MalformedValue {
		key: Key,
		value: String,
		#[source]
		cause: BoxError,
	},

	/// The source reported a retrieval failure for this key, as opposed to
	/// merely having no value for it.
	#[error("source failure for key {key}: {cause}")]
	SourceFailure {
		key: Key,
		#[source]
		cause: BoxError,
	},

	/// The destination rejected itself after population. The record's own
	/// error passes through verbatim.
	#[error(transparent)]
	Validation(BoxError),
}

impl Error {
	pub(crate) fn malformed(key: &Key, value: &str, cause: impl Into<BoxError>) -> Self {
		Error::MalformedValue {
			key: key.clone(),
			value: value.to_owned(),
			cause: cause.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_value_names_key_and_value() {
		let key: Key = ["family", "mother"].into_iter().collect();
		let message = Error::malformed(&key, "not-a-number", "invalid digit").to_string();
		assert!(message.contains("family.mother"));
		assert!(message.contains("not-a-number"));
		assert!(message.contains("invalid digit"));
	}

	#[test]
	fn source_failure_names_key() {
		let error = Error::SourceFailure {
			key: Key::root().append("age"),
			cause: "connection reset".into(),
		};
		assert!(error.to_string().contains("age"));
		assert!(error.to_string().contains("connection reset"));
	}

	#[test]
	fn validation_passes_through_verbatim() {
		let error = Error::Validation("completely wrong".into());
		assert_eq!(error.to_string(), "completely wrong");
	}
}
