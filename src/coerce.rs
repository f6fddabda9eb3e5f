use crate::error::{Error, Result};
use crate::key::Key;

/// Conversion of a raw string into a terminal value with format validation.
///
/// Implemented for the primitive types a flat source can express: booleans,
/// the integer families at every width, floats, and strings. Downstream
/// crates can implement it for their own terminal types to make them usable
/// in populated fields and lists (see the crate's optional `encoding_rs`
/// integration for an example).
pub trait Coerce: Sized {
	fn coerce(raw: &str, key: &Key) -> Result<Self>;
}

/// Strings are assigned verbatim; this never fails.
impl Coerce for String {
	fn coerce(raw: &str, _key: &Key) -> Result<Self> {
		Ok(raw.to_owned())
	}
}

/// Accepts the conventional boolean literal spellings.
impl Coerce for bool {
	fn coerce(raw: &str, key: &Key) -> Result<Self> {
		match raw {
			"1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
			"0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
			_ => Err(Error::malformed(
				key,
				raw,
				"expected a boolean literal such as true, false, 1, or 0",
			)),
		}
	}
}

/// Base-10 parse, range-checked by the width of the target type. The parse
/// error is carried as the cause of the resulting error.
macro_rules! parsed {
	($($ty:ty),* $(,)?) => {$(
		impl Coerce for $ty {
			fn coerce(raw: &str, key: &Key) -> Result<Self> {
				raw.parse().map_err(|cause| Error::malformed(key, raw, cause))
			}
		}
	)*};
}

parsed!(i8, i16, i32, i64, i128, isize);
parsed!(u8, u16, u32, u64, u128, usize);
parsed!(f32, f64);

/// Pointer-shaped list elements are allocated around the coerced value.
impl<T: Coerce> Coerce for Box<T> {
	fn coerce(raw: &str, key: &Key) -> Result<Self> {
		T::coerce(raw, key).map(Box::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key() -> Key {
		Key::root().append("field")
	}

	#[test]
	fn boolean_spellings() {
		for raw in ["1", "t", "T", "true", "TRUE", "True"] {
			assert!(bool::coerce(raw, &key()).unwrap());
		}
		for raw in ["0", "f", "F", "false", "FALSE", "False"] {
			assert!(!bool::coerce(raw, &key()).unwrap());
		}
		assert!(bool::coerce("yes", &key()).is_err());
		assert!(bool::coerce("tRuE", &key()).is_err());
	}

	#[test]
	fn integers_are_range_checked() {
		assert_eq!(u8::coerce("255", &key()).unwrap(), 255);
		assert!(u8::coerce("256", &key()).is_err());
		assert_eq!(i16::coerce("-32768", &key()).unwrap(), -32768);
		assert!(i16::coerce("-32769", &key()).is_err());
		assert!(u32::coerce("-1", &key()).is_err());
	}

	#[test]
	fn non_numeric_input_names_the_value() {
		let error = i32::coerce("not-a-number", &key()).unwrap_err();
		assert!(error.to_string().contains("not-a-number"));
		assert!(std::error::Error::source(&error).is_some());
	}

	#[test]
	fn floats_parse_at_declared_width() {
		assert_eq!(f32::coerce("16.84", &key()).unwrap(), 16.84);
		assert_eq!(f64::coerce("-0.5", &key()).unwrap(), -0.5);
		assert!(f32::coerce("sixteen", &key()).is_err());
	}

	#[test]
	fn strings_pass_verbatim() {
		assert_eq!(
			String::coerce("hello world", &key()).unwrap(),
			"hello world"
		);
	}

	#[test]
	fn boxed_elements_allocate() {
		assert_eq!(*Box::<u16>::coerce("7", &key()).unwrap(), 7);
	}
}
