use encoding_rs::Encoding;

use crate::coerce::Coerce;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::source::Source;
use crate::{fetch, Populate};

/// Encoding fields hold a label such as `utf-8` or `shift_jis`, resolved
/// through the WHATWG label registry.
impl Coerce for &'static Encoding {
	fn coerce(raw: &str, key: &Key) -> Result<Self> {
		Encoding::for_label(raw.as_bytes())
			.ok_or_else(|| Error::malformed(key, raw, "unrecognized encoding label"))
	}
}

impl Populate for &'static Encoding {
	fn populate(&mut self, source: &dyn Source, key: &Key) -> Result<usize> {
		match fetch(source, key)? {
			Some(raw) => {
				*self = Coerce::coerce(&raw, key)?;
				Ok(1)
			}
			None => Ok(0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_labels() {
		let key = Key::root().append("charset");
		let encoding = <&'static Encoding>::coerce("utf-8", &key).unwrap();
		assert_eq!(encoding, encoding_rs::UTF_8);
		assert!(<&'static Encoding>::coerce("not-a-charset", &key).is_err());
	}
}
