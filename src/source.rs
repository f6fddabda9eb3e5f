use std::collections::HashMap;
use std::env;

use crate::error::BoxError;
use crate::key::Key;

/// A read-only repository of raw string values addressed by [`Key`].
///
/// The data may live in the process environment, a file, or a network store;
/// the structured key is an indicator of hierarchy within it. Implementations
/// decide how a [`Key`] is rendered — environment-style sources use
/// [`Key::as_env`].
pub trait Source {
	/// Fetches the raw value for `key`.
	///
	/// `Ok(None)` means the source has no value for this key and the field
	/// should keep its current value. `Err` means retrieval itself failed
	/// and aborts population.
	fn get(&self, key: &Key) -> Result<Option<String>, BoxError>;
}

/// Source backed by the process environment.
///
/// Keys are rendered with [`Key::as_env`]; a variable that is unset maps to
/// absence, never to an error. A variable that exists but is not valid
/// Unicode is a retrieval failure.
pub struct ProcessEnvironment;

impl Source for ProcessEnvironment {
	fn get(&self, key: &Key) -> Result<Option<String>, BoxError> {
		match env::var(key.as_env()) {
			Ok(value) => Ok(Some(value)),
			Err(env::VarError::NotPresent) => Ok(None),
			Err(error @ env::VarError::NotUnicode(_)) => Err(Box::new(error)),
		}
	}
}

/// A map of lookup tokens to values, addressed exactly like
/// [`ProcessEnvironment`]. Useful for fixtures, tests, and callers embedding
/// static configuration.
impl Source for HashMap<String, String> {
	fn get(&self, key: &Key) -> Result<Option<String>, BoxError> {
		Ok(self.get(&key.as_env()).cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn map_source_hits_and_misses() {
		let map: HashMap<String, String> =
			[("SERVER_PORT".to_owned(), "8080".to_owned())].into();
		let hit = Key::root().append("server").append("port");
		let miss = Key::root().append("server").append("host");
		assert_eq!(Source::get(&map, &hit).unwrap().as_deref(), Some("8080"));
		assert_eq!(Source::get(&map, &miss).unwrap(), None);
	}

	#[test]
	fn environment_miss_is_absence() {
		let key = Key::root().append("flatsourceNeverSetAnywhere");
		assert_eq!(ProcessEnvironment.get(&key).unwrap(), None);
	}
}
