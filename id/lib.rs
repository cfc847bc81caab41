use std::fmt;
use std::str::FromStr;

/// A 128 bit identifier rendered as 32 lowercase hex chars.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIdError;

impl Id {
	pub fn new() -> Id {
		Id(rand::random())
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:032x}", self.0)
	}
}

impl fmt::Debug for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self)
	}
}

impl fmt::Display for ParseIdError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "failed to parse id")
	}
}

impl std::error::Error for ParseIdError {}

impl FromStr for Id {
	type Err = ParseIdError;
	fn from_str(s: &str) -> Result<Id, ParseIdError> {
		if s.len() != 32 {
			return Err(ParseIdError);
		}
		let value = u128::from_str_radix(s, 16).map_err(|_| ParseIdError)?;
		Ok(Id(value))
	}
}

impl serde::Serialize for Id {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> serde::Deserialize<'de> for Id {
	fn deserialize<D>(deserializer: D) -> Result<Id, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct IdVisitor;
		impl<'de> serde::de::Visitor<'de> for IdVisitor {
			type Value = Id;
			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a 32 char hex string")
			}
			fn visit_str<E>(self, value: &str) -> Result<Id, E>
			where
				E: serde::de::Error,
			{
				value
					.parse()
					.map_err(|_| E::custom("failed to parse id"))
			}
		}
		deserializer.deserialize_str(IdVisitor)
	}
}

#[cfg(test)]
mod test {
	use super::Id;

	#[test]
	fn test_round_trip() {
		let id = Id::new();
		let parsed: Id = id.to_string().parse().unwrap();
		assert_eq!(id, parsed);
		assert_eq!(id.to_string().len(), 32);
	}

	#[test]
	fn test_parse_rejects_bad_input() {
		assert!("".parse::<Id>().is_err());
		assert!("abc".parse::<Id>().is_err());
		assert!("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz".parse::<Id>().is_err());
		assert!("0102030405060708090a0b0c0d0e0f10".parse::<Id>().is_ok());
	}
}
