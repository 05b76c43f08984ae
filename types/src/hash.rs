//! 32-byte identifiers: skill identifiers, configuration ids and scope ids.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parse `0x`-prefixed (or bare) hex into exactly 32 bytes.
pub(crate) fn parse_hex32(s: &str) -> Option<[u8; 32]> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}

macro_rules! id32 {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(0x{})"), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s)
                    .map(Self)
                    .ok_or_else(|| TypesError::InvalidIdentifier(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypesError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

id32! {
    /// Deterministic hash of a skill name; the key for endorsement dedup and lookup.
    SkillId
}

id32! {
    /// Opaque verification configuration identifier set by an administrator.
    ConfigId
}

id32! {
    /// Verification scope the components were deployed under.
    ScopeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let hexed = "7b6436b0c98f62380866d9432c2af0ee08ce16a171bda6951aecd95ee1307d61";
        let a: ConfigId = format!("0x{hexed}").parse().unwrap();
        let b: ConfigId = hexed.parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), format!("0x{hexed}"));
    }

    #[test]
    fn wrong_length_rejected() {
        assert_eq!(
            "0xdead".parse::<SkillId>(),
            Err(TypesError::InvalidIdentifier("0xdead".into()))
        );
    }

    #[test]
    fn zero_default() {
        assert!(ConfigId::default().is_zero());
        assert_eq!(ScopeId::default(), ScopeId::ZERO);
    }
}
