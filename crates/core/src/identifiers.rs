//! Type-safe, efficient identifiers for tracked entities.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::new(s))
            }
        }
    };
}

impl_identifier!(RouteIdentifier);
impl_identifier!(DriverIdentifier);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = RouteIdentifier::new("route_42");
        let id2 = RouteIdentifier::new("route_42");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(DriverIdentifier::new("driver_1"), 42);

        assert_eq!(map.get(&DriverIdentifier::new("driver_1")), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = RouteIdentifier::new("42A");
        assert_eq!(format!("{}", id), "42A");
    }

    #[test]
    fn test_identifier_serde_roundtrip() {
        let id = RouteIdentifier::new("42A");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42A\"");

        let back: RouteIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
