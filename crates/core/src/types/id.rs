//! Newtype IDs for type-safe entity references.
//!
//! Catalog and account identifiers are opaque strings handed to us by the
//! catalog data source and the hosted auth backend. Wrapping them keeps a wine
//! ID from being passed where a vineyard ID is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()`, `Display`, `From<&str>`, `From<String>`
///
/// # Example
///
/// ```rust
/// # use vinea_core::define_string_id;
/// define_string_id!(BottleId);
/// define_string_id!(CaseId);
///
/// let bottle = BottleId::new("1");
/// assert_eq!(bottle.as_str(), "1");
///
/// // These are different types, so this won't compile:
/// // let _: CaseId = bottle;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_string_id!(CatalogItemId);
define_string_id!(VineyardId);
define_string_id!(ProjectId);
define_string_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = CatalogItemId::new("8");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"8\"");

        let parsed: VineyardId = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(parsed, VineyardId::from("2"));
    }

    #[test]
    fn test_display_matches_inner_value() {
        let id = UserId::new("a1b2");
        assert_eq!(id.to_string(), "a1b2");
        assert_eq!(String::from(id), "a1b2");
    }
}
