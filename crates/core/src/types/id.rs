//! Newtype IDs for type-safe entity references.
//!
//! The QueueMate backend issues opaque string identifiers (document ids such
//! as `65f1c0ffee...`). Use the `define_id!` macro to create wrappers that
//! prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`, `is_blank()`
/// - `Display`, `From<String>`, `From<&str>` and `Into<String>`
///
/// # Example
///
/// ```rust
/// # use queuemate_core::define_id;
/// define_id!(OwnerId);
/// define_id!(StoreId);
///
/// let owner = OwnerId::new("u1");
/// let store = StoreId::new("u1");
///
/// // These are different types, so this won't compile:
/// // let _: OwnerId = store;
/// assert_eq!(owner.as_str(), store.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a backend identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the identifier is empty or whitespace.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ShopId);
define_id!(BarberId);
define_id!(ServiceId);
define_id!(QueueEntryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_json() {
        let id = ShopId::new("65f1c0ffee");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65f1c0ffee\"");
        assert_eq!(serde_json::from_str::<ShopId>(&json).unwrap(), id);
    }

    #[test]
    fn test_is_blank() {
        assert!(ShopId::new("").is_blank());
        assert!(ShopId::new("  ").is_blank());
        assert!(!ShopId::new("s1").is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(UserId::from("u1").to_string(), "u1");
    }
}
