//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive struct definitions and
//! normalization code shared by several entity types.

/// Define a named entity: `id`, `name` and the optional server timestamps
///
/// Generates the struct and an inherent `normalize` function reading
/// `id`, `name`, `createdAt` and `updatedAt` from a JSON object.
///
/// # Example
/// ```rust,ignore
/// impl_named_entity!(DrugName, "drug_name");
///
/// let name = DrugName::normalize(&json!({"id": 3, "name": "Paracétamol"}))?;
/// ```
#[macro_export]
macro_rules! impl_named_entity {
    ($type:ident, $entity_type:expr) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $type {
            /// Server-assigned identifier
            pub id: i64,

            pub name: String,

            /// When this entity was created, if the server reports it
            pub created_at: Option<::chrono::DateTime<::chrono::Utc>>,

            /// When this entity was last updated, if the server reports it
            pub updated_at: Option<::chrono::DateTime<::chrono::Utc>>,
        }

        impl $type {
            /// Entity type name used in normalization errors
            pub const ENTITY_TYPE: &'static str = $entity_type;

            /// Build an instance from a backend JSON object
            pub fn normalize(
                value: &::serde_json::Value,
            ) -> Result<Self, $crate::core::error::NormalizeError> {
                use $crate::core::normalize;

                let obj = normalize::as_object($entity_type, value)?;
                Ok(Self {
                    id: normalize::id_field($entity_type, obj, "id")?,
                    name: normalize::string_field($entity_type, obj, "name")?,
                    created_at: normalize::opt_datetime_field($entity_type, obj, "createdAt")?,
                    updated_at: normalize::opt_datetime_field($entity_type, obj, "updatedAt")?,
                })
            }
        }
    };
}

/// Define a string-backed enum with an `Other` fallback
///
/// Known values map to their variant; anything else is kept verbatim in
/// `Other(String)` so that new backend values never break normalization.
///
/// # Example
/// ```rust,ignore
/// impl_string_enum!(DrugUnit {
///     Mg => "mg",
///     Ml => "ml",
/// });
///
/// assert_eq!(DrugUnit::parse("mg"), DrugUnit::Mg);
/// assert_eq!(DrugUnit::parse("kg"), DrugUnit::Other("kg".to_string()));
/// ```
#[macro_export]
macro_rules! impl_string_enum {
    ($type:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $type {
            $($variant,)+
            /// Value not known to this client
            Other(String),
        }

        impl $type {
            /// Wire representation
            pub fn as_str(&self) -> &str {
                match self {
                    $($type::$variant => $value,)+
                    $type::Other(raw) => raw.as_str(),
                }
            }

            /// Parse a wire value, falling back to `Other`
            pub fn parse(raw: &str) -> Self {
                match raw {
                    $($value => $type::$variant,)+
                    other => $type::Other(other.to_string()),
                }
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $type {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok($type::parse(&raw))
            }
        }
    };
}
