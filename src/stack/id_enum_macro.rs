/// Declares a string-backed identifier enum.
///
/// Each variant maps to its wire identifier and a human label. Unknown
/// identifiers are preserved in `Custom` so a foreign value survives a
/// serialize/deserialize round trip untouched.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire_id:literal : $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl $enum_name {
            /// Wire identifier, exactly as it appears in plans and environment variables.
            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $wire_id,
                    )*
                    Self::Custom(id) => id,
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                    Self::Custom(id) => id,
                }
            }

            pub fn parse(id: &str) -> Self {
                match id {
                    $(
                        $wire_id => Self::$variant,
                    )*
                    _ => Self::Custom(id.to_string()),
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::parse(&s))
            }
        }
    };
}
