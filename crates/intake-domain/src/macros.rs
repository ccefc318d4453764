/// Declares a closed option enum whose values are stored by their display label.
///
/// Every enum gets an extra `Unrecognized(String)` variant so records written by
/// another build still load; unrecognised values round-trip verbatim and never
/// match a known option.
macro_rules! labelled_options {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $($variant:ident ($key:literal) => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            /// Stable labels of every known option, in presentation order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Short keys accepted by drivers alongside the labels.
            pub const KEYS: &'static [&'static str] = &[$($key),+];

            /// Returns every known option in presentation order.
            pub fn known() -> Vec<$name> {
                vec![$($name::$variant),+]
            }

            pub fn key(&self) -> Option<&'static str> {
                match self {
                    $($name::$variant => Some($key),)+
                    $name::Unrecognized(_) => None,
                }
            }

            /// Parses driver input, accepting either the key or the label.
            pub fn parse(value: &str) -> Result<Self, $crate::error::DomainError> {
                match <$name as $crate::options::LabelledOption>::from_label(value) {
                    $name::Unrecognized(raw) => Err($crate::error::DomainError::UnknownOption {
                        kind: $kind,
                        value: raw,
                    }),
                    known => Ok(known),
                }
            }
        }

        impl $crate::options::LabelledOption for $name {
            const KIND: &'static str = $kind;

            fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unrecognized(raw) => raw.as_str(),
                }
            }

            fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }

            fn from_label(value: &str) -> Self {
                let trimmed = value.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) || trimmed.eq_ignore_ascii_case($key) {
                        return $name::$variant;
                    }
                )+
                $name::Unrecognized(trimmed.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::options::LabelledOption::label(self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str($crate::options::LabelledOption::label(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(<$name as $crate::options::LabelledOption>::from_label(&value))
            }
        }
    };
}

/// Declares a copyable enum addressed by kebab-case keys from driver input.
macro_rules! keyed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn parse(value: &str) -> Result<Self, $crate::error::DomainError> {
                let trimmed = value.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($key) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::error::DomainError::UnknownField {
                    kind: $kind,
                    key: trimmed.to_string(),
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}
