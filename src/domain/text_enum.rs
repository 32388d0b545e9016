/// Raised when a stored or submitted enum value is not one of the known variants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of values persisted as TEXT and exchanged as
/// SCREAMING_SNAKE_CASE strings.
#[macro_export]
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::text_enum::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::domain::text_enum::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::text_enum!(Color { Red => "RED", DarkBlue => "DARK_BLUE" });

    #[test]
    fn parses_and_prints_the_wire_text() {
        assert_eq!("DARK_BLUE".parse::<Color>().unwrap(), Color::DarkBlue);
        assert_eq!(Color::Red.to_string(), "RED");
        assert_eq!(Color::ALL.len(), 2);
    }

    #[test]
    fn rejects_unknown_text_with_the_type_name() {
        let err = "GREEN".parse::<Color>().unwrap_err();
        assert_eq!(err.kind, "Color");
        assert_eq!(err.value, "GREEN");
    }

    #[test]
    fn serde_uses_the_same_text() {
        let json = serde_json::to_string(&Color::DarkBlue).unwrap();
        assert_eq!(json, "\"DARK_BLUE\"");
        let back: Color = serde_json::from_str("\"RED\"").unwrap();
        assert_eq!(back, Color::Red);
    }
}
