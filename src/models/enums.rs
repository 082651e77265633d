use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The wire string doubles as the serde name and the stored column value.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Diverse => "diverse",
});

str_enum!(HealthCondition {
    Healthy => "healthy",
    MinorIllness => "minor-illness",
    ChronicIllness => "chronic-illness",
});

str_enum!(YesNo {
    Yes => "yes",
    No => "no",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn as_str_and_from_str_agree() {
        for g in Gender::ALL {
            assert_eq!(Gender::from_str(g.as_str()).unwrap(), *g);
        }
        for h in HealthCondition::ALL {
            assert_eq!(HealthCondition::from_str(h.as_str()).unwrap(), *h);
        }
        for y in YesNo::ALL {
            assert_eq!(YesNo::from_str(y.as_str()).unwrap(), *y);
        }
    }

    #[test]
    fn unknown_value_is_invalid_enum() {
        let err = HealthCondition::from_str("Healthy").unwrap_err();
        match err {
            DatabaseError::InvalidEnum { field, value } => {
                assert_eq!(field, "HealthCondition");
                assert_eq!(value, "Healthy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn serde_uses_kebab_wire_values() {
        let json = serde_json::to_string(&HealthCondition::ChronicIllness).unwrap();
        assert_eq!(json, "\"chronic-illness\"");
        let parsed: HealthCondition = serde_json::from_str("\"minor-illness\"").unwrap();
        assert_eq!(parsed, HealthCondition::MinorIllness);
        assert!(serde_json::from_str::<YesNo>("\"maybe\"").is_err());
    }

    #[test]
    fn closed_sets_have_expected_sizes() {
        assert_eq!(Gender::ALL.len(), 3);
        assert_eq!(HealthCondition::ALL.len(), 3);
        assert_eq!(YesNo::ALL.len(), 2);
    }
}
