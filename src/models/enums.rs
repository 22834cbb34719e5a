use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ItemKind {
    Pronunciation => "pronunciation",
    Punctuation => "punctuation",
});

str_enum!(FlagKind {
    Interruption => "interruption",
    NegativeTone => "negative_tone",
    Dismissive => "dismissive",
    Aggressive => "aggressive",
    NegativeSentiment => "negative_sentiment",
});

str_enum!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(MotionPresent {
    Performed => "performed",
    Brief => "brief",
    NotObserved => "not_observed",
});

str_enum!(PoseMatch {
    FullMatch => "full_match",
    Partial => "partial",
    NoMatch => "no_match",
});

str_enum!(DiscrepancyStatus {
    Consistent => "consistent",
    Discrepant => "discrepant",
    Pending => "pending",
});

str_enum!(SentimentLabel {
    Positive => "positive",
    Negative => "negative",
    Neutral => "neutral",
    Mixed => "mixed",
});

str_enum!(ApproximateTime {
    Early => "early",
    Middle => "middle",
    Late => "late",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn flag_kind_round_trip() {
        for (variant, s) in [
            (FlagKind::Interruption, "interruption"),
            (FlagKind::NegativeTone, "negative_tone"),
            (FlagKind::Dismissive, "dismissive"),
            (FlagKind::Aggressive, "aggressive"),
            (FlagKind::NegativeSentiment, "negative_sentiment"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(FlagKind::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn motion_present_round_trip() {
        for (variant, s) in [
            (MotionPresent::Performed, "performed"),
            (MotionPresent::Brief, "brief"),
            (MotionPresent::NotObserved, "not_observed"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(MotionPresent::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn discrepancy_status_round_trip() {
        for (variant, s) in [
            (DiscrepancyStatus::Consistent, "consistent"),
            (DiscrepancyStatus::Discrepant, "discrepant"),
            (DiscrepancyStatus::Pending, "pending"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DiscrepancyStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&FlagKind::NegativeTone).unwrap();
        assert_eq!(json, "\"negative_tone\"");
        let back: FlagKind = serde_json::from_str("\"negative_tone\"").unwrap();
        assert_eq!(back, FlagKind::NegativeTone);
        let json = serde_json::to_string(&PoseMatch::FullMatch).unwrap();
        assert_eq!(json, "\"full_match\"");
    }

    #[test]
    fn approximate_time_deserializes_llm_output() {
        let t: ApproximateTime = serde_json::from_str("\"early\"").unwrap();
        assert_eq!(t, ApproximateTime::Early);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(FlagKind::from_str("hostile").is_err());
        assert!(Severity::from_str("").is_err());
        assert!(MotionPresent::from_str("unknown").is_err());
    }
}
