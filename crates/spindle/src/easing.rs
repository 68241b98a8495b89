use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Smoothstep, the ease-in/ease-out curve with flat tangents at both ends.
    #[default]
    #[strum(to_string = "ease-in-out", serialize = "smooth", serialize = "smoothstep")]
    EaseInOut,
    EaseIn,
    EaseOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::iter() {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing}");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in Easing::iter() {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = easing.apply(step as f64 / 100.0);
                assert!(v >= prev, "{easing} not monotonic at {step}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::EaseInOut.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseInOut.apply(1.5), 1.0);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"Linear\"", Easing::Linear),
            ("\"ease-in-out\"", Easing::EaseInOut),
            ("\"smoothstep\"", Easing::EaseInOut),
            ("\"EASE-OUT\"", Easing::EaseOut),
            ("\"ease-in-out-cubic\"", Easing::EaseInOutCubic),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        assert!(serde_json::from_str::<Easing>("\"bounce\"").is_err());
    }
}
