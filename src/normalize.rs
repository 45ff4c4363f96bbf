use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn clamp100(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Rounds an already-clamped 0–100 value to an integer score.
pub fn round_score(value: f64) -> u8 {
    clamp100(value).round() as u8
}

/// Reads an optional number without ever rejecting the payload.
///
/// Missing and `null` fields become `None`. Numeric strings are parsed;
/// anything else that is not a number becomes `NaN`, which the clamps
/// above turn into 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => Some(number.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(text)) => Some(text.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    fn probe(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn clamps_handle_nan_and_range() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(-0.3), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp100(f64::NAN), 0.0);
        assert_eq!(clamp100(140.0), 100.0);
        assert_eq!(clamp100(-5.0), 0.0);
    }

    #[test]
    fn round_score_rounds_half_up() {
        assert_eq!(round_score(49.5), 50);
        assert_eq!(round_score(49.4), 49);
        assert_eq!(round_score(f64::INFINITY), 100);
    }

    #[test]
    fn lenient_reads_numbers_and_numeric_strings() {
        assert_eq!(probe(r#"{"value": 0.25}"#), Some(0.25));
        assert_eq!(probe(r#"{"value": "42"}"#), Some(42.0));
        assert_eq!(probe(r#"{"value": null}"#), None);
        assert_eq!(probe("{}"), None);
    }

    #[test]
    fn lenient_turns_garbage_into_nan() {
        assert!(probe(r#"{"value": "lots"}"#).unwrap().is_nan());
        assert!(probe(r#"{"value": true}"#).unwrap().is_nan());
        assert!(probe(r#"{"value": [1, 2]}"#).unwrap().is_nan());
    }
}
