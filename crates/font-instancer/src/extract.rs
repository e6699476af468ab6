//! Picks axis limitations out of loose key/value pairs.
//!
//! The pairs come from command-line flags nobody else claimed and from the
//! `axisLoc` field of a configuration file, so values arrive as JSON.

use serde_json::Value;

use crate::axis::{AxisLimit, AxisTag, Limitation};

/// Keep every pair that is a valid axis limitation, in input order.
///
/// A pair survives when its key is exactly four characters long and its value
/// is `drop`, a non-negative integer or `low:high`. Booleans, `null` and empty
/// strings never survive. Non-negative JSON integers are accepted as if they
/// were written as strings.
///
/// ```
/// use font_instancer::extract_axis_loc;
/// use serde_json::json;
///
/// let pairs = [("wght", json!("400:700")), ("junk", json!(true))];
/// let loc = extract_axis_loc(pairs.iter().map(|(k, v)| (*k, v)));
/// assert_eq!(loc.len(), 1);
/// assert_eq!(loc[0].to_string(), "wght=400:700");
/// ```
pub fn extract_axis_loc<'a, I>(pairs: I) -> Vec<AxisLimit>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| to_axis_limit(key, value))
        .collect()
}

/// A single pair, or `None` when it does not qualify.
pub fn to_axis_limit(key: &str, value: &Value) -> Option<AxisLimit> {
    let tag = AxisTag::new(key).ok()?;

    let limitation = match value {
        Value::String(text) if !text.is_empty() => text.parse::<Limitation>().ok()?,
        Value::Number(number) => number.as_u64()?.to_string().parse::<Limitation>().ok()?,
        _ => return None,
    };

    Some(AxisLimit::new(tag, limitation))
}
