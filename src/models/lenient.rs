//! Numeric fields that accept either JSON numbers or text.
//!
//! URL-encoded form bodies deliver every value as a string, so numeric payload
//! fields go through these instead of the plain serde impls. Blank text and
//! `null` both read as absent.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            NumberOrText::Int(n) => Ok(Some(n as f64)),
            NumberOrText::Float(n) => Ok(Some(n)),
            NumberOrText::Text(s) if s.trim().is_empty() => Ok(None),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid number: {}", s))),
        }
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(value) => value.into_f64(),
        None => Ok(None),
    }
}

pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Int(n)) => Some(n),
        Some(other) => match other.into_f64::<D::Error>()? {
            Some(n) if n.fract() == 0.0 => Some(n as i64),
            Some(n) => return Err(de::Error::custom(format!("expected a whole number, got {}", n))),
            None => None,
        },
        None => None,
    };

    value
        .map(|n| {
            i32::try_from(n)
                .map_err(|_| <D::Error as de::Error>::custom(format!("number out of range: {}", n)))
        })
        .transpose()
}
