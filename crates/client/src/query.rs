//! Query-string helpers.
//!
//! Open-Meteo takes list parameters as a single comma-separated value
//! (`hourly=temperature_2m,precipitation`), which `serde_urlencoded` cannot
//! produce from a sequence on its own.

use serde::Serializer;
use std::fmt::Display;

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn list<S, T>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.serialize_str(&join(values))
}

pub(crate) fn optional_list<S, T>(values: &Option<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    match values {
        Some(values) => serializer.serialize_str(&join(values)),
        None => serializer.serialize_none(),
    }
}
