//! Serialization helpers.

mod json;

pub use json::{
    SerializationError, from_json_bytes, pretty_json, to_json_stable, to_json_stable_bytes,
};
