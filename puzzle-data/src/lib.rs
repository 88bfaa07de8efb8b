//! Typed data for the word search generation API.
//!
//! Responses are decoded with [`Converter`] (or [`from_json_str`]) into
//! [`WordSearchResult`] and encoded back with [`to_json_string`].

mod converter;
mod envelope;
mod error;
mod model;
pub mod timestamp;

pub use converter::{Converter, from_json_str, to_json_string};
pub use envelope::ApiResponse;
pub use error::{ApiError, DecodeError, EncodeError};
pub use model::{Grid, ImageRef, PlacedWord, Position, WordSearchResult};
pub use timestamp::{parse_time_of_day, parse_timestamp};
