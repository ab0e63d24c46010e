//! Core library for the camera parameter store.
//!
//! A [`ParameterMap`] holds string values keyed by parameter name and travels
//! between the camera control layer and the driver as a single flattened
//! `key=value;key=value` string. Each module owns one layer:
//!
//! - [`store`]: the map itself with integer and float helpers.
//! - [`flatten`]: the wire format.
//! - [`structured`]: the size, range, area and distance mini-languages found
//!   inside individual values.
//! - [`camera`]: typed accessors for the well-known keys in [`keys`].
//! - [`config`]: hardware profiles describing which optional key groups a
//!   target understands.

pub mod camera;
pub mod config;
pub mod error;
pub mod flatten;
pub mod keys;
pub mod store;
pub mod structured;

pub use config::{AppConfig, HardwareProfile, KeyGroup};
pub use error::{ParamsError, Result};
pub use flatten::{flatten, unflatten};
pub use store::{ParameterMap, FLOAT_SENTINEL, INT_SENTINEL};
pub use structured::{Area, FocusDistances, ParseError, Point, Range, Size};
