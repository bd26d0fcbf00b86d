#![no_std]

//! A measurement decoder and connection sequencer for the Soehnle Shape
//! body-composition scale.
//!
//! The scale publishes two notification channels: weight measurements and
//! body-composition measurements. Both are self-describing binary messages
//! whose leading flag word gates the presence of every optional field, so each
//! field's presence shifts the offset of every field after it.
//!
//! Most users should begin with the [`avec`] module: [`avec::decode`] turns a
//! channel and payload into a [`avec::ScaleMeasurement`], and
//! [`avec::Session`] drives connection setup, multi-packet reassembly and
//! diagnostics for a single connection. The pure building blocks these are
//! made from live in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable `std` support in optional dependencies (default).
//! - `tracing`: enable a diagnostics sink emitting `tracing` events (default).
//! - `uuid`: enable conversion of channels from `uuid::Uuid`.

pub mod avec;
pub mod sans;

/// Human-readable name of the device driven by this crate.
pub const DRIVER_NAME: &str = "Soehnle Shape Scale";
