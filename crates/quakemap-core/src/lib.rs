//! Feed decoding, classification, composition, and map assembly for `QuakeMap`.
//!
//! This crate owns the whole render pipeline except HTTP transport and the
//! final page output:
//!
//! ```text
//! FeedSource --> decode --> compose --> assemble --> RenderTarget
//! ```
//!
//! The earthquake feed is fetched first; the fault-line feed is requested
//! only after it completes. Either failure aborts the run before anything is
//! presented.
//!
//! # Modules
//!
//! - [`assemble`] -- Backdrops, overlays, legend, and time control
//! - [`classify`] -- Magnitude to colour, radius, and time interval
//! - [`compose`] -- Point, line, and time layers from decoded feeds
//! - [`config`] -- YAML configuration with environment overrides
//! - [`decode`] -- Feature collections to typed events and fault lines
//! - [`error`] -- The [`QuakeMapError`] type
//! - [`fetch`] -- [`FeedSource`] trait and ordered two-feed fetch
//! - [`pipeline`] -- [`render_map`] entry point and [`RenderTarget`] trait
//!
//! [`QuakeMapError`]: error::QuakeMapError
//! [`FeedSource`]: fetch::FeedSource
//! [`render_map`]: pipeline::render_map
//! [`RenderTarget`]: pipeline::RenderTarget

pub mod assemble;
pub mod classify;
pub mod compose;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod pipeline;

pub use config::MapConfig;
pub use error::QuakeMapError;
pub use fetch::{FeedLocators, FeedSource, FetchFailure, RawFeeds, StaticFeedSource};
pub use pipeline::{RenderTarget, build_document, render_map};
