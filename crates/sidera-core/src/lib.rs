#![forbid(unsafe_code)]

//! Constellation graph model for Sidera.
//!
//! This crate holds the types shared by the projector/renderer and the generation pipeline:
//! the node/edge graph, request metadata, canvas and generation configuration, and the error
//! taxonomy (configuration vs. validation failures).

pub mod config;
pub mod error;
pub mod graph;

pub use config::{EdgeThresholds, GenerationParams, OutputOptions, RenderOptions, SideraConfig};
pub use error::{Error, ErrorClass, Result};
pub use graph::{Constellation, ConstellationRequest, Edge, Node, Position, validate_positions};
