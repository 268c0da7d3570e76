//! cm_core — Core types for the choropleth widget engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`cm_io`, `cm_view`, `cm_widget`):
//!
//! - Domain entities: `RawMetrics`, `DerivedSeries`, `ContactInfo`
//! - Geography: `StateId`, `StateDirectory`, label-offset metadata
//! - Session state: `FilterState`, `SortKey`, `SortDirection`
//! - Variant behavior: `ClickPolicy`, `ColorMode`, `WidgetPolicy`
//!
//! Serialization derives are gated behind the `serde` feature so renderers
//! can ship view models over a bridge without this crate forcing the
//! dependency on everyone.

#![forbid(unsafe_code)]

pub mod directory;
pub mod entities;
pub mod filter;
pub mod policy;

pub use directory::{LabelOffsets, StateDirectory, StateEntry, StateId};
pub use entities::{CategoryCount, ContactInfo, DerivedSeries, Description, RawMetrics};
pub use filter::{FilterState, SortDirection, SortKey};
pub use policy::{ClickPolicy, ColorMode, WidgetPolicy};
