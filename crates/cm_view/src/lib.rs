// crates/cm_view/src/lib.rs
//
// Pure view-model layer: everything here is a deterministic function of its
// inputs. No I/O, no logging, no clocks — safe to re-run on every
// interaction event (cardinality is ≤60 states, full recompute beats
// incremental bookkeeping).

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod color;
pub mod describe;
pub mod filter_sort;

pub use aggregate::aggregate;
pub use color::{fill_legend_swatches, CategoryScale, DEFAULT_PALETTE, NEUTRAL_COLOR};
pub use describe::describe;
pub use filter_sort::{apply, FilteredView};
