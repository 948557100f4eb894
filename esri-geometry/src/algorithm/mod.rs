//! Geometric algorithms over the model types.

pub mod polylabel;
