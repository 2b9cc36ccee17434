//! Response normalization: raw model text in, validated record out.

pub mod coerce;
pub mod extract;
pub mod normalize;

pub use normalize::normalize;
