//! Receipt points: the receipt wire model and the seven scoring rules.
pub mod model;
pub mod rules;
