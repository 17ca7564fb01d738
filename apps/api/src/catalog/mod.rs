// Criterion catalog: owned by the analysis backend, referenced here by name.
// New criteria are normalised before they are forwarded.

pub mod handlers;
pub mod validation;
