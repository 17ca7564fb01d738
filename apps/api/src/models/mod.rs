pub mod analysis;
pub mod criterion;
