pub mod structure;
pub mod wacc;

pub use structure::CapitalStructure;
pub use wacc::compute_wacc;
