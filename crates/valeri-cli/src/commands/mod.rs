pub mod analysis;
pub mod projection;
