//! V(D)J allele calling for IGH heavy-chain sequences

pub mod prediction;
pub mod session;

// Re-exporting for public API
pub use self::prediction::VdjPrediction;
pub use self::session::Session;
