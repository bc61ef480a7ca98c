// Service exports
pub mod generator;
pub mod provider;
pub mod rate_limit;
pub mod talent;

pub use generator::{GeneratorError, JobGenerator};
pub use provider::{ProviderClient, ProviderError};
pub use rate_limit::{RateLimiter, RateWindow};
pub use talent::{TalentOutcome, TalentSearch};
