// Core algorithm exports
pub mod error;
pub mod matcher;
pub mod partition;
pub mod registry;
pub mod rules;
pub mod sampler;
pub mod validator;

pub use error::PairingError;
pub use matcher::{Matcher, EMPTY_ROSTER_MESSAGE};
pub use partition::{partition, Partition};
pub use registry::register;
pub use rules::{is_eligible, rejection, Rejection, RULES_APPLIED};
pub use sampler::{CycleDraw, RejectionSampler, DEFAULT_MAX_ATTEMPTS};
pub use validator::ensure_no_reciprocal_pairs;
