//! Configuration schema for petition.

mod model;

pub use model::{
    PetitionConfig, PetitionConfigBuilder, PromptDefaults, RateLimitConfig,
};
