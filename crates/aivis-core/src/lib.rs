//! Shared data model and configuration for the AI visibility engine.
//!
//! Every other crate in the workspace speaks in terms of the types defined
//! here: a [`BrandIdentity`] goes into extraction, [`AnswerSignal`]s come out,
//! and a batch of signals is reduced to a [`ScoreBreakdown`].

pub mod app_config;
pub mod brands;
pub mod config;
pub mod error;
pub mod identity;
pub mod signal;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brands, BrandProfile, BrandsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use identity::BrandIdentity;
pub use signal::{AnswerSignal, MatchType, RawAnswer, ScoreBreakdown, Sentiment};
