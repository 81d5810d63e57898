//! `TripCraft` - AI-powered travel itinerary planning
//!
//! This library turns user trip parameters into natural-language prompts,
//! dispatches them to an external text-completion service, and assembles
//! the generated text into a trip plan for the web front-end.

pub mod api;
pub mod cache;
pub mod completion;
pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod planner;
pub mod prompts;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use completion::{CompletionRequest, CompletionService, ModelTier, OpenAiClient};
pub use config::TripCraftConfig;
pub use error::TripCraftError;
pub use models::{BudgetLevel, Interest, TripPlan, TripRequest};
pub use planner::TripPlanner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripCraftError>;
