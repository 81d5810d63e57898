//! Trip plan orchestration
//!
//! The planner validates a trip request, fans the four section prompts
//! out to the completion service concurrently, and assembles the
//! responses into a trip plan. Destination insights and packing lists
//! are cached between runs; the itinerary is always generated fresh.

use std::sync::Arc;
use std::time::Duration;

use rand::RngExt;
use tracing::{debug, info, instrument, warn};

use crate::completion::{CompletionRequest, CompletionService, ModelTier};
use crate::config::TripCraftConfig;
use crate::models::{TripPlan, TripRequest};
use crate::{Result, cache, prompts};

/// Service generating trip plans from validated requests
#[derive(Clone)]
pub struct TripPlanner {
    service: Arc<dyn CompletionService>,
    config: TripCraftConfig,
}

impl TripPlanner {
    /// Create a planner backed by the given completion service
    pub fn new(service: Arc<dyn CompletionService>, config: TripCraftConfig) -> Self {
        Self { service, config }
    }

    /// Generate a complete trip plan.
    ///
    /// Validation failures surface before any network call. The itinerary
    /// section is required; auxiliary sections degrade to absent with a
    /// logged warning when their generation fails.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate_plan(&self, request: TripRequest) -> Result<TripPlan> {
        request.validate(&self.config.defaults)?;

        info!(
            "Generating {}-day plan for {}",
            request.duration_days(),
            request.destination
        );

        let (itinerary, insights, budget, packing) = futures::join!(
            self.generate_itinerary(&request),
            self.generate_insights(&request),
            self.generate_budget(&request),
            self.generate_packing(&request),
        );

        let itinerary = itinerary?;
        Ok(TripPlan::assemble(
            &request,
            itinerary,
            section_or_absent("insights", insights),
            section_or_absent("budget", budget),
            section_or_absent("packing", packing),
        ))
    }

    async fn generate_itinerary(&self, request: &TripRequest) -> Result<String> {
        let completion =
            CompletionRequest::new(prompts::itinerary_prompt(request), ModelTier::Standard)
                .with_system(prompts::ITINERARY_SYSTEM_PROMPT)
                .with_temperature(0.8)
                .with_max_tokens(500 * request.duration_days());
        self.service.complete(completion).await
    }

    async fn generate_insights(&self, request: &TripRequest) -> Result<String> {
        let completion =
            CompletionRequest::new(prompts::insights_prompt(request), ModelTier::Fast)
                .with_system(prompts::INSIGHTS_SYSTEM_PROMPT)
                .with_temperature(0.7)
                .with_max_tokens(1500);
        self.cached_section(&self.insights_key(request), completion)
            .await
    }

    async fn generate_budget(&self, request: &TripRequest) -> Result<String> {
        let completion = CompletionRequest::new(prompts::budget_prompt(request), ModelTier::Fast)
            .with_temperature(0.5)
            .with_max_tokens(500);
        self.service.complete(completion).await
    }

    async fn generate_packing(&self, request: &TripRequest) -> Result<String> {
        let completion = CompletionRequest::new(prompts::packing_prompt(request), ModelTier::Fast)
            .with_temperature(0.6)
            .with_max_tokens(600);
        self.cached_section(&self.packing_key(request), completion)
            .await
    }

    /// Serve a section from the cache, generating and storing it on a miss
    async fn cached_section(&self, key: &str, completion: CompletionRequest) -> Result<String> {
        match cache::get::<String>(key).await {
            Ok(Some(text)) => {
                debug!(key, "Section served from cache");
                return Ok(text);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {key}: {e}"),
        }

        let text = self.service.complete(completion).await?;

        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        let ttl_secs = self.config.cache.ttl_hours as f32 * 3600.0 * jitter;
        if let Err(e) = cache::put(key, text.clone(), Duration::from_secs(ttl_secs as u64)).await {
            warn!("Cache write failed for {key}: {e}");
        }

        Ok(text)
    }

    fn insights_key(&self, request: &TripRequest) -> String {
        format!("insights-{}", slug(&request.destination))
    }

    fn packing_key(&self, request: &TripRequest) -> String {
        let interests: Vec<String> = request
            .preferences
            .iter()
            .map(|interest| interest.to_string().to_lowercase())
            .collect();
        format!(
            "packing-{}-{}-{}-{}",
            slug(&request.destination),
            request.season(),
            request.duration_days(),
            interests.join("-")
        )
    }
}

fn section_or_absent(section: &str, result: Result<String>) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Failed to generate {section} section: {e}");
            None
        }
    }
}

fn slug(text: &str) -> String {
    text.trim().to_lowercase().replace(char::is_whitespace, "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLevel, Interest};
    use chrono::NaiveDate;

    fn request() -> TripRequest {
        TripRequest {
            origin: None,
            destination: "San Sebastian".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
            travelers: 2,
            budget: None,
            budget_level: BudgetLevel::Luxury,
            preferences: vec![Interest::Food, Interest::Relaxation],
        }
    }

    #[test]
    fn test_slug_normalizes_whitespace_and_case() {
        assert_eq!(slug("  San Sebastian "), "san-sebastian");
        assert_eq!(slug("Tokyo"), "tokyo");
    }

    #[test]
    fn test_cache_keys_are_stable_per_request() {
        let config = TripCraftConfig::default();
        let planner = TripPlanner::new(Arc::new(NoopService), config);
        let req = request();
        assert_eq!(planner.insights_key(&req), "insights-san-sebastian");
        assert_eq!(
            planner.packing_key(&req),
            "packing-san-sebastian-summer-4-food-relaxation"
        );
    }

    struct NoopService;

    #[async_trait::async_trait]
    impl CompletionService for NoopService {
        async fn complete(&self, _request: CompletionRequest) -> Result<String> {
            Ok(String::new())
        }
    }
}
