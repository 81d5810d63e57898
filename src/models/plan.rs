//! Generated trip plan
//!
//! The completion service returns opaque text; a plan bundles those
//! sections together with the request summary they were generated for.
//! Nothing here parses or validates the generated text.

use crate::models::trip::{BudgetLevel, Interest, TripRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A fully generated trip plan, ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Where the trip starts from, when the user supplied it
    pub origin: Option<String>,
    /// Destination city or region
    pub destination: String,
    /// Human-readable date range
    pub dates: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip
    pub end_date: NaiveDate,
    /// Trip length in days
    pub duration_days: u32,
    /// Number of travelers
    pub travelers: u32,
    /// Budget tier the plan was generated for
    pub budget_level: BudgetLevel,
    /// Interest tags the plan was generated for
    pub preferences: Vec<Interest>,
    /// Day-by-day itinerary text
    pub itinerary: String,
    /// Destination guide text, absent if generation failed
    pub insights: Option<String>,
    /// Budget breakdown text, absent if generation failed
    pub budget: Option<String>,
    /// Packing list text, absent if generation failed
    pub packing: Option<String>,
    /// When this plan was generated
    pub generated_at: DateTime<Utc>,
}

impl TripPlan {
    /// Assemble a plan from the request it answers and the generated sections
    #[must_use]
    pub fn assemble(
        request: &TripRequest,
        itinerary: String,
        insights: Option<String>,
        budget: Option<String>,
        packing: Option<String>,
    ) -> Self {
        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            dates: request.formatted_dates(),
            start_date: request.start_date,
            end_date: request.end_date,
            duration_days: request.duration_days(),
            travelers: request.travelers,
            budget_level: request.budget_level,
            preferences: request.preferences.clone(),
            itinerary,
            insights,
            budget,
            packing,
            generated_at: Utc::now(),
        }
    }

    /// Plain-text summary suitable for sharing with travel companions
    #[must_use]
    pub fn share_summary(&self) -> String {
        let mut summary = format!("Trip to {}\n", self.destination);
        summary.push_str(&format!("Dates: {}\n", self.dates));
        if let Some(origin) = &self.origin {
            summary.push_str(&format!("From: {origin}\n"));
        }
        summary.push_str(&format!("Travelers: {}\n", self.travelers));
        summary.push_str(&format!("Budget: {}\n", self.budget_level));
        if !self.preferences.is_empty() {
            let interests: Vec<String> =
                self.preferences.iter().map(ToString::to_string).collect();
            summary.push_str(&format!("Interests: {}\n", interests.join(", ")));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> TripRequest {
        TripRequest {
            origin: Some("London".to_string()),
            destination: "Rome".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 8).unwrap(),
            travelers: 2,
            budget: Some(2000.0),
            budget_level: BudgetLevel::MidRange,
            preferences: vec![Interest::Culture, Interest::Food],
        }
    }

    #[test]
    fn test_assemble_carries_request_fields() {
        let plan = TripPlan::assemble(
            &sample_request(),
            "Day 1: arrive".to_string(),
            Some("Rome guide".to_string()),
            None,
            None,
        );
        assert_eq!(plan.destination, "Rome");
        assert_eq!(plan.duration_days, 4);
        assert_eq!(plan.itinerary, "Day 1: arrive");
        assert_eq!(plan.insights.as_deref(), Some("Rome guide"));
        assert!(plan.budget.is_none());
    }

    #[test]
    fn test_share_summary_contents() {
        let plan = TripPlan::assemble(&sample_request(), "itinerary".to_string(), None, None, None);
        let summary = plan.share_summary();
        assert!(summary.contains("Trip to Rome"));
        assert!(summary.contains("From: London"));
        assert!(summary.contains("Travelers: 2"));
        assert!(summary.contains("Budget: mid-range"));
        assert!(summary.contains("Culture, Food"));
    }

    #[test]
    fn test_share_summary_without_origin() {
        let mut request = sample_request();
        request.origin = None;
        let plan = TripPlan::assemble(&request, "itinerary".to_string(), None, None, None);
        assert!(!plan.share_summary().contains("From:"));
    }
}
