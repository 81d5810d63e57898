//! Trip request model and validation
//!
//! A trip request carries the user-supplied parameters for one planning
//! round. It is created from user input, validated before any network
//! call, and discarded once the plan has been rendered.

use crate::TripCraftError;
use crate::config::DefaultsConfig;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget tier for a trip
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetLevel {
    /// Hostels, street food, public transit
    Budget,
    /// Mid-range hotels and restaurants
    #[default]
    MidRange,
    /// High-end accommodation and dining
    Luxury,
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetLevel::Budget => write!(f, "budget"),
            BudgetLevel::MidRange => write!(f, "mid-range"),
            BudgetLevel::Luxury => write!(f, "luxury"),
        }
    }
}

/// Traveler interest tags offered by the planning form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interest {
    Culture,
    Adventure,
    Food,
    Relaxation,
    Shopping,
    Nature,
    Photography,
}

impl Interest {
    /// All interest tags, in form display order
    pub const ALL: [Interest; 7] = [
        Interest::Culture,
        Interest::Adventure,
        Interest::Food,
        Interest::Relaxation,
        Interest::Shopping,
        Interest::Nature,
        Interest::Photography,
    ];
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interest::Culture => "Culture",
            Interest::Adventure => "Adventure",
            Interest::Food => "Food",
            Interest::Relaxation => "Relaxation",
            Interest::Shopping => "Shopping",
            Interest::Nature => "Nature",
            Interest::Photography => "Photography",
        };
        write!(f, "{name}")
    }
}

/// User-supplied parameters describing a desired trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    /// Where the trip starts from, used for arrival/departure planning
    #[serde(default)]
    pub origin: Option<String>,
    /// Destination city or region
    pub destination: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip
    pub end_date: NaiveDate,
    /// Number of travelers
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    /// Total trip budget, if the user supplied one
    #[serde(default)]
    pub budget: Option<f64>,
    /// Budget tier
    #[serde(default)]
    pub budget_level: BudgetLevel,
    /// Interest tags steering the recommendations
    #[serde(default)]
    pub preferences: Vec<Interest>,
}

fn default_travelers() -> u32 {
    2
}

impl TripRequest {
    /// Validate the request against the configured limits.
    ///
    /// Runs before any network call; a failure here means no outbound
    /// request is made.
    pub fn validate(&self, defaults: &DefaultsConfig) -> Result<(), TripCraftError> {
        if self.destination.trim().is_empty() {
            return Err(TripCraftError::invalid_input("Destination cannot be empty"));
        }

        if self.start_date > self.end_date {
            return Err(TripCraftError::invalid_input(
                "Start date must be on or before the end date",
            ));
        }

        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(TripCraftError::invalid_input(
                    "Budget must be a non-negative number",
                ));
            }
        }

        if self.travelers == 0 {
            return Err(TripCraftError::invalid_input(
                "At least one traveler is required",
            ));
        }

        if self.travelers > defaults.max_travelers {
            return Err(TripCraftError::invalid_input(format!(
                "Travelers cannot exceed {}",
                defaults.max_travelers
            )));
        }

        if self.duration_days() > defaults.max_trip_days {
            return Err(TripCraftError::invalid_input(format!(
                "Trip length cannot exceed {} days",
                defaults.max_trip_days
            )));
        }

        Ok(())
    }

    /// Trip length in days. A same-day trip counts as one day.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days();
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }

    /// Northern-hemisphere season bucket for the start of the trip
    #[must_use]
    pub fn season(&self) -> &'static str {
        match (self.start_date.month() % 12) / 3 {
            0 => "winter",
            1 => "spring",
            2 => "summer",
            _ => "fall",
        }
    }

    /// Human-readable date range, e.g. "July 10, 2026 - July 14, 2026"
    #[must_use]
    pub fn formatted_dates(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%B %d, %Y"),
            self.end_date.format("%B %d, %Y")
        )
    }
}
