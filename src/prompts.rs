//! Prompt construction for the completion service
//!
//! Every builder is a pure function of the trip request: identical
//! requests produce byte-identical prompts. No clocks, no randomness.

use crate::models::TripRequest;
use std::fmt::Write;

/// System prompt for itinerary generation
pub const ITINERARY_SYSTEM_PROMPT: &str = "You are a professional travel planner creating detailed, realistic itineraries with specific recommendations.";

/// System prompt for destination insights
pub const INSIGHTS_SYSTEM_PROMPT: &str =
    "You are an expert travel guide providing detailed, accurate information.";

/// Interest tags joined for prompt text, falling back to general sightseeing
fn preferences_line(request: &TripRequest) -> String {
    if request.preferences.is_empty() {
        "general sightseeing".to_string()
    } else {
        let tags: Vec<String> = request.preferences.iter().map(ToString::to_string).collect();
        tags.join(", ")
    }
}

/// Build the day-by-day itinerary prompt
#[must_use]
pub fn itinerary_prompt(request: &TripRequest) -> String {
    let days = request.duration_days();
    let mut prompt = format!(
        "Create a detailed {days}-day itinerary for {}.\n\nTrip details:\n",
        request.destination
    );
    if let Some(origin) = &request.origin {
        let _ = writeln!(prompt, "- Starting from: {origin}");
    }
    let _ = writeln!(prompt, "- Travelers: {}", request.travelers);
    let _ = writeln!(prompt, "- Preferences: {}", preferences_line(request));
    let _ = writeln!(prompt, "- Budget: {}", request.budget_level);
    if let Some(budget) = request.budget {
        let _ = writeln!(prompt, "- Total budget: ${budget:.0}");
    }
    let _ = writeln!(prompt, "- Start date: {}", request.start_date.format("%Y-%m-%d"));

    prompt.push_str(
        "\nFor EACH day provide:\n\
         - A heading with the day number, date, and a descriptive theme \
           (e.g. \"Day 1 - Historic Heart & Local Flavors\")\n\
         - Morning, afternoon, and evening activities with start times\n\
         - For each activity: what to expect in 2-3 sentences, duration, \
           approximate cost, the neighborhood or address, and one insider tip\n\
         - How to get around that day (metro lines, walking routes)\n\
         - The approximate total cost for the day\n\n\
         Make it realistic with proper timing, real locations, and practical advice.\n",
    );
    if let Some(origin) = &request.origin {
        let _ = writeln!(prompt, "Day 1 should include arrival from {origin}.");
    }
    prompt.push_str(
        "The last day should account for departure logistics.\n\
         Each activity should have meaningful descriptions, not generic statements.",
    );
    prompt
}

/// Build the destination insights prompt
#[must_use]
pub fn insights_prompt(request: &TripRequest) -> String {
    format!(
        "Provide detailed travel insights for {}, covering:\n\n\
         - A 2-3 sentence overview of what makes this destination special\n\
         - The best time to visit, with months and reasons\n\
         - Typical daily budgets for budget, mid-range, and luxury travel\n\
         - Top attractions: why to visit, time needed, and entry cost\n\
         - Local cuisine worth seeking out, and where to find it\n\
         - Three important cultural tips\n\
         - Safety notes\n\
         - Getting around, including the trip from the airport into town\n\
         - A few useful local phrases\n\
         - Currency and exchange tips\n\
         - Neighborhoods worth staying in, and what each is best for\n\n\
         Be thorough and practical.",
        request.destination
    )
}

/// Build the packing list prompt
#[must_use]
pub fn packing_prompt(request: &TripRequest) -> String {
    format!(
        "Create a comprehensive packing list for {} in {}, {} days.\n\
         Activities: {}\n\n\
         Organize by category: documents, clothing, footwear, toiletries, \
         electronics, medications, accessories, activity-specific gear, and \
         optional extras.\n\n\
         Be specific about quantities and reasons \
         (e.g. \"Light rain jacket - afternoon showers common\").",
        request.destination,
        request.season(),
        request.duration_days(),
        preferences_line(request)
    )
}

/// Build the budget breakdown prompt
#[must_use]
pub fn budget_prompt(request: &TripRequest) -> String {
    let mut prompt = format!(
        "Create a detailed budget breakdown for {} traveler(s) in {} for {} days ({} level).\n",
        request.travelers,
        request.destination,
        request.duration_days(),
        request.budget_level
    );
    if let Some(budget) = request.budget {
        let _ = writeln!(
            prompt,
            "The travelers aim to stay within a total budget of ${budget:.0}."
        );
    }
    prompt.push_str(
        "\nCover:\n\
         - Accommodation: per night, total, and what kind of place to expect\n\
         - Food: typical breakfast, lunch, and dinner costs plus a trip total\n\
         - Transportation: airport transfers and daily local transit\n\
         - Activities: daily average and trip total\n\
         - A sensible emergency fund\n\
         - Per-person and whole-group totals with a daily average\n\
         - Two or three money-saving tips\n\n\
         Provide realistic estimates with context.",
    );
    prompt
}
