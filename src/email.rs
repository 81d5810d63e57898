use anyhow::{Context, Result};
use lettre::{
    Message, Transport, transport::smtp::SmtpTransport,
    transport::smtp::authentication::Credentials,
};
use std::env;

use crate::models::TripPlan;

fn create_mailer() -> Result<SmtpTransport> {
    let gmail_address = env::var("GMAIL_ADDRESS").context("Missing GMAIL_ADDRESS env var")?;
    let gmail_app_password =
        env::var("GMAIL_APP_PASSWORD").context("Missing GMAIL_APP_PASSWORD env var")?;

    let credentials = Credentials::new(gmail_address, gmail_app_password);

    let mailer = SmtpTransport::relay("smtp.gmail.com")?
        .credentials(credentials)
        .build();

    Ok(mailer)
}

/// Send a generated plan to a travel companion
pub async fn send_plan(plan: &TripPlan, recipient: &str) -> Result<()> {
    let gmail_address = env::var("GMAIL_ADDRESS").context("Missing GMAIL_ADDRESS env var")?;

    let mut body = plan.share_summary();
    body.push('\n');
    body.push_str(&plan.itinerary);

    let email = Message::builder()
        .from(
            format!("TripCraft <{}>", gmail_address)
                .parse()
                .context("Failed to parse from address")?,
        )
        .to(recipient
            .parse()
            .context("Failed to parse recipient address")?)
        .subject(format!("Trip itinerary: {}", plan.destination))
        .body(body)?;

    let mailer = create_mailer()?;

    mailer.send(&email).context("Failed to send email")?;

    tracing::info!("Sent itinerary email to {}", recipient);

    Ok(())
}
