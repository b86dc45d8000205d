use ignux_core::models::{
    ApiResponse, NewsletterSubscription, NewsletterUnsubscribe, SubscriptionStatus,
};
use ignux_core::util::normalize_text_option;

use crate::cli::NewsletterCommands;
use crate::commands::common::api_client;
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_newsletter(
    command: NewsletterCommands,
    settings: &Settings,
) -> Result<(), CliError> {
    let client = api_client(settings)?;

    let response = match command {
        NewsletterCommands::Subscribe { email, name } => {
            let subscription = NewsletterSubscription {
                name: normalize_text_option(name),
                source: "cli".to_string(),
                ..NewsletterSubscription::new(email.trim())
            };
            client.subscribe_newsletter(&subscription).await?
        }
        NewsletterCommands::Unsubscribe { email, reason } => {
            let request = NewsletterUnsubscribe {
                email: email.trim().to_string(),
                reason: normalize_text_option(reason),
            };
            client.unsubscribe_newsletter(&request).await?
        }
    };

    println!("{}", describe_subscription_response(response)?);
    Ok(())
}

pub fn describe_subscription_response(
    response: ApiResponse<SubscriptionStatus>,
) -> Result<String, CliError> {
    if !response.success {
        return Err(CliError::Rejected(
            response.error.unwrap_or(response.message),
        ));
    }
    Ok(match response.data {
        Some(status) => format!("{} ({}: {})", response.message, status.email, status.status),
        None => response.message,
    })
}
