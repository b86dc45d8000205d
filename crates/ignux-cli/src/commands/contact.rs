use ignux_core::models::{ContactInquiry, QuoteRequest, WhatsAppRequest};

use crate::cli::{ContactCommands, QuoteArgs};
use crate::commands::common::api_client;
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_contact(command: ContactCommands, settings: &Settings) -> Result<(), CliError> {
    match command {
        ContactCommands::Submit {
            name,
            email,
            phone,
            event_type,
            event_date,
            budget,
            message,
        } => {
            let inquiry = ContactInquiry {
                name,
                email,
                phone,
                event_type,
                event_date,
                budget,
                message,
            };
            let client = api_client(settings)?;
            let stored = client.submit_contact(&inquiry).await?;
            println!("Inquiry #{} received. We will get back to you soon.", stored.id);
            Ok(())
        }
    }
}

pub async fn run_quote(args: QuoteArgs, settings: &Settings) -> Result<(), CliError> {
    let request = quote_request_from_args(args);
    let client = api_client(settings)?;
    let response = client.quick_quote(&request).await?;

    if !response.success {
        return Err(CliError::Rejected(
            response.error.unwrap_or(response.message),
        ));
    }
    match response.data {
        Some(receipt) => println!(
            "{}: reference {} (expect a response {})",
            response.message, receipt.reference, receipt.estimated_response
        ),
        None => println!("{}", response.message),
    }
    Ok(())
}

pub async fn run_whatsapp(
    phone: String,
    message: String,
    template: Option<String>,
    settings: &Settings,
) -> Result<(), CliError> {
    let request = WhatsAppRequest {
        phone,
        message,
        template,
    };
    let client = api_client(settings)?;
    let response = client.whatsapp_link(&request).await?;

    if !response.success {
        return Err(CliError::Rejected(
            response.error.unwrap_or(response.message),
        ));
    }
    let link = response
        .data
        .ok_or_else(|| CliError::Rejected("Server did not return a WhatsApp link".to_string()))?;
    println!("{}", link.whatsapp_url);
    Ok(())
}

pub fn quote_request_from_args(args: QuoteArgs) -> QuoteRequest {
    QuoteRequest {
        service_type: args.service_type,
        event_date: args.event_date,
        guest_count: args.guests,
        location: args.location,
        duration: args.duration,
        special_requests: args.special_requests,
        contact_email: args.email,
        contact_phone: args.phone,
    }
}
