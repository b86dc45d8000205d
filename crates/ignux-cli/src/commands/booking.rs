use std::path::Path;

use ignux_core::models::{Availability, BookingFilter, BookingRequest};
use ignux_core::util::normalize_text_option;

use crate::cli::BookingCommands;
use crate::commands::common::{api_client, format_booking_lines, print_json, read_json_input};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_booking(command: BookingCommands, settings: &Settings) -> Result<(), CliError> {
    match command {
        BookingCommands::Create { file } => run_booking_create(&file, settings).await,
        BookingCommands::List {
            status,
            from,
            to,
            email,
            service_type,
            skip,
            limit,
            json,
        } => {
            let filter = BookingFilter {
                skip,
                limit,
                status: status.map(Into::into),
                date_from: from,
                date_to: to,
                client_email: normalize_text_option(email),
                service_type: normalize_text_option(service_type),
            };
            run_booking_list(&filter, json, settings).await
        }
        BookingCommands::Availability { from, to, json } => {
            let client = api_client(settings)?;
            let availability = client.check_availability(from, to).await?;
            if json {
                print_json(&availability)?;
            } else {
                for line in format_availability_lines(&availability) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

async fn run_booking_create(file: &Path, settings: &Settings) -> Result<(), CliError> {
    let raw = read_json_input(file)?;
    let request = serde_json::from_str::<BookingRequest>(&raw)?;
    let client = api_client(settings)?;
    let booking = client.create_booking(&request).await?;
    println!(
        "Booking #{} created for {} ({})",
        booking.id, booking.request.event_date, booking.booking_status
    );
    Ok(())
}

async fn run_booking_list(
    filter: &BookingFilter,
    as_json: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let client = api_client(settings)?;
    let bookings = client.list_bookings(filter).await?;

    if as_json {
        print_json(&bookings)?;
    } else if bookings.is_empty() {
        println!("No bookings found.");
    } else {
        for line in format_booking_lines(&bookings) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_availability_lines(availability: &Availability) -> Vec<String> {
    let mut lines = vec![format!(
        "{} to {}: {} of {} days available",
        availability.date_from,
        availability.date_to,
        availability.available_days,
        availability.total_days
    )];
    if !availability.booked_dates.is_empty() {
        let booked = availability
            .booked_dates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Booked: {booked}"));
    }
    lines
}
