use ignux_core::models::TestimonialSubmission;

use crate::cli::TestimonialsCommands;
use crate::commands::common::{api_client, format_testimonial_lines, print_json};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_testimonials(
    command: TestimonialsCommands,
    settings: &Settings,
) -> Result<(), CliError> {
    let client = api_client(settings)?;

    match command {
        TestimonialsCommands::List { featured, json } => {
            let testimonials = client.list_testimonials(featured).await?;
            if json {
                print_json(&testimonials)?;
            } else if testimonials.is_empty() {
                println!("No testimonials yet.");
            } else {
                for line in format_testimonial_lines(&testimonials) {
                    println!("{line}");
                }
            }
        }
        TestimonialsCommands::Featured { limit, json } => {
            let testimonials = client.featured_testimonials(limit).await?;
            if json {
                print_json(&testimonials)?;
            } else {
                for line in format_testimonial_lines(&testimonials) {
                    println!("{line}");
                }
            }
        }
        TestimonialsCommands::Submit {
            name,
            event_type,
            event_date,
            rating,
            text,
        } => {
            let submission = TestimonialSubmission {
                client_name: name,
                event_type,
                event_date,
                rating,
                testimonial: text,
            };
            let testimonial = client.submit_testimonial(&submission).await?;
            println!(
                "Testimonial #{} submitted and awaiting approval.",
                testimonial.id
            );
        }
    }

    Ok(())
}
