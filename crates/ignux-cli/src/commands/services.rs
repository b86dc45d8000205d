use crate::cli::ServicesCommands;
use crate::commands::common::{api_client, format_price_range, format_service_lines, print_json};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_services(command: ServicesCommands, settings: &Settings) -> Result<(), CliError> {
    let client = api_client(settings)?;

    match command {
        ServicesCommands::List { category, json } => {
            let services = client.list_services(category.as_deref()).await?;
            if json {
                print_json(&services)?;
            } else if services.is_empty() {
                println!("No services found.");
            } else {
                for line in format_service_lines(&services) {
                    println!("{line}");
                }
            }
        }
        ServicesCommands::Show { service: key, json } => {
            let service = match key.trim().parse::<i64>() {
                Ok(service_id) => client.get_service(service_id).await?,
                Err(_) => client.get_service_by_slug(&key).await?,
            };
            if json {
                print_json(&service)?;
            } else {
                println!("{} ({})", service.name, service.slug);
                println!("Category: {}", service.category);
                println!(
                    "Price:    {}",
                    format_price_range(service.price_range_min, service.price_range_max)
                );
                println!("Duration: {}", service.duration);
                println!();
                println!("{}", service.description);
                for feature in &service.features {
                    println!("  - {feature}");
                }
            }
        }
        ServicesCommands::Categories { json } => {
            let categories = client.list_service_categories().await?;
            if json {
                print_json(&categories)?;
            } else {
                for category in &categories {
                    println!("{:<20}  {}", category.name, category.count);
                }
            }
        }
        ServicesCommands::Featured { limit, json } => {
            let services = client.featured_services(limit).await?;
            if json {
                print_json(&services)?;
            } else {
                for line in format_service_lines(&services) {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}
