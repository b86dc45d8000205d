use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ignux_core::models::BookingStatus;

#[derive(Parser)]
#[command(name = "ignux")]
#[command(about = "Talk to the IGNUX events backend and manage cached site content")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Backend API base URL (e.g. <http://localhost:8000/api/v1>)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Content API base URL; content commands are cache-only without one
    #[arg(long, global = true, value_name = "URL")]
    pub content_url: Option<String>,

    /// Never contact the content API, use local caches only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Path to the content cache file
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage synchronized content collections (portfolio, blog, ...)
    Content {
        #[command(subcommand)]
        command: ContentCommands,
    },
    /// Contact form submissions
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Request a quick quote
    Quote(QuoteArgs),
    /// Build a WhatsApp deep link with a prefilled message
    Whatsapp {
        /// Phone number to message
        #[arg(long)]
        phone: String,
        /// Message text
        #[arg(long)]
        message: String,
        /// Optional message template name
        #[arg(long)]
        template: Option<String>,
    },
    /// Create and inspect bookings
    Booking {
        #[command(subcommand)]
        command: BookingCommands,
    },
    /// Browse the service catalogue
    Services {
        #[command(subcommand)]
        command: ServicesCommands,
    },
    /// List or submit testimonials
    Testimonials {
        #[command(subcommand)]
        command: TestimonialsCommands,
    },
    /// Newsletter subscription
    Newsletter {
        #[command(subcommand)]
        command: NewsletterCommands,
    },
    /// Configure persistent CLI settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ContentCommands {
    /// Show the items of a content type
    List {
        /// Content type (e.g. portfolio, blog, testimonials, services)
        content_type: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item; prints the new id
    Add {
        content_type: String,
        /// Field assignment, repeatable; values are parsed as JSON when valid
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// All fields as one JSON object
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,
    },
    /// Patch an item by id
    Update {
        content_type: String,
        id: String,
        /// Field assignment, repeatable; values are parsed as JSON when valid
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Patch as one JSON object
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,
    },
    /// Remove an item by id
    Remove { content_type: String, id: String },
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Submit a contact inquiry
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        event_type: String,
        /// Event date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        event_date: Option<NaiveDate>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        message: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    #[arg(long)]
    pub service_type: String,
    /// Event date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub event_date: Option<NaiveDate>,
    #[arg(long)]
    pub guests: Option<u32>,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub special_requests: Option<String>,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// Create a booking from a JSON request file
    Create {
        /// JSON file with the booking request, or `-` for stdin
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// List bookings
    List {
        #[arg(long, value_enum)]
        status: Option<BookingStatusArg>,
        /// Earliest event date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<NaiveDate>,
        /// Latest event date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<NaiveDate>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        service_type: Option<String>,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show booked and open days in a date range
    Availability {
        #[arg(long, value_name = "DATE")]
        from: NaiveDate,
        #[arg(long, value_name = "DATE")]
        to: NaiveDate,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BookingStatusArg {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl From<BookingStatusArg> for BookingStatus {
    fn from(value: BookingStatusArg) -> Self {
        match value {
            BookingStatusArg::Pending => Self::Pending,
            BookingStatusArg::Confirmed => Self::Confirmed,
            BookingStatusArg::InProgress => Self::InProgress,
            BookingStatusArg::Completed => Self::Completed,
            BookingStatusArg::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Subcommand)]
pub enum ServicesCommands {
    /// List active services
    List {
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one service by slug or numeric id
    Show {
        #[arg(value_name = "SLUG|ID")]
        service: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List service categories with counts
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List featured services
    Featured {
        /// Number of services (1-20)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TestimonialsCommands {
    /// List approved testimonials
    List {
        /// Only featured testimonials
        #[arg(long)]
        featured: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the highest-rated featured testimonials
    Featured {
        /// Number of testimonials (1-10)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a testimonial for review
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        event_type: String,
        /// Event date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        event_date: Option<NaiveDate>,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        /// Testimonial text
        #[arg(long)]
        text: String,
    },
}

#[derive(Subcommand)]
pub enum NewsletterCommands {
    /// Subscribe an email address
    Subscribe {
        email: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Unsubscribe an email address
    Unsubscribe {
        email: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the CLI config file
    Init {
        /// Backend API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Content API base URL
        #[arg(long, value_name = "URL")]
        content_api_url: Option<String>,
        /// Cache key namespace
        #[arg(long, value_name = "NAME")]
        namespace: Option<String>,
    },
    /// Print the effective settings
    Show,
}
