pub mod booking;
pub mod common;
pub mod completions;
pub mod config;
pub mod contact;
pub mod content;
pub mod newsletter;
pub mod services;
pub mod testimonials;
