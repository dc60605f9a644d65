pub mod calendar;
pub mod chatbot;
pub mod health;
pub mod sitemap;
