pub mod geo;
pub mod user_agent;
