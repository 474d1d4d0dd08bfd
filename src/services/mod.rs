// Domain services behind the route handlers
pub mod analytics;
pub mod campaigns;
pub mod funding;
