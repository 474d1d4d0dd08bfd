// Export all route modules
pub mod campaigns;
pub mod events;
pub mod rooms;

// Re-export all route handlers for easy importing
pub use campaigns::*;
pub use events::*;
pub use rooms::*;
