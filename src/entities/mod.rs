pub mod availability;
pub mod campaign;
pub mod campaign_event_option;
pub mod department;
pub mod event_option;
pub mod private_contribution;
pub mod room;
pub mod stretch_goal;
pub mod vote;

pub use campaign::CampaignStatus;
pub use event_option::EventCategory;
pub use private_contribution::BadgeType;

pub use availability::Entity as Availability;
pub use campaign::Entity as Campaign;
pub use campaign_event_option::Entity as CampaignEventOptions;
pub use department::Entity as Department;
pub use event_option::Entity as EventOptions;
pub use private_contribution::Entity as PrivateContributions;
pub use room::Entity as Rooms;
pub use stretch_goal::Entity as StretchGoals;
pub use vote::Entity as Votes;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON-encoded list of strings, used for event tags, accessibility flags
/// and availability slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct StringList(pub Vec<String>);

/// Generate a fresh entity id (hex, no hyphens).
pub fn gen_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
