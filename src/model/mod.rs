//! Wire models exchanged with the herdbook API.
//!
//! Records, create/update DTOs and list filters for every resource, plus the pagination
//! envelope. All wire names are camelCase.

pub mod alert;
pub mod animal;
pub mod api;
pub mod farm_preferences;
pub mod lot;
pub mod preference;
pub mod reference;
pub mod treatment;
pub mod vaccination;
pub mod weighing;
