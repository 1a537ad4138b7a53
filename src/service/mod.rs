//! Entity services: one per API resource.
//!
//! Every CRUD resource is described by a [`Resource`] implementation and served by the generic
//! [`EntityService`]. Resources with endpoints beyond plain CRUD add inherent methods in their
//! own module. Alerts, farm settings and preference lists have dedicated services.

pub mod alert;
pub mod animal;
pub mod entity;
pub mod farm_preferences;
pub mod lot;
pub mod preference;
pub mod reference;
pub mod treatment;
pub mod vaccination;
pub mod weighing;

#[cfg(test)]
mod tests;

use reqwest::Url;

pub use entity::{EntityService, Resource, SoftDeletable};

/// Prefix shared by every API path
pub const API_PREFIX: &str = "/api/v1";

/// Tenant a service acts for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Global catalog resources only
    #[default]
    Global,
    Farm(String),
}

impl Scope {
    /// Farm scope; a blank farm ID yields [`Scope::Global`].
    pub fn farm(farm_id: impl Into<String>) -> Self {
        let farm_id = farm_id.into();
        if farm_id.trim().is_empty() {
            Self::Global
        } else {
            Self::Farm(farm_id)
        }
    }

    pub fn farm_id(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Farm(farm_id) => Some(farm_id),
        }
    }
}

impl From<Option<String>> for Scope {
    fn from(farm_id: Option<String>) -> Self {
        farm_id.map(Self::farm).unwrap_or_default()
    }
}

/// Path of a farm-level endpoint, e.g. `/api/v1/farms/{farmId}/alerts`.
pub(crate) fn farm_path(farm_id: &str, segment: &str) -> String {
    format!("{}/farms/{}/{}", API_PREFIX, path_segment(farm_id), segment)
}

/// Percent-encodes an ID so it stays a single path segment.
///
/// IDs are opaque: `/`, `?`, `#` and `%` are escaped rather than interpreted.
pub(crate) fn path_segment(id: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return id.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(id);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Fails with `MissingFarmId` when `farm_id` is blank.
pub(crate) fn require_farm_id(
    farm_id: impl Into<String>,
    name: &'static str,
) -> Result<String, crate::error::Error> {
    match Scope::farm(farm_id) {
        Scope::Farm(farm_id) => Ok(farm_id),
        Scope::Global => Err(crate::error::Error::MissingFarmId(name)),
    }
}
