//! Farm preference records.
//!
//! A preference links a farm to one entry of the global reference catalog and carries a
//! denormalized copy of that entry for display. All preference kinds share the same shape and
//! only differ in the name of the reference field, so the structs are generated.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::model::reference::{AlertTemplate, Breed, Product, Species, Veterinarian};

/// Common accessors over every preference record kind.
pub trait PreferenceRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// ID of the preference record itself
    fn id(&self) -> &str;
    /// ID of the referenced catalog entry
    fn reference_id(&self) -> &str;
    fn display_order(&self) -> i32;
    fn is_active(&self) -> bool;
}

macro_rules! preference_record {
    ($(#[$doc:meta])* $name:ident, $reference_id:ident, $embedded:ident: $embedded_ty:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: String,
            pub farm_id: String,
            pub $reference_id: String,
            #[serde(default)]
            pub display_order: i32,
            pub is_active: bool,
            pub $embedded: Option<$embedded_ty>,
            pub created_at: Option<DateTime<Utc>>,
            pub updated_at: Option<DateTime<Utc>>,
        }

        impl PreferenceRecord for $name {
            fn id(&self) -> &str {
                &self.id
            }

            fn reference_id(&self) -> &str {
                &self.$reference_id
            }

            fn display_order(&self) -> i32 {
                self.display_order
            }

            fn is_active(&self) -> bool {
                self.is_active
            }
        }
    };
}

preference_record!(
    /// Breed a farm raises
    BreedPreference,
    breed_id,
    breed: Breed
);
preference_record!(
    /// Species a farm raises
    SpeciesPreference,
    species_id,
    species: Species
);
preference_record!(
    /// Product a farm keeps in its pharmacy
    ProductPreference,
    product_id,
    product: Product
);
preference_record!(
    /// Veterinarian a farm works with
    VeterinarianPreference,
    veterinarian_id,
    veterinarian: Veterinarian
);
preference_record!(
    /// Alert template a farm subscribes to
    AlertPreference,
    alert_template_id,
    alert_template: AlertTemplate
);

/// Partial update of a preference's ordering or activation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferenceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
