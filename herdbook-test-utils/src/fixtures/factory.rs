//! JSON fixture factories.
//!
//! Every factory returns a `serde_json::Value` shaped like the corresponding API response
//! record. Farm-scoped records belong to `TEST_FARM_ID` and all timestamps are
//! `TEST_TIMESTAMP`.

use serde_json::{json, Value};

use crate::constant::{TEST_FARM_ID, TEST_TIMESTAMP};

/// Create a mock animal record.
///
/// # Arguments
/// - `id` - Animal ID
/// - `version` - Optimistic-lock version
///
/// # Returns
/// - `Value` - A live female animal record
pub fn mock_animal(id: &str, version: i64) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "eid": format!("250{}", id),
        "officialNumber": null,
        "visualId": format!("V-{}", id),
        "name": "Marguerite",
        "sex": "female",
        "birthDate": "2022-04-12",
        "speciesId": "sp-bovine",
        "breedId": "b1",
        "motherId": null,
        "fatherId": null,
        "lotId": null,
        "status": "alive",
        "notes": null,
        "version": version,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock lot record.
pub fn mock_lot(id: &str, version: i64) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "name": format!("Lot {}", id),
        "type": "fattening",
        "description": null,
        "animalCount": 12,
        "isActive": true,
        "version": version,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock treatment record for an animal.
pub fn mock_treatment(id: &str, animal_id: &str) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "animalId": animal_id,
        "productId": "p1",
        "veterinarianId": "v1",
        "treatmentDate": TEST_TIMESTAMP,
        "diagnosis": "Mastitis",
        "dose": 10.5,
        "dosageUnit": "ml",
        "withdrawalEndDate": "2025-03-15",
        "status": "in_progress",
        "notes": null,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock vaccination record for an animal.
pub fn mock_vaccination(id: &str, animal_id: &str) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "animalId": animal_id,
        "lotId": null,
        "productId": "p2",
        "veterinarianId": null,
        "vaccinationDate": TEST_TIMESTAMP,
        "disease": "Bluetongue",
        "batchNumber": "BT-2025-01",
        "nextDueDate": "2026-03-01",
        "notes": null,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock weighing record for an animal.
pub fn mock_weighing(id: &str, animal_id: &str, weight: f64) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "animalId": animal_id,
        "weight": weight,
        "weighingDate": TEST_TIMESTAMP,
        "source": "scale",
        "notes": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock breed from the global catalog.
pub fn mock_breed(id: &str) -> Value {
    json!({
        "id": id,
        "speciesId": "sp-bovine",
        "name": format!("Breed {}", id),
        "description": null,
        "isActive": true,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock species from the global catalog.
pub fn mock_species(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Species {}", id),
        "scientificName": null,
        "isActive": true,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock veterinary product from the global catalog.
pub fn mock_product(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Product {}", id),
        "category": "antibiotic",
        "manufacturer": null,
        "activeIngredient": null,
        "withdrawalDays": 7,
        "isActive": true,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock veterinarian from the global catalog.
pub fn mock_veterinarian(id: &str) -> Value {
    json!({
        "id": id,
        "firstName": "Claire",
        "lastName": "Dubois",
        "clinic": null,
        "phone": null,
        "email": null,
        "licenseNumber": null,
        "isActive": true,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock soft-deleted breed, as returned by the delete endpoint.
///
/// # Arguments
/// - `id` - Breed ID
/// - `version` - Version after the delete
pub fn mock_deleted_breed(id: &str, version: i64) -> Value {
    let mut breed = mock_breed(id);
    breed["version"] = json!(version);
    breed["isActive"] = json!(false);
    breed["deletedAt"] = json!("2025-03-02T09:30:00Z");
    breed["updatedAt"] = json!("2025-03-02T09:30:00Z");
    breed
}

/// Create a mock alert template from the global catalog.
pub fn mock_alert_template(id: &str) -> Value {
    json!({
        "id": id,
        "code": format!("ALERT_{}", id.to_uppercase()),
        "name": format!("Template {}", id),
        "description": null,
        "category": "vaccination",
        "priority": "high",
        "isActive": true,
        "version": 1,
        "deletedAt": null,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a mock farm preference record.
///
/// # Arguments
/// - `id` - Preference record ID
/// - `reference_key` - Name of the reference field, e.g. `"breedId"`
/// - `reference_id` - ID of the referenced catalog entry
/// - `display_order` - Position of the entry in the farm's list
///
/// # Returns
/// - `Value` - An active preference without embedded reference entity
pub fn mock_preference(id: &str, reference_key: &str, reference_id: &str, display_order: i32) -> Value {
    let mut preference = json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "displayOrder": display_order,
        "isActive": true,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    });
    preference[reference_key] = json!(reference_id);
    preference
}

/// Create a mock breed preference with the breed embedded.
pub fn mock_breed_preference(id: &str, breed_id: &str, display_order: i32) -> Value {
    let mut preference = mock_preference(id, "breedId", breed_id, display_order);
    preference["breed"] = mock_breed(breed_id);
    preference
}

/// Create a mock farm alert.
///
/// # Arguments
/// - `id` - Alert ID
/// - `is_read` - Whether the alert has been read
pub fn mock_alert(id: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "farmId": TEST_FARM_ID,
        "alertTemplateId": "t1",
        "animalId": "a1",
        "title": "Vaccination due",
        "message": null,
        "priority": "high",
        "category": "vaccination",
        "isRead": is_read,
        "triggeredAt": TEST_TIMESTAMP,
        "readAt": if is_read { json!(TEST_TIMESTAMP) } else { Value::Null },
        "createdAt": TEST_TIMESTAMP
    })
}

/// Create a mock alert summary.
pub fn mock_alert_summary(total: u64, unread: u64) -> Value {
    json!({
        "total": total,
        "unread": unread,
        "byPriority": { "high": unread },
        "byCategory": { "vaccination": total }
    })
}

/// Create mock farm settings.
pub fn mock_farm_preferences(version: i64) -> Value {
    json!({
        "id": "fp-1",
        "farmId": TEST_FARM_ID,
        "weightUnit": "kg",
        "currency": "EUR",
        "language": "fr",
        "dateFormat": "DD/MM/YYYY",
        "defaultSpeciesId": "sp-bovine",
        "vaccinationReminderDays": 7,
        "version": version,
        "createdAt": TEST_TIMESTAMP,
        "updatedAt": TEST_TIMESTAMP
    })
}

/// Create a paginated envelope around `items`.
///
/// `totalPages` is derived as `ceil(total / limit)`.
pub fn mock_paginated(items: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = if limit == 0 {
        0
    } else {
        total.div_ceil(u64::from(limit))
    };

    json!({
        "data": items,
        "meta": {
            "total": total,
            "page": page,
            "limit": limit,
            "totalPages": total_pages
        }
    })
}

/// Create a NestJS-style error body for `status`.
pub fn mock_error(status: usize) -> Value {
    let (error, message) = match status {
        400 => ("Bad Request", "Validation failed"),
        404 => ("Not Found", "Resource not found"),
        409 => ("Conflict", "Version conflict: the record was modified by another user"),
        422 => ("Unprocessable Entity", "Validation failed"),
        _ => ("Internal Server Error", "Internal server error"),
    };

    json!({
        "statusCode": status,
        "error": error,
        "message": message
    })
}
