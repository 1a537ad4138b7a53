use herdbook::{
    model::preference::PreferenceRecord, service::preference::SpeciesPreferenceService, Error,
};
use herdbook_test_utils::prelude::*;
use serde_json::json;

use super::setup::client_for;

/// Tests converging a species list from {A, B, C} to {B, C, D}.
///
/// Verifies that exactly one delete (A) and one create (D, at position 2) are issued and
/// that B and C are left untouched.
///
/// Expected: Ok with B, C, D
#[tokio::test]
async fn save_batch_applies_minimal_changes() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_list_endpoint(
            &farm_path("species-preferences"),
            vec![
                factory::mock_preference("pA", "speciesId", "A", 0),
                factory::mock_preference("pB", "speciesId", "B", 1),
                factory::mock_preference("pC", "speciesId", "C", 2),
            ],
            1,
        )
        .with_no_content_endpoint("DELETE", &farm_path("species-preferences/pA"), 1)
        .with_no_content_endpoint("DELETE", &farm_path("species-preferences/pB"), 0)
        .with_no_content_endpoint("DELETE", &farm_path("species-preferences/pC"), 0)
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/api/v1/farms/farm-0001/species-preferences")
                .match_body(Matcher::Json(json!({"speciesId": "D", "displayOrder": 2})))
                .with_status(201)
                .with_body(
                    json!({
                        "success": true,
                        "data": factory::mock_preference("pD", "speciesId", "D", 2)
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await;

    let service = SpeciesPreferenceService::for_farm(client_for(&test)?, TEST_FARM_ID)?;
    let desired: Vec<String> = ["B", "C", "D"].iter().map(|id| id.to_string()).collect();
    let result = service.save_batch(&desired).await?;

    let ids: Vec<&str> = result.iter().map(|preference| preference.reference_id()).collect();
    assert_eq!(ids, vec!["B", "C", "D"]);
    test.assert_mocks();

    Ok(())
}

/// Tests that a failed create aborts the batch without rolling back the deletes.
///
/// Expected: Err with status 422, and the delete of A already applied
#[tokio::test]
async fn save_batch_stops_at_first_failure() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_list_endpoint(
            &farm_path("species-preferences"),
            vec![factory::mock_preference("pA", "speciesId", "A", 0)],
            1,
        )
        .with_no_content_endpoint("DELETE", &farm_path("species-preferences/pA"), 1)
        .with_error_endpoint("POST", &farm_path("species-preferences"), 422, 1)
        .build()
        .await;

    let service = SpeciesPreferenceService::for_farm(client_for(&test)?, TEST_FARM_ID)?;
    let result = service
        .save_batch(&["X".to_string(), "Y".to_string()])
        .await;

    assert_eq!(result.unwrap_err().status(), Some(422));
    test.assert_mocks();

    Ok(())
}
