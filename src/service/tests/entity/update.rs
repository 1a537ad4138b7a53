use serde_json::json;

use crate::{error::ErrorKind, model::animal::UpdateAnimalDto};

use super::*;

/// Expect the known version to be sent and the record with its new version returned
#[tokio::test]
async fn sends_version_and_returns_updated_record() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("PATCH", "/api/v1/farms/farm-0001/animals/a1")
                .match_body(Matcher::PartialJson(json!({"version": 1, "name": "Rosette"})))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({"success": true, "data": factory::mock_animal("a1", 2)}).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await;

    let dto = UpdateAnimalDto {
        version: 1,
        name: Some("Rosette".to_string()),
        ..Default::default()
    };
    let animal = animal_service(&test)?.update("a1", &dto).await?;

    assert_eq!(animal.version, 2);
    test.assert_mocks();

    Ok(())
}

/// Expect a stale version to fail with a conflict distinct from other errors
#[tokio::test]
async fn stale_version_is_conflict() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("PATCH", &farm_path("animals/a1"), 409, 1)
        .build()
        .await;

    let dto = UpdateAnimalDto {
        version: 1,
        ..Default::default()
    };
    let err = animal_service(&test)?.update("a1", &dto).await.unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!err.is_not_found());
    test.assert_mocks();

    Ok(())
}
