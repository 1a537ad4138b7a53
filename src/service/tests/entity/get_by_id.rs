use super::*;

/// Expect Some with the record when it exists
#[tokio::test]
async fn returns_existing_record() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_record_endpoint("GET", &farm_path("animals/a1"), factory::mock_animal("a1", 2), 1)
        .build()
        .await;

    let animal = animal_service(&test)?.get_by_id("a1").await?;

    let animal = animal.unwrap();
    assert_eq!(animal.id, "a1");
    assert_eq!(animal.version, 2);
    test.assert_mocks();

    Ok(())
}

/// Expect None rather than an error for an unknown ID
#[tokio::test]
async fn missing_record_is_none() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("GET", &farm_path("animals/missing-id"), 404, 1)
        .build()
        .await;

    let animal = animal_service(&test)?.get_by_id("missing-id").await?;

    assert!(animal.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect Err for failures other than 404
#[tokio::test]
async fn propagates_unauthorized() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_json_endpoint(
            "GET",
            &api_path("breeds/b1"),
            401,
            serde_json::json!({"statusCode": 401, "message": "Unauthorized"}),
            1,
        )
        .build()
        .await;

    let result = breed_service(&test)?.get_by_id("b1").await;

    assert_eq!(
        result.unwrap_err().kind(),
        crate::error::ErrorKind::Unauthorized
    );
    test.assert_mocks();

    Ok(())
}

/// Expect IDs to be escaped so they cannot address another endpoint
#[tokio::test]
async fn escapes_opaque_ids() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_record_endpoint("GET", &api_path("breeds/a%2Frestore"), factory::mock_breed("a/restore"), 1)
        .with_record_endpoint("GET", &api_path("breeds/a/restore"), factory::mock_breed("other"), 0)
        .build()
        .await;

    let breed = breed_service(&test)?.get_by_id("a/restore").await?;

    assert_eq!(breed.map(|breed| breed.id), Some("a/restore".to_string()));
    test.assert_mocks();

    Ok(())
}
