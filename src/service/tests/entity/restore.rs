use super::*;

/// Expect a deleted record to come back with `deleted_at` cleared and a higher version
#[tokio::test]
async fn restores_soft_deleted_record() -> Result<(), Error> {
    let mut restored = factory::mock_breed("b1");
    restored["version"] = serde_json::json!(3);

    let test = TestBuilder::new()
        .with_record_endpoint("DELETE", &api_path("breeds/b1"), factory::mock_deleted_breed("b1", 2), 1)
        .with_record_endpoint("POST", &api_path("breeds/b1/restore"), restored, 1)
        .build()
        .await;

    let service = breed_service(&test)?;
    service.delete("b1").await?;
    let breed = service.restore("b1").await?;

    assert!(breed.deleted_at.is_none());
    assert!(breed.version > 2);
    test.assert_mocks();

    Ok(())
}

/// Expect Err when restoring an unknown record
#[tokio::test]
async fn unknown_record_fails() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("POST", &farm_path("animals/nope/restore"), 404, 1)
        .build()
        .await;

    let result = animal_service(&test)?.restore("nope").await;

    assert!(result.unwrap_err().is_not_found());
    test.assert_mocks();

    Ok(())
}
