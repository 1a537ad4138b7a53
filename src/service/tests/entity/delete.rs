use super::*;

/// Expect Ok when the record is deleted
#[tokio::test]
async fn deletes_record() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_no_content_endpoint("DELETE", &farm_path("animals/a1"), 1)
        .build()
        .await;

    animal_service(&test)?.delete("a1").await?;

    test.assert_mocks();

    Ok(())
}

/// Expect referential conflicts to propagate
#[tokio::test]
async fn propagates_conflict() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("DELETE", &api_path("breeds/b1"), 409, 1)
        .build()
        .await;

    let result = breed_service(&test)?.delete("b1").await;

    assert!(result.unwrap_err().is_conflict());
    test.assert_mocks();

    Ok(())
}
