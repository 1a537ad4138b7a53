use serde_json::json;

use crate::model::{
    animal::{AnimalSex, CreateAnimalDto},
    reference::CreateBreedDto,
};

use super::*;

/// Expect the DTO to be posted in camelCase and the created record returned
#[tokio::test]
async fn posts_dto_and_returns_record() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/api/v1/farms/farm-0001/animals")
                .match_body(Matcher::PartialJson(json!({
                    "sex": "female",
                    "visualId": "V-a9",
                    "breedId": "b1"
                })))
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body(json!({"success": true, "data": factory::mock_animal("a9", 1)}).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await;

    let dto = CreateAnimalDto {
        sex: AnimalSex::Female,
        eid: None,
        official_number: None,
        visual_id: Some("V-a9".to_string()),
        name: None,
        birth_date: None,
        species_id: None,
        breed_id: Some("b1".to_string()),
        mother_id: None,
        father_id: None,
        lot_id: None,
        notes: None,
    };
    let animal = animal_service(&test)?.create(&dto).await?;

    assert_eq!(animal.id, "a9");
    assert_eq!(animal.version, 1);
    test.assert_mocks();

    Ok(())
}

/// Expect validation failures to surface as errors
#[tokio::test]
async fn surfaces_validation_errors() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_error_endpoint("POST", &api_path("breeds"), 400, 1)
        .build()
        .await;

    let dto = CreateBreedDto {
        species_id: "sp-bovine".to_string(),
        name: String::new(),
        description: None,
    };
    let result = breed_service(&test)?.create(&dto).await;

    assert_eq!(
        result.unwrap_err().kind(),
        crate::error::ErrorKind::Validation
    );
    test.assert_mocks();

    Ok(())
}
