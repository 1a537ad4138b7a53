pub mod builder;
pub mod constant;
pub mod context;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::{api_path, farm_path, TestContext};

pub mod prelude {
    pub use crate::{
        constant::{TEST_FARM_ID, TEST_TIMESTAMP},
        fixtures::factory,
        api_path, farm_path, TestBuilder, TestContext,
    };
    pub use mockito::Matcher;
}
