use crate::application::{ApplicationResult, ports::util::UniqueTokenGenerator};
use async_trait::async_trait;
use uuid::Uuid;

/// Refresh-token values as random (v4) UUIDs.
#[derive(Default, Clone)]
pub struct UuidTokenGenerator;

#[async_trait]
impl UniqueTokenGenerator for UuidTokenGenerator {
    async fn generate(&self) -> ApplicationResult<String> {
        Ok(Uuid::new_v4().to_string())
    }
}
