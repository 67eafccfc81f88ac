// src/application/ports/util.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait UniqueTokenGenerator: Send + Sync {
    async fn generate(&self) -> ApplicationResult<String>;
}
