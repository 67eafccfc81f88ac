// tests/support/mocks/util.rs
use account_core::application::{
    ApplicationResult, error::ApplicationError, ports::util::UniqueTokenGenerator,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Yields `refresh-1`, `refresh-2`, ... in call order.
#[derive(Default)]
pub struct SequentialTokenGenerator {
    next: AtomicUsize,
    fail: AtomicBool,
}

impl SequentialTokenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let generator = Self::default();
        generator.fail.store(true, Ordering::SeqCst);
        generator
    }

    pub fn issued(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UniqueTokenGenerator for SequentialTokenGenerator {
    async fn generate(&self) -> ApplicationResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("entropy source unavailable"));
        }
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("refresh-{n}"))
    }
}
