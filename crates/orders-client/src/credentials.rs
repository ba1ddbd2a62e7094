use async_trait::async_trait;
use orders_types::ports::credentials::{CredentialProvider, StoreError};

/// A fixed token, for scripts and tests that do not keep a session store.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential {
    token: Option<String>,
}

impl StaticCredential {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }
}

#[async_trait]
impl CredentialProvider for StaticCredential {
    async fn current(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.clone())
    }
}
