//! Profile Stats Use Case

use std::sync::Arc;

use crate::domain::repository::{ProfileCounts, ProfileRepository};
use crate::error::AuthResult;

pub struct ProfileStatsUseCase<P>
where
    P: ProfileRepository,
{
    profiles: Arc<P>,
}

impl<P> ProfileStatsUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    pub async fn execute(&self) -> AuthResult<ProfileCounts> {
        self.profiles.counts().await
    }
}
