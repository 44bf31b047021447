use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckRepository: Send + Sync {
    fn ping(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait HealthService: Send + Sync {
    fn readiness(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}
