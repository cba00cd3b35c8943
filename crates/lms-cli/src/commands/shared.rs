use std::future::Future;

use lms_client::{ActionExecutor, BackendResult};
use lms_core::ActionResult;

use crate::progress::Progress;

/// Run one remote call through its own executor with a spinner, turning a
/// rejection or transport failure into an error.
pub async fn remote<T, F, Fut>(message: &str, action: F) -> anyhow::Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = BackendResult<T>>,
{
    let executor = ActionExecutor::new();
    let spinner = Progress::spinner(message);

    match executor.execute(action).await {
        ActionResult::Ok(value) => {
            spinner.finish_clear();
            Ok(value)
        }
        ActionResult::Err(error) => {
            spinner.finish_err(&error);
            Err(anyhow::anyhow!(error))
        }
    }
}
