//! Interactive download approval.

use std::sync::Arc;

use async_trait::async_trait;
use shareprobe_export::{ApprovalPolicy, ApprovalRequest};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::presentation::format_size;
use crate::utils::input::prompt_confirmation;

/// Blocking question asker; stdin in production.
type Ask = dyn Fn(&str) -> anyhow::Result<bool> + Send + Sync;

/// Asks on the terminal before every download.
///
/// Prompts are serialized so parallel tables never interleave questions.
/// Cancellation declines immediately, even while a prompt waits for input.
pub struct InteractiveApproval {
    prompt_lock: Mutex<()>,
    cancel: CancellationToken,
    ask: Arc<Ask>,
}

impl InteractiveApproval {
    pub fn new(cancel: CancellationToken) -> Self {
        Self::with_asker(cancel, prompt_confirmation)
    }

    fn with_asker(
        cancel: CancellationToken,
        ask: impl Fn(&str) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            prompt_lock: Mutex::new(()),
            cancel,
            ask: Arc::new(ask),
        }
    }
}

/// Question shown for one planned download.
pub fn approval_prompt(request: &ApprovalRequest<'_>) -> String {
    format!(
        "Download {} ({}) to {}?",
        request.table,
        format_size(request.size),
        request.destination.display()
    )
}

#[async_trait]
impl ApprovalPolicy for InteractiveApproval {
    async fn approve(&self, request: &ApprovalRequest<'_>) -> bool {
        let _guard = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return false,
            guard = self.prompt_lock.lock() => guard,
        };

        let prompt = approval_prompt(request);
        let ask = Arc::clone(&self.ask);
        let answer = tokio::task::spawn_blocking(move || ask(&prompt));

        // The blocking read cannot be interrupted; it is abandoned on cancel
        // and the runtime shutdown in `main` does not wait for it.
        let joined = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                tracing::debug!(table = %request.table, "Prompt abandoned on cancel");
                return false;
            }
            joined = answer => joined,
        };

        match joined {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                tracing::warn!(
                    table = %request.table,
                    error = %e,
                    "Could not read confirmation; declining"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    table = %request.table,
                    error = %e,
                    "Confirmation prompt failed; declining"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shareprobe_core::TableDescriptor;
    use std::path::Path;
    use std::sync::mpsc;
    use std::time::Duration;

    fn orders() -> TableDescriptor {
        TableDescriptor::new("sales", "tables", "orders")
    }

    #[test]
    fn prompt_names_table_size_and_destination() {
        let table = orders();
        let request = ApprovalRequest {
            table: &table,
            destination: Path::new("data/raw/sales/tables/orders_1.parquet"),
            size: Some(2048),
        };

        assert_eq!(
            approval_prompt(&request),
            "Download sales.tables.orders (2.00 KB) to data/raw/sales/tables/orders_1.parquet?"
        );
    }

    #[tokio::test]
    async fn answer_is_passed_through() {
        let approval = InteractiveApproval::with_asker(CancellationToken::new(), |prompt| {
            Ok(prompt.contains("orders"))
        });
        let table = orders();
        let request = ApprovalRequest {
            table: &table,
            destination: Path::new("out/orders.parquet"),
            size: None,
        };

        assert!(approval.approve(&request).await);
    }

    #[tokio::test]
    async fn cancel_during_open_prompt_declines_promptly() {
        // The asker blocks until the sender is dropped, like an unanswered stdin read
        let (release, blocked) = mpsc::channel::<()>();
        let blocked = std::sync::Mutex::new(blocked);
        let cancel = CancellationToken::new();
        let approval = InteractiveApproval::with_asker(cancel.clone(), move |_| {
            let _ = blocked.lock().unwrap().recv();
            Ok(true)
        });

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let table = orders();
        let request = ApprovalRequest {
            table: &table,
            destination: Path::new("out/orders.parquet"),
            size: Some(1),
        };
        let answer = tokio::time::timeout(Duration::from_secs(5), approval.approve(&request))
            .await
            .expect("approval must not wait for the blocked prompt");

        assert!(!answer);
        drop(release);
    }

    #[tokio::test]
    async fn cancelled_before_prompt_never_asks() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let approval = InteractiveApproval::with_asker(cancel, |_| {
            panic!("must not prompt after cancellation")
        });
        let table = orders();
        let request = ApprovalRequest {
            table: &table,
            destination: Path::new("out/orders.parquet"),
            size: None,
        };

        assert!(!approval.approve(&request).await);
    }
}
