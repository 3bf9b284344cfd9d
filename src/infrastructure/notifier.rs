use crate::domain::ports::Notifier;
use crate::domain::receipt::Receipt;
use async_trait::async_trait;
use tracing::info;

/// Stand-in mailer: records each dispatch as a log event and nothing else.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn dispatch(&self, address: &str, receipt: &Receipt) {
        info!(%address, photo_id = %receipt.photo_id, "email sent");
    }
}
