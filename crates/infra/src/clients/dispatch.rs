//! Client for the message dispatch service.

use launchtrack_core::CollaboratorError;
use launchtrack_followup::{DeliveryReceipt, MessageDispatcher, MessageDraft};

use crate::dto::{SendMessageRequestDto, SendReceiptDto};
use crate::http::ApiClient;

/// REST client for the delivery channel (WhatsApp-style gateway).
#[derive(Debug, Clone)]
pub struct HttpDispatchClient {
    api: ApiClient,
}

impl HttpDispatchClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl MessageDispatcher for HttpDispatchClient {
    async fn dispatch(&self, draft: &MessageDraft) -> Result<DeliveryReceipt, CollaboratorError> {
        let receipt: SendReceiptDto = self
            .api
            .post_json(
                "/whatsapp/send",
                &SendMessageRequestDto {
                    phone: &draft.recipient_phone,
                    message: &draft.text,
                },
            )
            .await?;
        Ok(receipt.into())
    }
}
