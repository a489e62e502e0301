//! Message type returned by the queue service.

/// A single delivery received from the queue.
///
/// The receipt handle identifies this delivery (not the message itself)
/// and is required to delete it. If the message is not deleted before
/// the visibility timeout elapses, the queue redelivers it with a new
/// receipt handle.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// Queue-assigned message ID
    pub id: String,

    /// Opaque payload (usually a JSON bus envelope, but never assumed)
    pub body: String,

    /// Opaque token for acknowledging this delivery
    pub receipt_handle: String,
}

impl QueueMessage {
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        receipt_handle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            receipt_handle: receipt_handle.into(),
        }
    }
}
