//! Application command and query handlers, one per operation.

mod choose_manual;
mod end_session;
mod get_session;
mod reset_session;
mod send_message;
mod start_session;
mod upload_document;

pub use choose_manual::{
    ChooseManualEntryCommand, ChooseManualEntryError, ChooseManualEntryHandler,
    ChooseManualEntryResult,
};
pub use end_session::{EndSessionCommand, EndSessionError, EndSessionHandler};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery, GetSessionResult};
pub use reset_session::{
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
};
pub use start_session::{StartSessionError, StartSessionHandler, StartSessionResult};
pub use upload_document::{
    UploadDocumentCommand, UploadDocumentError, UploadDocumentHandler, UploadDocumentResult,
};
