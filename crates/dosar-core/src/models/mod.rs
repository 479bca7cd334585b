pub mod attachment;
pub mod message;
pub mod session;

pub use attachment::{Attachment, AttachmentData, CaseFile};
pub use message::{ChatMessage, ChatRole};
pub use session::SessionId;
