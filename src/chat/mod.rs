//! Chat transcript controller and its observer events

pub mod events;
pub mod transcript;

pub use events::{ChatEvent, ChatStatus};
pub use transcript::{Transcript, CHAT_ERROR_REPLY, VIDEO_GENERATING_REPLY, VIDEO_READY_REPLY};
