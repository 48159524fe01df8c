pub mod backend;
pub mod traits;

pub use backend::{FallbackChatClient, HttpChatBackend, Reply, ReplySource};
pub use traits::ChatBackend;
