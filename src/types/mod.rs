//! # Types Module
//!
//! Host-side data this crate reads and writes. The host runtime owns these
//! records; the copilot pipeline only reads message text and identifiers and
//! creates cached answer records.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Incoming chat message (text + user/agent/room ids) |
//! | [`State`] | Composed conversation state, including recent messages |
//! | [`ConversationScope`] | Identifiers a cached answer is scoped to |
//! | [`MemoryRecord`] | Cached answer record in the host knowledge store |
//! | [`SearchOptions`] | Parameters of a similarity search |
//!
//! ## Example
//!
//! ```rust
//! use messari_copilot::types::{Message, State};
//! use uuid::Uuid;
//!
//! let room = Uuid::new_v4();
//! let user = Uuid::new_v4();
//! let agent = Uuid::new_v4();
//!
//! let state = State::new(vec![
//!     Message::new(user, agent, room, "what's TVL?"),
//!     Message::new(user, agent, room, "for which chain?"),
//! ]);
//! let current = Message::new(user, agent, room, "Arbitrum");
//! assert_eq!(state.recent_messages.len(), 2);
//! assert_eq!(current.text(), "Arbitrum");
//! ```

pub mod memory;
pub mod message;

pub use memory::{ConversationScope, MemoryContent, MemoryRecord, SearchOptions};
pub use message::{Content, Message, State};
