//! Game engine: the persisted character, progression rules, and the
//! presenters that render transient overlays for the narrative scripts.
//!
//! State lives in a thread-local [`session::NetRunner`] for the lifetime of
//! the page; the character record itself lives in localStorage.

pub mod character;
pub mod choice;
pub mod creation;
pub mod deferred;
pub mod dialogue;
pub mod markup;
pub mod notify;
pub mod popup;
pub mod progression;
pub mod quest;
pub mod reveal;
pub mod session;
pub mod status;
pub mod storage;
pub mod store;
pub mod surface;
pub mod terminal;
pub mod timer;
