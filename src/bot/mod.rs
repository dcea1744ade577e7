//! # Bot Module
//!
//! Command dispatch, per-user in-flight tracking and the chat transport seam.
//! `telegram` is the one concrete transport; the dispatcher itself never sees
//! teloxide types.

pub mod dispatch;
pub mod guard;
pub mod telegram;
pub mod transport;
