//! Social features: the friend graph.

pub mod friends;

pub use friends::FriendGraph;
