pub mod comments;
pub mod events;
