pub mod comment;
pub mod content_kind;
pub mod profile;
