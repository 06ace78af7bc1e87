pub mod author;
pub mod comment;
pub mod like;
