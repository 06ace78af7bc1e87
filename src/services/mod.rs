pub mod comment_service;
pub mod comment_tree;
pub mod like_service;
pub mod profile_service;
pub mod thread_view;
