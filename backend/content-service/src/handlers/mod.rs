/// HTTP request handlers for the content service
pub mod feed;
pub mod posts;
pub mod votes;

pub use feed::get_feed;
pub use posts::{create_post, delete_post, get_post, update_post};
pub use votes::vote_post;
