/// Business logic layer for the content service
///
/// - Post service: post creation, retrieval, owner-scoped updates
/// - Vote service: vote normalization and the transactional ledger apply
/// - Feed service: cursor pagination and per-viewer enrichment
pub mod feed;
pub mod posts;
pub mod votes;

// Re-export commonly used services
pub use feed::FeedService;
pub use posts::PostService;
pub use votes::{VoteReceipt, VoteService};
