/// Database access layer
///
/// Repositories speak `sqlx::Error`; the service layer maps storage errors
/// into the application taxonomy. Nothing here caches rows across calls -
/// the persisted row set is always the source of truth.
pub mod post_repo;
pub mod vote_repo;

pub use post_repo::PostRepository;
pub use vote_repo::{VoteApply, VoteRepository};
