/// Database access layer.
///
/// Free functions over `&PgPool`, one module per entity. Queries are
/// single atomic statements; cross-entity invariants (unique follow
/// pairs, cascade on post deletion, group detach) live in the schema.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;
