//! Integration tests: feeds, follows, and comment flows against a
//! real database.
//!
//! Coverage:
//! - Posts read back identically through every feed view
//! - Edit propagation with image preservation
//! - Follow/unfollow idempotence and the self-follow guard
//! - Personalized feed membership tracking follow edges
//! - Group deletion detaching (not deleting) posts
//! - Comment cascade on post deletion
//! - Page clamping over a real candidate set

mod common;

use common::{create_test_group, create_test_user, setup_test_db};

use blog_service::db::{comment_repo, follow_repo, group_repo, post_repo};
use blog_service::forms::PostForm;
use blog_service::media::MediaStore;
use blog_service::pagination::PAGE_SIZE;
use blog_service::services::{CommentService, FeedService, FollowService, PostService};

fn media_store() -> MediaStore {
    MediaStore::new(std::env::temp_dir().join("blog-service-tests"))
}

#[tokio::test]
async fn post_appears_identically_in_every_view() {
    let pool = setup_test_db().await.expect("db setup");
    let author = create_test_user(&pool, "author").await;
    let group = create_test_group(&pool, "east").await;

    let post = post_repo::create_post(
        &pool,
        author.id,
        "a post for every view",
        Some(group.id),
        Some("posts/some-image.png"),
    )
    .await
    .expect("create post");

    let feeds = FeedService::new(pool.clone());

    let global = feeds.global_feed(None).await.expect("global feed");
    let (_, group_page) = feeds.group_feed(&group.slug, None).await.expect("group feed");
    let author_feed = feeds
        .author_feed(&author.username, None, None)
        .await
        .expect("author feed");
    let detail = PostService::new(pool.clone(), media_store())
        .post_detail(&author.username, post.id)
        .await
        .expect("post detail");

    for view in [
        &global.items[0],
        &group_page.items[0],
        &author_feed.page.items[0],
        &detail.post,
    ] {
        assert_eq!(view.id, post.id);
        assert_eq!(view.text, "a post for every view");
        assert_eq!(view.author_id, author.id);
        assert_eq!(view.group_id, Some(group.id));
        assert_eq!(view.image.as_deref(), Some("posts/some-image.png"));
    }

    assert_eq!(author_feed.post_count, 1);
}

#[tokio::test]
async fn edit_propagates_and_preserves_image() {
    let pool = setup_test_db().await.expect("db setup");
    let author = create_test_user(&pool, "author").await;
    let group = create_test_group(&pool, "east").await;
    let new_group = create_test_group(&pool, "west").await;

    let post = post_repo::create_post(
        &pool,
        author.id,
        "original text",
        Some(group.id),
        Some("posts/original.png"),
    )
    .await
    .expect("create post");

    let service = PostService::new(pool.clone(), media_store());
    let form = PostForm {
        text: "edited text".to_string(),
        group_id: Some(new_group.id),
        image: None,
    };
    service.update_post(post.id, &form).await.expect("update");

    let feeds = FeedService::new(pool.clone());
    let global = feeds.global_feed(None).await.expect("global feed");
    assert_eq!(global.items[0].text, "edited text");
    assert_eq!(global.items[0].group_id, Some(new_group.id));
    // Unspecified image field preserves the stored value.
    assert_eq!(global.items[0].image.as_deref(), Some("posts/original.png"));

    let (_, new_group_page) = feeds
        .group_feed(&new_group.slug, None)
        .await
        .expect("new group feed");
    assert_eq!(new_group_page.total, 1);

    let (_, old_group_page) = feeds
        .group_feed(&group.slug, None)
        .await
        .expect("old group feed");
    assert_eq!(old_group_page.total, 0);
}

#[tokio::test]
async fn follow_subscribe_and_unsubscribe_are_idempotent() {
    let pool = setup_test_db().await.expect("db setup");
    let reader = create_test_user(&pool, "reader").await;
    let author = create_test_user(&pool, "author").await;

    let follows = FollowService::new(pool.clone());

    assert!(follows.subscribe(reader.id, author.id).await.expect("subscribe"));
    // Second subscribe leaves exactly one edge and no error.
    assert!(!follows.subscribe(reader.id, author.id).await.expect("re-subscribe"));
    assert_eq!(
        follow_repo::count_followers(&pool, author.id).await.expect("count"),
        1
    );

    assert!(follows.unsubscribe(reader.id, author.id).await.expect("unsubscribe"));
    assert!(!follows.unsubscribe(reader.id, author.id).await.expect("re-unsubscribe"));
    assert_eq!(
        follow_repo::count_followers(&pool, author.id).await.expect("count"),
        0
    );
}

#[tokio::test]
async fn self_follow_is_a_no_op() {
    let pool = setup_test_db().await.expect("db setup");
    let user = create_test_user(&pool, "narcissus").await;

    let follows = FollowService::new(pool.clone());
    assert!(!follows.subscribe(user.id, user.id).await.expect("subscribe"));
    assert_eq!(
        follow_repo::count_following(&pool, user.id).await.expect("count"),
        0
    );
}

#[tokio::test]
async fn personalized_feed_tracks_follow_edges() {
    let pool = setup_test_db().await.expect("db setup");
    let reader = create_test_user(&pool, "reader").await;
    let author = create_test_user(&pool, "author").await;
    let bystander = create_test_user(&pool, "bystander").await;

    let follows = FollowService::new(pool.clone());
    let feeds = FeedService::new(pool.clone());

    follows.subscribe(reader.id, author.id).await.expect("subscribe");

    let followed_post = post_repo::create_post(&pool, author.id, "from author", None, None)
        .await
        .expect("author post");
    post_repo::create_post(&pool, bystander.id, "from bystander", None, None)
        .await
        .expect("bystander post");

    let page = feeds.following_feed(reader.id, None).await.expect("feed");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, followed_post.id);

    follows.unsubscribe(reader.id, author.id).await.expect("unsubscribe");
    let page = feeds.following_feed(reader.id, None).await.expect("feed");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn deleting_a_group_detaches_posts() {
    let pool = setup_test_db().await.expect("db setup");
    let author = create_test_user(&pool, "author").await;
    let group = create_test_group(&pool, "doomed").await;

    let post = post_repo::create_post(&pool, author.id, "keep me", Some(group.id), None)
        .await
        .expect("create post");

    assert!(group_repo::delete_group(&pool, &group.slug).await.expect("delete group"));

    let global = FeedService::new(pool.clone())
        .global_feed(None)
        .await
        .expect("global feed");
    assert_eq!(global.items[0].id, post.id);
    assert_eq!(global.items[0].group_id, None);
}

#[tokio::test]
async fn comments_cascade_with_their_post() {
    let pool = setup_test_db().await.expect("db setup");
    let author = create_test_user(&pool, "author").await;
    let reader = create_test_user(&pool, "reader").await;

    let post = post_repo::create_post(&pool, author.id, "commented", None, None)
        .await
        .expect("create post");

    let comments = CommentService::new(pool.clone());
    let form = blog_service::forms::CommentForm {
        text: "hello".to_string(),
    };
    let comment = comments
        .add_comment(&author.username, post.id, reader.id, &form)
        .await
        .expect("add comment");
    assert_eq!(comment.text, "hello");
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author_id, reader.id);

    assert!(post_repo::delete_post(&pool, post.id).await.expect("delete post"));
    let remaining = comment_repo::list_comments_by_post(&pool, post.id)
        .await
        .expect("list comments");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn page_numbers_clamp_against_the_candidate_set() {
    let pool = setup_test_db().await.expect("db setup");
    let author = create_test_user(&pool, "prolific").await;

    for i in 0..25 {
        post_repo::create_post(&pool, author.id, &format!("post {}", i), None, None)
            .await
            .expect("create post");
    }

    let feeds = FeedService::new(pool.clone());

    let first = feeds.global_feed(None).await.expect("page 1");
    assert_eq!(first.number, 1);
    assert_eq!(first.items.len(), PAGE_SIZE as usize);
    assert_eq!(first.num_pages, 3);
    // Newest first.
    assert_eq!(first.items[0].text, "post 24");

    let clamped_high = feeds.global_feed(Some(99)).await.expect("page 99");
    assert_eq!(clamped_high.number, 3);
    assert_eq!(clamped_high.items.len(), 5);

    let clamped_low = feeds.global_feed(Some(0)).await.expect("page 0");
    assert_eq!(clamped_low.number, 1);
}
