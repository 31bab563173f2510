//! Post service behavior tests, run against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use ripple_core::domain::Owner;
use ripple_core::error::PostError;
use ripple_core::ports::{
    CommentDocument, LikeDocument, PostDocument, PostStore, StoreError,
};
use ripple_core::{PostRepository, PostService};

use super::InMemoryPostStore;

fn service() -> PostService {
    PostService::new(PostRepository::new(Arc::new(InMemoryPostStore::new())))
}

fn owner(name: &str) -> Owner {
    Owner {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        surname: "Doe".to_owned(),
        avatar: None,
    }
}

#[tokio::test]
async fn create_then_get_post() {
    let service = service();
    let alice = owner("alice");

    let created = service
        .create_post(alice.clone(), "first!".to_owned())
        .await
        .unwrap();

    let fetched = service.get_post_by_id(created.id).await.unwrap();
    assert_eq!(fetched.body, "first!");
    assert_eq!(fetched.owner, alice);
    assert!(fetched.comments.is_empty());
    assert!(fetched.likes.is_empty());
}

#[tokio::test]
async fn get_missing_post_fails_not_found() {
    let service = service();
    let missing = Uuid::new_v4();

    let err = service.get_post_by_id(missing).await.unwrap_err();
    assert!(matches!(err, PostError::PostNotFound(id) if id == missing));
}

/// A store whose writes never take effect. Used to pin down the
/// "wrote nothing is a failure, not a not-found" contract.
struct LostWriteStore;

#[async_trait]
impl PostStore for LostWriteStore {
    async fn insert(&self, _post: PostDocument) -> Result<Option<PostDocument>, StoreError> {
        Ok(None)
    }
    async fn fetch_all(&self) -> Result<Vec<PostDocument>, StoreError> {
        Ok(Vec::new())
    }
    async fn fetch_by_id(&self, _id: Uuid) -> Result<Option<PostDocument>, StoreError> {
        Ok(None)
    }
    async fn delete_by_id(&self, _id: Uuid) -> Result<(), StoreError> {
        Ok(())
    }
    async fn append_comment(
        &self,
        _post_id: Uuid,
        _comment: CommentDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        Ok(None)
    }
    async fn fetch_comment(
        &self,
        _post_id: Uuid,
        _comment_id: Uuid,
    ) -> Result<Option<CommentDocument>, StoreError> {
        Ok(None)
    }
    async fn remove_comment(&self, _post_id: Uuid, _comment_id: Uuid) -> Result<(), StoreError> {
        Ok(())
    }
    async fn append_like(
        &self,
        _post_id: Uuid,
        _like: LikeDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        Ok(None)
    }
    async fn fetch_like_by_owner(
        &self,
        _post_id: Uuid,
        _owner_id: Uuid,
    ) -> Result<Option<LikeDocument>, StoreError> {
        Ok(None)
    }
    async fn remove_like_by_owner(
        &self,
        _post_id: Uuid,
        _owner_id: Uuid,
    ) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn lost_insert_is_a_storage_failure() {
    let service = PostService::new(PostRepository::new(Arc::new(LostWriteStore)));

    let err = service
        .create_post(owner("alice"), "never lands".to_owned())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::Storage { .. }));
}

#[tokio::test]
async fn delete_post_is_ownership_gated() {
    let service = service();
    let alice = owner("alice");
    let mallory = owner("mallory");

    let post = service
        .create_post(alice.clone(), "mine".to_owned())
        .await
        .unwrap();

    let err = service.delete_post(post.id, mallory.id).await.unwrap_err();
    assert!(matches!(err, PostError::NotPostOwner));
    // Unchanged in storage.
    assert!(service.get_post_by_id(post.id).await.is_ok());

    service.delete_post(post.id, alice.id).await.unwrap();
    let err = service.get_post_by_id(post.id).await.unwrap_err();
    assert!(matches!(err, PostError::PostNotFound(_)));
}

#[tokio::test]
async fn deleting_a_missing_post_is_not_silent() {
    let service = service();

    let err = service
        .delete_post(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::PostNotFound(_)));
}

#[tokio::test]
async fn comment_append_is_monotonic() {
    let service = service();
    let alice = owner("alice");
    let bob = owner("bob");

    let post = service
        .create_post(alice, "thread".to_owned())
        .await
        .unwrap();

    let mut seen = Vec::new();
    for i in 0..4 {
        let updated = service
            .create_post_comment(post.id, format!("comment {i}"), bob.clone())
            .await
            .unwrap();

        assert_eq!(updated.comments.len(), i + 1);
        // Previously appended comments are still present, ids unchanged.
        for id in &seen {
            assert!(updated.comments.iter().any(|c| c.comment.id == *id));
        }
        seen.push(updated.comments.last().unwrap().comment.id);
    }
}

#[tokio::test]
async fn comment_author_owns_the_comment_not_the_post() {
    let service = service();
    let alice = owner("alice");
    let bob = owner("bob");

    let post = service
        .create_post(alice, "hello".to_owned())
        .await
        .unwrap();

    let updated = service
        .create_post_comment(post.id, "hi".to_owned(), bob.clone())
        .await
        .unwrap();

    assert_eq!(updated.comments.len(), 1);
    let comment = &updated.comments[0];
    assert_eq!(comment.comment.body, "hi");
    assert_eq!(comment.comment.owner.id, bob.id);
    // Projected for Bob: he wrote the comment but does not own the post.
    assert!(comment.user_is_owner);
    assert!(!updated.user_is_owner);
}

#[tokio::test]
async fn comment_absence_splits_by_post_existence() {
    let service = service();
    let alice = owner("alice");

    // Invalid post id surfaces as PostNotFound...
    let err = service
        .get_post_comment(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::PostNotFound(_)));

    // ...while a missing comment in a valid post is absence, not an error.
    let post = service.create_post(alice, "empty".to_owned()).await.unwrap();
    let found = service
        .get_post_comment(post.id, Uuid::new_v4())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn delete_comment_is_ownership_gated() {
    let service = service();
    let alice = owner("alice");
    let bob = owner("bob");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "thread".to_owned())
        .await
        .unwrap();
    let updated = service
        .create_post_comment(post.id, "mine".to_owned(), bob.clone())
        .await
        .unwrap();
    let comment_id = updated.comments[0].comment.id;

    let err = service
        .delete_post_comment(post.id, comment_id, carol.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::NotCommentOwner));

    let updated = service
        .delete_post_comment(post.id, comment_id, bob.id)
        .await
        .unwrap();
    assert!(updated.comments.is_empty());
}

#[tokio::test]
async fn delete_missing_comment_fails_comment_not_found() {
    let service = service();
    let alice = owner("alice");

    let post = service.create_post(alice, "bare".to_owned()).await.unwrap();

    let err = service
        .delete_post_comment(post.id, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::CommentNotFound { .. }));
}

#[tokio::test]
async fn dislike_without_like_is_rejected_and_changes_nothing() {
    let service = service();
    let alice = owner("alice");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "unliked".to_owned())
        .await
        .unwrap();

    let err = service.dislike_post(post.id, carol.id).await.unwrap_err();
    assert!(matches!(err, PostError::NotLiked));

    let fetched = service.get_post_by_id(post.id).await.unwrap();
    assert!(fetched.likes.is_empty());
}

#[tokio::test]
async fn like_then_dislike_roundtrip() {
    let service = service();
    let alice = owner("alice");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "likeable".to_owned())
        .await
        .unwrap();

    let updated = service.like_post(post.id, carol.clone()).await.unwrap();
    assert!(updated.user_has_liked);
    assert_eq!(updated.likes.len(), 1);
    assert_eq!(updated.likes[0].owner.id, carol.id);

    service.dislike_post(post.id, carol.id).await.unwrap();
    let fetched = service.get_post_by_id(post.id).await.unwrap();
    assert!(fetched.likes.is_empty());

    // A second dislike finds nothing to remove.
    let err = service.dislike_post(post.id, carol.id).await.unwrap_err();
    assert!(matches!(err, PostError::NotLiked));
}

#[tokio::test]
async fn check_then_like_keeps_likes_unique() {
    let service = service();
    let alice = owner("alice");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "popular".to_owned())
        .await
        .unwrap();

    // The discipline callers are expected to follow: look the like up first,
    // only append when absent.
    for _ in 0..3 {
        let existing = service
            .get_post_like_by_owner(post.id, carol.id)
            .await
            .unwrap();
        if existing.is_none() {
            service.like_post(post.id, carol.clone()).await.unwrap();
        }
    }

    let fetched = service.get_post_by_id(post.id).await.unwrap();
    assert_eq!(fetched.likes.len(), 1);
}

#[tokio::test]
async fn like_post_itself_does_not_deduplicate() {
    let service = service();
    let alice = owner("alice");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "popular".to_owned())
        .await
        .unwrap();

    // Without the check-then-like guard the append really is unconditional;
    // uniqueness is the caller's responsibility.
    service.like_post(post.id, carol.clone()).await.unwrap();
    let updated = service.like_post(post.id, carol.clone()).await.unwrap();
    assert_eq!(updated.likes.len(), 2);
}

#[tokio::test]
async fn get_post_like_collapses_absence_cases() {
    let service = service();

    // No prior post-existence check on this path: a missing post reads the
    // same as a missing like.
    let found = service
        .get_post_like_by_owner(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn concurrent_comments_are_both_kept() {
    let service = service();
    let alice = owner("alice");
    let bob = owner("bob");
    let carol = owner("carol");

    let post = service
        .create_post(alice, "race me".to_owned())
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        service.create_post_comment(post.id, "from bob".to_owned(), bob.clone()),
        service.create_post_comment(post.id, "from carol".to_owned(), carol.clone()),
    );
    a.unwrap();
    b.unwrap();

    let fetched = service.get_post_by_id(post.id).await.unwrap();
    assert_eq!(fetched.comments.len(), 2);
    assert!(fetched.comments.iter().any(|c| c.owner.id == bob.id));
    assert!(fetched.comments.iter().any(|c| c.owner.id == carol.id));
}

#[tokio::test]
async fn extended_reads_annotate_for_the_viewer() {
    let service = service();
    let alice = owner("alice");
    let bob = owner("bob");

    let mine = service
        .create_post(alice.clone(), "mine".to_owned())
        .await
        .unwrap();
    let theirs = service
        .create_post(bob.clone(), "theirs".to_owned())
        .await
        .unwrap();
    service.like_post(theirs.id, alice.clone()).await.unwrap();

    let single = service.get_post_extended(theirs.id, alice.id).await.unwrap();
    assert!(!single.user_is_owner);
    assert!(single.user_has_liked);

    let listed = service.list_posts_extended(alice.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    let mine_listed = listed.iter().find(|p| p.id == mine.id).unwrap();
    assert!(mine_listed.user_is_owner);
    assert!(!mine_listed.user_has_liked);
}
