//! Post domain service.
//!
//! The single place where "the repository says X" becomes "the caller gets
//! guarantee Y": absence turns into typed not-found errors exactly where the
//! contract requires existence (and nowhere else), ownership is enforced on
//! deletes, and store failures are rewrapped with the name of the operation
//! they interrupted.

use uuid::Uuid;

use crate::domain::{Comment, Like, Owner, Post};
use crate::error::PostError;
use crate::projection::{ProjectedPost, project};
use crate::repository::PostRepository;

/// Orchestrates repository calls and enforces the post aggregate's business
/// rules. Holds no state beyond the repository handle.
#[derive(Clone)]
pub struct PostService {
    repo: PostRepository,
}

impl PostService {
    pub fn new(repo: PostRepository) -> Self {
        Self { repo }
    }

    /// Fetch a post, failing with [`PostError::PostNotFound`] on absence.
    /// This is the one read of a post that is required to be total.
    pub async fn get_post_by_id(&self, id: Uuid) -> Result<Post, PostError> {
        self.repo
            .fetch_by_id(id)
            .await
            .map_err(|e| PostError::storage("get_post_by_id", e))?
            .ok_or(PostError::PostNotFound(id))
    }

    /// All posts, bare shape. The unauthenticated list carries no
    /// viewer-relative fields.
    pub async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.repo
            .fetch_all()
            .await
            .map_err(|e| PostError::storage("list_posts", e))
    }

    /// All posts, annotated for `viewer_id`.
    pub async fn list_posts_extended(
        &self,
        viewer_id: Uuid,
    ) -> Result<Vec<ProjectedPost>, PostError> {
        let posts = self.list_posts().await?;
        Ok(posts
            .into_iter()
            .map(|post| project(post, viewer_id))
            .collect())
    }

    /// Single post annotated for `viewer_id`.
    pub async fn get_post_extended(
        &self,
        id: Uuid,
        viewer_id: Uuid,
    ) -> Result<ProjectedPost, PostError> {
        let post = self.get_post_by_id(id).await?;
        Ok(project(post, viewer_id))
    }

    /// Create a new, empty post owned by `owner`.
    pub async fn create_post(&self, owner: Owner, body: String) -> Result<Post, PostError> {
        let post = Post::new(owner, body);
        let stored = self
            .repo
            .insert(post)
            .await
            .map_err(|e| PostError::storage("create_post", e))?;

        match stored {
            Some(post) => {
                tracing::debug!(post_id = %post.id, "Post created");
                Ok(post)
            }
            // The write did not take effect. A failure, never a not-found.
            None => Err(PostError::Storage {
                operation: "create_post",
                detail: "post was not persisted".to_owned(),
            }),
        }
    }

    /// Delete a post. Only its owner may do so; deleting a nonexistent post
    /// fails with [`PostError::PostNotFound`], never silently.
    pub async fn delete_post(&self, id: Uuid, requester_id: Uuid) -> Result<(), PostError> {
        let post = self.get_post_by_id(id).await?;

        if post.owner.id != requester_id {
            return Err(PostError::NotPostOwner);
        }

        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| PostError::storage("delete_post", e))?;

        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Fetch a single comment. An invalid post id surfaces as
    /// [`PostError::PostNotFound`]; a missing comment within a valid post is
    /// `Ok(None)`, not an error.
    pub async fn get_post_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, PostError> {
        self.get_post_by_id(post_id).await?;

        self.repo
            .fetch_comment(post_id, comment_id)
            .await
            .map_err(|e| PostError::storage("get_post_comment", e))
    }

    /// Append a comment authored by `owner` and return the updated post,
    /// annotated from the author's perspective.
    pub async fn create_post_comment(
        &self,
        post_id: Uuid,
        body: String,
        owner: Owner,
    ) -> Result<ProjectedPost, PostError> {
        self.get_post_by_id(post_id).await?;

        let viewer_id = owner.id;
        let comment = Comment::new(owner, body);

        let updated = self
            .repo
            .append_comment(post_id, comment)
            .await
            .map_err(|e| PostError::storage("create_post_comment", e))?
            // The post vanished between the existence check and the append.
            .ok_or(PostError::PostNotFound(post_id))?;

        tracing::debug!(post_id = %post_id, "Comment appended");
        Ok(project(updated, viewer_id))
    }

    /// Delete a comment. Only its owner may do so. Returns the updated post,
    /// annotated for the requester.
    pub async fn delete_post_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        requester_id: Uuid,
    ) -> Result<ProjectedPost, PostError> {
        let comment = self
            .get_post_comment(post_id, comment_id)
            .await?
            .ok_or(PostError::CommentNotFound {
                post_id,
                comment_id,
            })?;

        if comment.owner.id != requester_id {
            return Err(PostError::NotCommentOwner);
        }

        self.repo
            .remove_comment(post_id, comment_id)
            .await
            .map_err(|e| PostError::storage("delete_post_comment", e))?;

        tracing::debug!(post_id = %post_id, comment_id = %comment_id, "Comment removed");

        let updated = self.get_post_by_id(post_id).await?;
        Ok(project(updated, requester_id))
    }

    /// Append a like by `owner` and return the updated post, annotated for
    /// them. Performs no duplicate check itself: callers that need "one like
    /// per user" must check [`Self::get_post_like_by_owner`] first.
    pub async fn like_post(&self, post_id: Uuid, owner: Owner) -> Result<ProjectedPost, PostError> {
        self.get_post_by_id(post_id).await?;

        let viewer_id = owner.id;
        let like = Like::new(owner);

        let updated = self
            .repo
            .append_like(post_id, like)
            .await
            .map_err(|e| PostError::storage("like_post", e))?
            .ok_or(PostError::PostNotFound(post_id))?;

        tracing::debug!(post_id = %post_id, user_id = %viewer_id, "Post liked");
        Ok(project(updated, viewer_id))
    }

    /// Fetch the like belonging to `owner_id`, if any. Goes straight to the
    /// repository: "post absent" and "like absent" both come back as
    /// `Ok(None)` here.
    pub async fn get_post_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Like>, PostError> {
        self.repo
            .fetch_like_by_owner(post_id, owner_id)
            .await
            .map_err(|e| PostError::storage("get_post_like_by_owner", e))
    }

    /// Remove the like belonging to `like_owner_id`. A user must have liked
    /// the post to unlike it: if no such like exists among the fetched
    /// post's likes, fails with [`PostError::NotLiked`].
    pub async fn dislike_post(&self, post_id: Uuid, like_owner_id: Uuid) -> Result<(), PostError> {
        let post = self.get_post_by_id(post_id).await?;

        // Derived from the post already in hand, not a second round trip.
        let liked = post.likes.iter().any(|like| like.owner.id == like_owner_id);
        if !liked {
            return Err(PostError::NotLiked);
        }

        self.repo
            .remove_like_by_owner(post_id, like_owner_id)
            .await
            .map_err(|e| PostError::storage("dislike_post", e))?;

        tracing::debug!(post_id = %post_id, user_id = %like_owner_id, "Post disliked");
        Ok(())
    }
}
