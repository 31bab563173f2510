//! Viewer projection - pure post-processing of an already-fetched post.
//!
//! Rather than threading "and also tell me whether viewer V owns/liked this"
//! through every store call, the aggregate is fetched plain and annotated
//! here. A [`ProjectedPost`] cannot be built without all three annotations,
//! so a partially-annotated post is unrepresentable.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Like, Owner, Post};

/// A post annotated relative to the viewing user.
#[derive(Debug, Clone)]
pub struct ProjectedPost {
    pub id: Uuid,
    pub body: String,
    pub owner: Owner,
    pub comments: Vec<ProjectedComment>,
    pub likes: Vec<Like>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Does the viewer own this post?
    pub user_is_owner: bool,
    /// Has the viewer liked this post?
    pub user_has_liked: bool,
}

/// A comment annotated relative to the viewing user.
#[derive(Debug, Clone)]
pub struct ProjectedComment {
    pub comment: Comment,
    /// Does the viewer own this comment?
    pub user_is_owner: bool,
}

/// Whether `viewer_id` owns the post.
pub fn user_is_owner(post: &Post, viewer_id: Uuid) -> bool {
    post.owner.id == viewer_id
}

/// Whether `viewer_id` has liked the post.
pub fn user_has_liked(post: &Post, viewer_id: Uuid) -> bool {
    post.likes.iter().any(|like| like.owner.id == viewer_id)
}

/// Annotate each comment with whether the viewer wrote it.
pub fn project_comments(comments: Vec<Comment>, viewer_id: Uuid) -> Vec<ProjectedComment> {
    comments
        .into_iter()
        .map(|comment| {
            let user_is_owner = comment.owner.id == viewer_id;
            ProjectedComment {
                comment,
                user_is_owner,
            }
        })
        .collect()
}

/// Apply all three annotations: post ownership, like status, per-comment
/// ownership. The annotations touch disjoint fields, so their order has no
/// observable effect.
pub fn project(post: Post, viewer_id: Uuid) -> ProjectedPost {
    let is_owner = user_is_owner(&post, viewer_id);
    let has_liked = user_has_liked(&post, viewer_id);

    ProjectedPost {
        id: post.id,
        body: post.body,
        owner: post.owner,
        comments: project_comments(post.comments, viewer_id),
        likes: post.likes,
        created_at: post.created_at,
        updated_at: post.updated_at,
        user_is_owner: is_owner,
        user_has_liked: has_liked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(name: &str) -> Owner {
        Owner {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            surname: "Doe".to_owned(),
            avatar: None,
        }
    }

    #[test]
    fn owner_sees_their_own_post() {
        let alice = owner("alice");
        let post = Post::new(alice.clone(), "mine".to_owned());

        let projected = project(post, alice.id);
        assert!(projected.user_is_owner);
        assert!(!projected.user_has_liked);
    }

    #[test]
    fn commenter_owns_the_comment_but_not_the_post() {
        let alice = owner("alice");
        let bob = owner("bob");

        let mut post = Post::new(alice, "hello".to_owned());
        post.comments.push(Comment::new(bob.clone(), "hi".to_owned()));

        let projected = project(post, bob.id);
        assert!(!projected.user_is_owner);
        assert_eq!(projected.comments.len(), 1);
        assert!(projected.comments[0].user_is_owner);
    }

    #[test]
    fn like_by_viewer_sets_user_has_liked() {
        let alice = owner("alice");
        let carol = owner("carol");

        let mut post = Post::new(alice, "likeable".to_owned());
        post.likes.push(Like::new(carol.clone()));

        assert!(project(post.clone(), carol.id).user_has_liked);

        let stranger = Uuid::new_v4();
        assert!(!project(post, stranger).user_has_liked);
    }

    #[test]
    fn every_comment_is_annotated() {
        let alice = owner("alice");
        let bob = owner("bob");

        let mut post = Post::new(alice.clone(), "busy thread".to_owned());
        for i in 0..5 {
            let author = if i % 2 == 0 { alice.clone() } else { bob.clone() };
            post.comments.push(Comment::new(author, format!("comment {i}")));
        }

        let projected = project(post, alice.id);
        assert_eq!(projected.comments.len(), 5);
        for (i, c) in projected.comments.iter().enumerate() {
            assert_eq!(c.user_is_owner, i % 2 == 0);
        }
    }
}
