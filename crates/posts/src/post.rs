use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

pub type PostUsecase = dyn CrudUsecase<Input = PostInput, Entity = Post>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostInput {
    pub user_id: RecordId,
    pub content: String,
}

impl PostInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.content.trim().is_empty() {
            return Err(DomainError::validation("post content must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: RecordId,
    pub user_id: RecordId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: RecordId, input: PostInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: input.user_id,
            content: input.content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: PostInput, now: DateTime<Utc>) {
        self.user_id = input.user_id;
        self.content = input.content;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input(content: &str) -> PostInput {
        PostInput {
            user_id: RecordId::new(7),
            content: content.to_string(),
        }
    }

    #[test]
    fn new_post_has_matching_timestamps() {
        let now = Utc::now();
        let post = Post::new(RecordId::new(1), input("hello"), now);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.user_id, RecordId::new(7));
    }

    #[test]
    fn apply_bumps_updated_at_only() {
        let now = Utc::now();
        let later = now + Duration::seconds(5);
        let mut post = Post::new(RecordId::new(1), input("hello"), now);
        post.apply(input("edited"), later);
        assert_eq!(post.content, "edited");
        assert_eq!(post.created_at, now);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn blank_content_is_invalid() {
        assert!(input(" \n").validate().is_err());
        assert!(input("hi").validate().is_ok());
    }
}
