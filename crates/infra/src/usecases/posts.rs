use async_trait::async_trait;
use chrono::Utc;

use storefront_auth::UserAccount;
use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};
use storefront_posts::{Post, PostInput};

use crate::store::RecordStore;

pub struct PostService<S, U> {
    posts: S,
    users: U,
}

impl<S, U> PostService<S, U>
where
    S: RecordStore<Post>,
    U: RecordStore<UserAccount>,
{
    pub fn new(posts: S, users: U) -> Self {
        Self { posts, users }
    }

    fn check(&self, input: &PostInput) -> DomainResult<()> {
        input.validate()?;
        self.users.get(input.user_id)?.ok_or(DomainError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl<S, U> CrudUsecase for PostService<S, U>
where
    S: RecordStore<Post>,
    U: RecordStore<UserAccount>,
{
    type Input = PostInput;
    type Entity = Post;

    async fn create(&self, input: PostInput) -> DomainResult<Post> {
        self.check(&input)?;
        let id = self.posts.next_id()?;
        let post = Post::new(id, input, Utc::now());
        self.posts.insert(id, post.clone())?;
        Ok(post)
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        Ok(self.posts.list()?)
    }

    async fn get_by_id(&self, id: RecordId) -> DomainResult<Post> {
        self.posts.get(id)?.ok_or(DomainError::NotFound)
    }

    async fn update(&self, id: RecordId, input: PostInput) -> DomainResult<Post> {
        let mut post = self.get_by_id(id).await?;
        self.check(&input)?;
        post.apply(input, Utc::now());
        self.posts
            .replace(id, post.clone())?
            .ok_or(DomainError::NotFound)?;
        Ok(post)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.posts.remove(id)?.ok_or(DomainError::NotFound)?;
        Ok(())
    }
}
