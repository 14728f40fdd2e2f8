//! Client-facing message table, keyed by locale, resource, and message kind.

use std::collections::HashMap;

use storefront_infra::Locale;

/// The resource a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Product,
    Purchase,
    User,
    Post,
    Auth,
}

impl Resource {
    pub const CRUD: [Resource; 4] = [Self::Product, Self::Purchase, Self::User, Self::Post];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Purchase => "purchase",
            Self::User => "user",
            Self::Post => "post",
            Self::Auth => "auth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    InvalidId,
    InvalidBody,
    CreateFailed,
    ListFailed,
    GetFailed,
    UpdateFailed,
    DeleteFailed,
    Deleted,
    Unauthorized,
    InvalidCredentials,
}

/// Localized messages. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: Locale,
    entries: HashMap<(Locale, Resource, MessageKey), String>,
}

impl MessageCatalog {
    /// Built-in tables for every locale, answering in `locale`.
    pub fn new(locale: Locale) -> Self {
        let mut entries = HashMap::new();
        for resource in Resource::CRUD {
            for (key, ja, en) in CRUD {
                entries.insert((Locale::Ja, resource, key), ja.replace("{n}", noun_ja(resource)));
                entries.insert((Locale::En, resource, key), en.replace("{n}", resource.as_str()));
            }
        }
        for (key, ja, en) in AUTH {
            entries.insert((Locale::Ja, Resource::Auth, key), ja.to_string());
            entries.insert((Locale::En, Resource::Auth, key), en.to_string());
        }
        Self { locale, entries }
    }

    /// Message in the configured locale, falling back to Japanese.
    pub fn text(&self, resource: Resource, key: MessageKey) -> &str {
        self.entries
            .get(&(self.locale, resource, key))
            .or_else(|| self.entries.get(&(Locale::Ja, resource, key)))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn noun_ja(resource: Resource) -> &'static str {
    match resource {
        Resource::Product => "商品",
        Resource::Purchase => "購入",
        Resource::User => "ユーザー",
        Resource::Post => "投稿",
        Resource::Auth => "認証",
    }
}

/// Per-resource templates; `{n}` is the resource noun.
const CRUD: [(MessageKey, &str, &str); 8] = [
    (MessageKey::InvalidId, "{n}IDが無効です。", "Invalid {n} ID."),
    (
        MessageKey::InvalidBody,
        "{n}のデータの形式が正しくありません。",
        "The {n} data is not in the expected format.",
    ),
    (
        MessageKey::CreateFailed,
        "データベースに{n}を保存できませんでした。",
        "Could not save the {n} to the database.",
    ),
    (MessageKey::ListFailed, "{n}のリストの取得に失敗しました。", "Failed to fetch the {n} list."),
    (MessageKey::GetFailed, "{n}の情報を取得できませんでした。", "Could not retrieve the {n}."),
    (MessageKey::UpdateFailed, "{n}の更新に失敗しました。", "Failed to update the {n}."),
    (MessageKey::DeleteFailed, "{n}の削除に失敗しました。", "Failed to delete the {n}."),
    (MessageKey::Deleted, "{n}は正常に削除されました。", "The {n} was deleted successfully."),
];

const AUTH: [(MessageKey, &str, &str); 5] = [
    (
        MessageKey::InvalidBody,
        "入力データの形式が正しくありません。",
        "The request data is not in the expected format.",
    ),
    (
        MessageKey::CreateFailed,
        "ユーザー登録に失敗しました。",
        "Registration failed.",
    ),
    (
        MessageKey::GetFailed,
        "ユーザー情報を取得できませんでした。",
        "Could not retrieve the user.",
    ),
    (
        MessageKey::Unauthorized,
        "認証が必要です。",
        "Authentication required.",
    ),
    (
        MessageKey::InvalidCredentials,
        "メールアドレスまたはパスワードが正しくありません。",
        "Incorrect email address or password.",
    ),
];
