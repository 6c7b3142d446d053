use crate::types::UserId;
use std::fmt;

/// The closed set of user kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    Person,
    Bot,
}

/// Person-specific details of a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub email: Option<String>,
}

/// Bot-specific details of a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bot {
    pub owner: Option<BotOwner>,
    pub workspace_name: Option<String>,
}

/// Who owns a bot integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotOwner {
    Workspace,
    User(UserId),
}

/// A Notion user.
///
/// The constructors guarantee that exactly one of [`User::person`] and
/// [`User::bot`] is present and that it matches [`User::user_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    user_type: UserType,
    name: Option<String>,
    avatar_url: Option<String>,
    person: Option<Person>,
    bot: Option<Bot>,
}

impl User {
    pub fn new_person(
        id: UserId,
        name: Option<String>,
        avatar_url: Option<String>,
        person: Person,
    ) -> Self {
        Self {
            id,
            user_type: UserType::Person,
            name,
            avatar_url,
            person: Some(person),
            bot: None,
        }
    }

    pub fn new_bot(id: UserId, name: Option<String>, avatar_url: Option<String>, bot: Bot) -> Self {
        Self {
            id,
            user_type: UserType::Bot,
            name,
            avatar_url,
            person: None,
            bot: Some(bot),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn person(&self) -> Option<&Person> {
        self.person.as_ref()
    }

    pub fn bot(&self) -> Option<&Bot> {
        self.bot.as_ref()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.person.as_ref().and_then(|p| p.email.as_ref())) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

/// A user as it appears inside another object (people properties, mentions,
/// `created_by`). The service often sends only `{"object": "user", "id": ...}`
/// there, which is not enough to build a full [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserReference {
    Partial { id: UserId },
    Full(User),
}

impl UserReference {
    pub fn id(&self) -> &UserId {
        match self {
            UserReference::Partial { id } => id,
            UserReference::Full(user) => user.id(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            UserReference::Partial { .. } => None,
            UserReference::Full(user) => Some(user),
        }
    }
}

impl From<User> for UserReference {
    fn from(user: User) -> Self {
        UserReference::Full(user)
    }
}
