use super::{parse_id, required, ApiConverter, UserTypeConverter};
use crate::api::responses::{ApiBot, ApiBotOwner, ApiObjectRef, ApiPerson, ApiUser};
use crate::error::ConversionError;
use crate::model::{Bot, BotOwner, Person, User, UserReference, UserType};

const USER_OBJECT: &str = "user";

/// Full user objects, as returned by `GET /users/{id}`.
pub struct UserConverter;

impl ApiConverter for UserConverter {
    type Api = ApiUser;
    type Model = User;

    const TARGET: &'static str = "User";

    fn api_to_model(api: &ApiUser) -> Result<User, ConversionError> {
        let id = parse_id(Self::TARGET, &api.id)?;
        let tag = required(Self::TARGET, "type", &api.user_type)?;
        let user_type = UserTypeConverter::from_literal(tag)?;

        match user_type {
            UserType::Person => {
                if api.bot.is_some() {
                    return Err(tag_mismatch(tag, "bot"));
                }
                let person = api.person.as_ref().map(person_from_api).unwrap_or_default();
                Ok(User::new_person(
                    id,
                    api.name.clone(),
                    api.avatar_url.clone(),
                    person,
                ))
            }
            UserType::Bot => {
                if api.person.is_some() {
                    return Err(tag_mismatch(tag, "person"));
                }
                let bot = api
                    .bot
                    .as_ref()
                    .map(bot_from_api)
                    .transpose()?
                    .unwrap_or_default();
                Ok(User::new_bot(id, api.name.clone(), api.avatar_url.clone(), bot))
            }
        }
    }

    fn model_to_api(model: &User) -> Result<ApiUser, ConversionError> {
        Ok(ApiUser {
            object: Some(USER_OBJECT.to_string()),
            id: model.id().to_dashed(),
            user_type: Some(UserTypeConverter::literal(&model.user_type()).to_string()),
            name: model.name().map(str::to_string),
            avatar_url: model.avatar_url().map(str::to_string),
            person: model.person().map(|person| ApiPerson {
                email: person.email.clone(),
            }),
            bot: model.bot().map(bot_to_api),
        })
    }
}

/// Users embedded in other objects, which may be partial.
pub struct UserReferenceConverter;

impl ApiConverter for UserReferenceConverter {
    type Api = ApiUser;
    type Model = UserReference;

    const TARGET: &'static str = "UserReference";

    fn api_to_model(api: &ApiUser) -> Result<UserReference, ConversionError> {
        // A user without a type tag is the service's partial form; any
        // tagged user must convert fully (and strictly).
        if api.user_type.is_none() {
            return Ok(UserReference::Partial {
                id: parse_id(Self::TARGET, &api.id)?,
            });
        }
        UserConverter::api_to_model(api).map(UserReference::Full)
    }

    fn model_to_api(model: &UserReference) -> Result<ApiUser, ConversionError> {
        match model {
            UserReference::Partial { id } => Ok(ApiUser {
                object: Some(USER_OBJECT.to_string()),
                id: id.to_dashed(),
                user_type: None,
                name: None,
                avatar_url: None,
                person: None,
                bot: None,
            }),
            UserReference::Full(user) => UserConverter::model_to_api(user),
        }
    }
}

fn tag_mismatch(tag: &str, found: &str) -> ConversionError {
    ConversionError::TagMismatch {
        target: UserConverter::TARGET,
        tag: tag.to_string(),
        found: found.to_string(),
    }
}

fn person_from_api(api: &ApiPerson) -> Person {
    Person {
        email: api.email.clone(),
    }
}

fn bot_from_api(api: &ApiBot) -> Result<Bot, ConversionError> {
    Ok(Bot {
        owner: api.owner.as_ref().map(owner_from_api).transpose()?,
        workspace_name: api.workspace_name.clone(),
    })
}

fn owner_from_api(api: &ApiBotOwner) -> Result<BotOwner, ConversionError> {
    const TARGET: &str = "BotOwner";
    let tag = required(TARGET, "type", &api.owner_type)?;
    match tag.as_str() {
        "workspace" => Ok(BotOwner::Workspace),
        "user" => {
            let user = required(TARGET, "user", &api.user)?;
            Ok(BotOwner::User(parse_id(TARGET, &user.id)?))
        }
        other => Err(ConversionError::unknown_variant("bot owner type", other)),
    }
}

fn bot_to_api(bot: &Bot) -> ApiBot {
    ApiBot {
        owner: bot.owner.as_ref().map(|owner| match owner {
            BotOwner::Workspace => ApiBotOwner {
                owner_type: Some("workspace".to_string()),
                workspace: Some(true),
                user: None,
            },
            BotOwner::User(id) => ApiBotOwner {
                owner_type: Some("user".to_string()),
                workspace: None,
                user: Some(ApiObjectRef {
                    object: Some(USER_OBJECT.to_string()),
                    id: id.to_dashed(),
                }),
            },
        }),
        workspace_name: bot.workspace_name.clone(),
    }
}
