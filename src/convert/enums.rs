//! Closed-set literal converters.
//!
//! Each table below is the complete list of literals the client accepts for
//! that kind; anything else fails with `Unknown <kind> '<value>'`.

use super::ApiConverter;
use crate::error::ConversionError;
use crate::model::{PropertyType, UserType};
use crate::types::Color;
use std::fmt;

macro_rules! literal_converter {
    (
        $(#[$meta:meta])*
        $converter:ident: $model:ident, $kind:literal {
            $($literal:literal => $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $converter;

        impl $converter {
            pub fn from_literal(value: &str) -> Result<$model, ConversionError> {
                match value {
                    $($literal => Ok($model::$variant),)+
                    other => Err(ConversionError::unknown_variant($kind, other)),
                }
            }

            pub fn literal(model: &$model) -> &'static str {
                match model {
                    $($model::$variant => $literal,)+
                }
            }
        }

        impl ApiConverter for $converter {
            type Api = String;
            type Model = $model;

            const TARGET: &'static str = stringify!($model);

            fn api_to_model(api: &String) -> Result<$model, ConversionError> {
                Self::from_literal(api)
            }

            fn model_to_api(model: &$model) -> Result<String, ConversionError> {
                Ok(Self::literal(model).to_string())
            }
        }

        impl std::str::FromStr for $model {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $converter::from_literal(s)
            }
        }

        impl fmt::Display for $model {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($converter::literal(self))
            }
        }
    };
}

literal_converter! {
    /// `"person"` / `"bot"`.
    UserTypeConverter: UserType, "user type" {
        "person" => Person,
        "bot" => Bot,
    }
}

literal_converter! {
    PropertyTypeConverter: PropertyType, "property type" {
        "title" => Title,
        "rich_text" => RichText,
        "number" => Number,
        "select" => Select,
        "multi_select" => MultiSelect,
        "status" => Status,
        "date" => Date,
        "people" => People,
        "files" => Files,
        "checkbox" => Checkbox,
        "url" => Url,
        "email" => Email,
        "phone_number" => PhoneNumber,
        "formula" => Formula,
        "relation" => Relation,
        "rollup" => Rollup,
        "created_time" => CreatedTime,
        "created_by" => CreatedBy,
        "last_edited_time" => LastEditedTime,
        "last_edited_by" => LastEditedBy,
        "unique_id" => UniqueId,
    }
}

literal_converter! {
    ColorConverter: Color, "color" {
        "default" => Default,
        "gray" => Gray,
        "brown" => Brown,
        "orange" => Orange,
        "yellow" => Yellow,
        "green" => Green,
        "blue" => Blue,
        "purple" => Purple,
        "pink" => Pink,
        "red" => Red,
        "gray_background" => GrayBackground,
        "brown_background" => BrownBackground,
        "orange_background" => OrangeBackground,
        "yellow_background" => YellowBackground,
        "green_background" => GreenBackground,
        "blue_background" => BlueBackground,
        "purple_background" => PurpleBackground,
        "pink_background" => PinkBackground,
        "red_background" => RedBackground,
    }
}
