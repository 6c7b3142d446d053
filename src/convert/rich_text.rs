use super::{
    parse_id, required, ApiConverter, ColorConverter, DateValueConverter, UserReferenceConverter,
};
use crate::api::responses::{
    ApiAnnotations, ApiEquation, ApiLink, ApiLinkPreview, ApiMention, ApiObjectRef, ApiRichText,
    ApiText,
};
use crate::error::ConversionError;
use crate::model::{Annotations, Link, Mention, RichText, RichTextContent};

pub struct RichTextConverter;

impl ApiConverter for RichTextConverter {
    type Api = ApiRichText;
    type Model = RichText;

    const TARGET: &'static str = "RichText";

    fn api_to_model(api: &ApiRichText) -> Result<RichText, ConversionError> {
        let tag = required(Self::TARGET, "type", &api.text_type)?;
        let content = match tag.as_str() {
            "text" => {
                let text = required(Self::TARGET, "text", &api.text)?;
                RichTextContent::Text {
                    content: text.content.clone(),
                    link: text.link.as_ref().map(|link| Link {
                        url: link.url.clone(),
                    }),
                }
            }
            "mention" => {
                let mention = required(Self::TARGET, "mention", &api.mention)?;
                RichTextContent::Mention(MentionConverter::api_to_model(mention)?)
            }
            "equation" => {
                let equation = required(Self::TARGET, "equation", &api.equation)?;
                RichTextContent::Equation {
                    expression: equation.expression.clone(),
                }
            }
            other => return Err(ConversionError::unknown_variant("rich text type", other)),
        };

        let annotations = match &api.annotations {
            Some(annotations) => annotations_from_api(annotations)?,
            None => Annotations::default(),
        };

        // Write payloads usually omit plain_text; fall back to what the run says.
        let plain_text = match &api.plain_text {
            Some(plain_text) => plain_text.clone(),
            None => match &content {
                RichTextContent::Text { content, .. } => content.clone(),
                RichTextContent::Equation { expression } => expression.clone(),
                RichTextContent::Mention(_) => String::new(),
            },
        };

        Ok(RichText {
            content,
            annotations,
            plain_text,
            href: api.href.clone(),
        })
    }

    fn model_to_api(model: &RichText) -> Result<ApiRichText, ConversionError> {
        let mut api = ApiRichText {
            text_type: None,
            text: None,
            mention: None,
            equation: None,
            annotations: Some(annotations_to_api(&model.annotations)),
            plain_text: Some(model.plain_text.clone()),
            href: model.href.clone(),
        };
        match &model.content {
            RichTextContent::Text { content, link } => {
                api.text_type = Some("text".to_string());
                api.text = Some(ApiText {
                    content: content.clone(),
                    link: link.as_ref().map(|link| ApiLink {
                        url: link.url.clone(),
                    }),
                });
            }
            RichTextContent::Mention(mention) => {
                api.text_type = Some("mention".to_string());
                api.mention = Some(MentionConverter::model_to_api(mention)?);
            }
            RichTextContent::Equation { expression } => {
                api.text_type = Some("equation".to_string());
                api.equation = Some(ApiEquation {
                    expression: expression.clone(),
                });
            }
        }
        Ok(api)
    }
}

pub struct MentionConverter;

impl ApiConverter for MentionConverter {
    type Api = ApiMention;
    type Model = Mention;

    const TARGET: &'static str = "Mention";

    fn api_to_model(api: &ApiMention) -> Result<Mention, ConversionError> {
        let tag = required(Self::TARGET, "type", &api.mention_type)?;
        match tag.as_str() {
            "user" => {
                let user = required(Self::TARGET, "user", &api.user)?;
                Ok(Mention::User(UserReferenceConverter::api_to_model(user)?))
            }
            "page" => {
                let page = required(Self::TARGET, "page", &api.page)?;
                Ok(Mention::Page(parse_id(Self::TARGET, &page.id)?))
            }
            "database" => {
                let database = required(Self::TARGET, "database", &api.database)?;
                Ok(Mention::Database(parse_id(Self::TARGET, &database.id)?))
            }
            "date" => {
                let date = required(Self::TARGET, "date", &api.date)?;
                Ok(Mention::Date(DateValueConverter::api_to_model(date)?))
            }
            "link_preview" => {
                let preview = required(Self::TARGET, "link_preview", &api.link_preview)?;
                Ok(Mention::LinkPreview {
                    url: preview.url.clone(),
                })
            }
            other => Err(ConversionError::unknown_variant("mention type", other)),
        }
    }

    fn model_to_api(model: &Mention) -> Result<ApiMention, ConversionError> {
        let mut api = ApiMention {
            mention_type: None,
            user: None,
            page: None,
            database: None,
            date: None,
            link_preview: None,
        };
        match model {
            Mention::User(user) => {
                api.mention_type = Some("user".to_string());
                api.user = Some(UserReferenceConverter::model_to_api(user)?);
            }
            Mention::Page(id) => {
                api.mention_type = Some("page".to_string());
                api.page = Some(ApiObjectRef {
                    object: None,
                    id: id.to_dashed(),
                });
            }
            Mention::Database(id) => {
                api.mention_type = Some("database".to_string());
                api.database = Some(ApiObjectRef {
                    object: None,
                    id: id.to_dashed(),
                });
            }
            Mention::Date(date) => {
                api.mention_type = Some("date".to_string());
                api.date = Some(DateValueConverter::model_to_api(date)?);
            }
            Mention::LinkPreview { url } => {
                api.mention_type = Some("link_preview".to_string());
                api.link_preview = Some(ApiLinkPreview { url: url.clone() });
            }
        }
        Ok(api)
    }
}

fn annotations_from_api(api: &ApiAnnotations) -> Result<Annotations, ConversionError> {
    Ok(Annotations {
        bold: api.bold,
        italic: api.italic,
        strikethrough: api.strikethrough,
        underline: api.underline,
        code: api.code,
        color: ColorConverter::from_literal(&api.color)?,
    })
}

fn annotations_to_api(annotations: &Annotations) -> ApiAnnotations {
    ApiAnnotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        color: ColorConverter::literal(&annotations.color).to_string(),
    }
}
