//! Renders resolved resource content as embeds.
//!
//! Content is either a plain string, which becomes the description, a list
//! of strings, which become description lines, or a record shaped like this:
//!
//! ```json
//! {
//!     "title": "Getting Started",
//!     "description": "...",
//!     "fields": [{ "name": "...", "value": "...", "inline": true }],
//!     "footer": "..."
//! }
//! ```

use hoshi_l10n::ResourceValue;
use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::Colour;

use super::truncate;

// discord embed limits
const TITLE_LEN: usize = 256;
const DESCRIPTION_LEN: usize = 4096;
const FIELD_NAME_LEN: usize = 256;
const FIELD_VALUE_LEN: usize = 1024;
const FOOTER_LEN: usize = 2048;
const MAX_FIELDS: usize = 25;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmbedContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedContent {
    /// Interprets a resource value as embed content.
    ///
    /// Returns [`None`] for values that can't be displayed or would produce an
    /// empty embed.
    #[must_use]
    pub fn from_value(value: &ResourceValue) -> Option<Self> {
        let content = match value {
            ResourceValue::String(text) => Self {
                description: Some(text.clone()),
                ..Self::default()
            },
            ResourceValue::List(lines) => {
                let lines: Vec<&str> = lines.iter().filter_map(ResourceValue::as_str).collect();
                Self {
                    description: Some(lines.join("\n")),
                    ..Self::default()
                }
            },
            ResourceValue::Record(_) => Self::from_record(value),
            ResourceValue::Bool(_) | ResourceValue::Number(_) => return None,
        };

        (!content.is_empty()).then_some(content)
    }

    fn from_record(value: &ResourceValue) -> Self {
        let text = |name: &str| value.str_field(name).filter(|s| !s.is_empty()).map(str::to_owned);

        let fields = value
            .field("fields")
            .and_then(ResourceValue::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|field| {
                let text = |name: &str| field.str_field(name).filter(|s| !s.is_empty());
                Some(EmbedField {
                    name: text("name")?.to_owned(),
                    value: text("value")?.to_owned(),
                    inline: matches!(field.field("inline"), Some(ResourceValue::Bool(true))),
                })
            })
            .collect();

        Self {
            title: text("title"),
            description: text("description"),
            fields,
            footer: text("footer"),
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.as_deref().is_none_or(str::is_empty)
            && self.fields.is_empty()
            && self.footer.is_none()
    }

    /// Builds the embed, truncating every part to Discord's limits.
    pub fn into_embed(self, color: Colour) -> CreateEmbed {
        let mut embed = CreateEmbed::new().color(color);

        if let Some(title) = &self.title {
            embed = embed.title(truncate(title, TITLE_LEN));
        }

        if let Some(description) = &self.description {
            embed = embed.description(truncate(description, DESCRIPTION_LEN));
        }

        for field in self.fields.iter().take(MAX_FIELDS) {
            embed = embed.field(
                truncate(&field.name, FIELD_NAME_LEN),
                truncate(&field.value, FIELD_VALUE_LEN),
                field.inline,
            );
        }

        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(truncate(footer, FOOTER_LEN)));
        }

        embed
    }
}
