use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors, require_present};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode, FromRow, Type};
use std::fmt;
use std::str::FromStr;

const TITLE: CharField = CharField::new("title", 50);

/// What the advertiser wants to do with the merchandise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BbKind {
    #[serde(rename = "b")]
    Buy,
    #[default]
    #[serde(rename = "s")]
    Sell,
    #[serde(rename = "e")]
    Exchange,
}

/// Choice groups as presented to users.
pub const KIND_GROUPS: &[(&str, &[BbKind])] = &[
    ("Buy-Sell", &[BbKind::Buy, BbKind::Sell]),
    ("Exchange", &[BbKind::Exchange]),
];

impl BbKind {
    /// Two-letter code stored in the `kind` column.
    pub fn code(self) -> &'static str {
        match self {
            BbKind::Buy => "b",
            BbKind::Sell => "s",
            BbKind::Exchange => "e",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BbKind::Buy => "buy",
            BbKind::Sell => "sell",
            BbKind::Exchange => "exchange",
        }
    }

    pub fn group(self) -> &'static str {
        KIND_GROUPS
            .iter()
            .find(|(_, kinds)| kinds.contains(&self))
            .map(|(group, _)| *group)
            .unwrap_or_default()
    }
}

impl fmt::Display for BbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ad kind `{0}`")]
pub struct ParseKindError(String);

impl FromStr for BbKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" | "buy" => Ok(BbKind::Buy),
            "s" | "sell" => Ok(BbKind::Sell),
            "e" | "exchange" => Ok(BbKind::Exchange),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

// Stored as its code in a varchar column.
impl<DB: Database> Type<DB> for BbKind
where
    String: Type<DB>,
{
    fn type_info() -> <DB as Database>::TypeInfo {
        <String as Type<DB>>::type_info()
    }

    fn compatible(ty: &<DB as Database>::TypeInfo) -> bool {
        <String as Type<DB>>::compatible(ty)
    }
}

impl<'r, DB: Database> Decode<'r, DB> for BbKind
where
    String: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<BbKind, BoxDynError> {
        let code = <String as Decode<'r, DB>>::decode(value)?;
        Ok(code.parse()?)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for BbKind
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, BoxDynError> {
        self.code().to_string().encode_by_ref(buf)
    }
}

/// A classified ad.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Bb {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub price: Option<f64>,
    pub published: DateTime<Utc>,
    pub rubric_id: Option<i32>,
    pub kind: Option<BbKind>,
}

impl Model for Bb {
    const TABLE: &'static str = "bbs";
    const MODEL_NAME: &'static str = "bb";
    const VERBOSE_NAME: &'static str = "Ad";
    const VERBOSE_NAME_PLURAL: &'static str = "Ads";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[
        ("title", "Merchandise"),
        ("content", "Description"),
        ("price", "Price"),
        ("published", "Published"),
        ("rubric", "Rubric"),
    ];
    const ORDERING: &'static str = "published DESC, id DESC";

    fn id(&self) -> i32 {
        self.id
    }
}

fn default_kind() -> Option<BbKind> {
    Some(BbKind::default())
}

/// Ad fields accepted on create and update. `published` is set by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBb {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rubric_id: Option<i32>,
    #[serde(default = "default_kind")]
    pub kind: Option<BbKind>,
}

impl NewBb {
    pub fn new(title: impl Into<String>, rubric_id: i32) -> Self {
        Self {
            title: title.into(),
            content: None,
            price: None,
            rubric_id: Some(rubric_id),
            kind: default_kind(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_kind(mut self, kind: BbKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl Validate for NewBb {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        TITLE.check(&self.title, errors);
        require_present("rubric", &self.rubric_id, errors);
        require_present("kind", &self.kind, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::BLANK_MESSAGE;

    #[test]
    fn kinds_are_grouped() {
        assert_eq!(BbKind::Buy.group(), "Buy-Sell");
        assert_eq!(BbKind::Sell.group(), "Buy-Sell");
        assert_eq!(BbKind::Exchange.group(), "Exchange");
    }

    #[test]
    fn kind_parses_from_code_or_label() {
        assert_eq!("e".parse::<BbKind>().unwrap(), BbKind::Exchange);
        assert_eq!("buy".parse::<BbKind>().unwrap(), BbKind::Buy);
        assert!("x".parse::<BbKind>().is_err());
    }

    #[test]
    fn kind_defaults_to_sell_when_omitted() {
        let bb: NewBb = serde_json::from_str(r#"{"title": "Bike", "rubric_id": 3}"#).unwrap();
        assert_eq!(bb.kind, Some(BbKind::Sell));
        assert!(bb.full_clean().is_ok());
    }

    #[test]
    fn kind_serializes_as_code() {
        let bb = NewBb::new("House", 1).with_kind(BbKind::Buy);
        let json = serde_json::to_value(&bb).unwrap();
        assert_eq!(json["kind"], "b");
    }

    #[test]
    fn rubric_is_required() {
        let bb: NewBb = serde_json::from_str(r#"{"title": "Car", "kind": null}"#).unwrap();
        let errors = bb.full_clean().unwrap_err();
        assert_eq!(errors.get("rubric"), [BLANK_MESSAGE]);
        assert_eq!(errors.get("kind"), [BLANK_MESSAGE]);
        assert!(!errors.has("title"));
    }
}
