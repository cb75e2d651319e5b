//! Card records as returned by the squad builder `/cards/` endpoint.
//!
//! The API is loose about types: numeric fields occasionally arrive as strings and
//! list fields as `null`. Everything here deserializes leniently; fields that a ship
//! card cannot do without are checked when the pilot is built.

use serde::{Deserialize, Deserializer};
use variantly::Variantly;

use crate::error::{ErrorKind, IResult};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A number that the API may encode either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Reads the leading integer: optional whitespace, optional sign, then decimal
    /// digits. Anything after the digits is ignored and fractions truncate.
    pub fn parse_int(&self) -> IResult<i64> {
        match self {
            RawNumber::Int(v) => Ok(*v),
            RawNumber::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            RawNumber::Float(v) => Err(ErrorKind::InvalidInteger(v.to_string())),
            RawNumber::Text(text) => parse_leading_int(text),
        }
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber::Int(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

fn parse_leading_int(text: &str) -> IResult<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ErrorKind::InvalidInteger(text.to_string()));
    }

    let value: i64 = rest[..digits_len]
        .parse()
        .map_err(|_| ErrorKind::InvalidInteger(text.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// How the converter treats a card, decided by its `card_type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum CardKind {
    /// A pilot card; carries the ship it flies.
    Ship,
    Upgrade,
    Unknown(i64),
}

impl From<i64> for CardKind {
    fn from(card_type_id: i64) -> Self {
        match card_type_id {
            1 => CardKind::Ship,
            2 => CardKind::Upgrade,
            other => CardKind::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatistic {
    pub statistic_id: i64,
    pub value: RawNumber,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recurring: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAction {
    pub base_action_id: i64,
    #[serde(default)]
    pub related_action_id: Option<i64>,
    #[serde(default)]
    pub base_action_side_effect: Option<String>,
    #[serde(default)]
    pub related_action_side_effect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub id: i64,
    pub card_type_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_unique: bool,
    #[serde(default)]
    pub initiative: Option<i64>,
    #[serde(default)]
    pub cost: Option<RawNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ability_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default)]
    pub card_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_upgrades: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_actions: Vec<RawAction>,
    #[serde(default)]
    pub ship_type: Option<i64>,
    #[serde(default)]
    pub ship_size: Option<i64>,
    #[serde(default)]
    pub faction_id: Option<i64>,
    #[serde(default)]
    pub force_side: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Vec<RawStatistic>,
}

/// A card as listed by `/cards/`, before its type is known. Only ship cards are
/// decoded further, into [`RawCard`].
pub type CatalogCard = serde_json::Value;

#[derive(Deserialize)]
struct CardHeader {
    card_type_id: i64,
}

impl CardKind {
    /// Classifies a listed card by its `card_type_id` alone.
    pub fn of(card: &CatalogCard) -> IResult<CardKind> {
        let header = CardHeader::deserialize(card)?;
        Ok(CardKind::from(header.card_type_id))
    }
}

/// Body of the `/cards/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CardsDocument {
    pub cards: Vec<CatalogCard>,
}
