use serde::{Deserialize, Deserializer, Serialize};

/// Trade category sent as `trade_type` on analysis requests.
///
/// Only outright sales are analysed for now; the backend also knows `B1`
/// (jeonse) but the urgent-sales screen never asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TradeType {
    #[default]
    Sale,
}

impl TradeType {
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Sale => "A1",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "a1" | "sale" => Some(Self::Sale),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "매매",
        }
    }
}

/// A complex returned by the keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One listed unit inside an analysis payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub article_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub article_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub building_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub floor_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deal_or_warrant_prc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area_group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub article_confirm_ymd: String,
    #[serde(deserialize_with = "null_as_default")]
    pub realtor_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub article_feature_desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_list: Vec<String>,
    #[serde(rename = "price_num")]
    pub price_num: Option<f64>,
}

/// A sale flagged as priced below its area's baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BargainRecord {
    #[serde(flatten)]
    pub sale: SaleRecord,
    #[serde(default)]
    pub discount_pct: Option<f64>,
}

/// Mean price per area, in units of 10,000 KRW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanPriceRow {
    #[serde(rename = "areaName")]
    pub area_name: String,
    pub price_num: f64,
}

/// Number of listings per area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCountRow {
    #[serde(rename = "areaName")]
    pub area_name: String,
    pub count: u64,
}

/// Full analysis payload for one complex. The backend leaves `all_sales`
/// out entirely when a complex has no listings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub all_sales: Vec<SaleRecord>,
    pub mean_prices: Vec<MeanPriceRow>,
    pub count_by_area: Vec<AreaCountRow>,
    pub bargains: Vec<BargainRecord>,
}

/// Client-side "view by area" selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AreaFilter {
    #[default]
    ShowAll,
    Group(String),
}

impl AreaFilter {
    pub const SHOW_ALL_LABEL: &'static str = "전체 보기";

    pub fn label(&self) -> &str {
        match self {
            Self::ShowAll => Self::SHOW_ALL_LABEL,
            Self::Group(group) => group,
        }
    }

    pub fn matches(&self, area_group: &str) -> bool {
        match self {
            Self::ShowAll => true,
            Self::Group(group) => group == area_group,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(number) => number.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
