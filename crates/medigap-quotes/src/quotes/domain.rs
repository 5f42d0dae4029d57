use serde::{Deserialize, Deserializer, Serialize};

/// Medicare-supplement eligibility floor. Pricing requests and ranking always
/// use `max(requested_age, 65)`.
pub const MINIMUM_ELIGIBILITY_AGE: u8 = 65;

/// Shopper gender as the upstream rater encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Closed plan-letter variant. Constructed once at the normalization boundary
/// so nothing downstream re-folds case on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    G,
    N,
}

impl PlanType {
    /// Case-insensitive parse of a raw plan-letter code. Anything other than
    /// G or N is not a supported supplement plan and yields `None`.
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "G" => Some(PlanType::G),
            "N" => Some(PlanType::N),
            _ => None,
        }
    }

    pub const fn letter(self) -> &'static str {
        match self {
            PlanType::G => "G",
            PlanType::N => "N",
        }
    }
}

/// Which price field drives sorting and display. Threaded explicitly into the
/// ranker rather than living as ambient toggle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceView {
    #[default]
    Standard,
    Discount,
}

impl PriceView {
    pub fn price_of(self, plan: &Plan) -> f64 {
        match self {
            PriceView::Standard => plan.price,
            PriceView::Discount => plan.price_discount,
        }
    }
}

/// One rater response per carrier. `quotes` may span plan letters and
/// demographic buckets; irrelevant rows are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCarrierQuoteResponse {
    pub naic: String,
    pub company_name: String,
    #[serde(default)]
    pub quotes: Vec<RawQuote>,
}

/// A single rate line as the rater returns it: integer cents, `0|1` tobacco
/// flag, free-form plan letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    pub rate: u32,
    #[serde(default)]
    pub discount_rate: u32,
    #[serde(default)]
    pub discount_category: Option<String>,
    pub age: u8,
    pub gender: Gender,
    pub plan: String,
    #[serde(deserialize_with = "flag_from_int", serialize_with = "flag_to_int")]
    pub tobacco: bool,
}

fn flag_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    Ok(value != 0)
}

fn flag_to_int<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

/// One row of a plan's canonical coverage table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageItem {
    pub name: String,
    pub percentage_covered: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Normalized, display-ready plan. Prices are decimal dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub price: f64,
    pub price_discount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_category: Option<String>,
    pub age: u8,
    pub gender: Gender,
    pub naic: String,
    pub name: String,
    pub image: String,
    pub plan_type: PlanType,
    pub state: String,
    pub tobacco: bool,
    pub coverage_summary: Vec<CoverageItem>,
}

/// Final engine output: independently ranked and capped buckets. An empty
/// bucket is a valid "no plans available" state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plans {
    pub plan_g: Vec<Plan>,
    pub plan_n: Vec<Plan>,
}

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.plan_g.is_empty() && self.plan_n.is_empty()
    }

    pub fn total(&self) -> usize {
        self.plan_g.len() + self.plan_n.len()
    }
}

/// Everything the shopper told us that pricing and eligibility depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperContext {
    pub state: String,
    pub county: String,
    pub zip_code: String,
    pub age: u8,
    pub gender: Gender,
    pub tobacco: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_carrier: Option<String>,
}

impl ShopperContext {
    /// Age actually used for pricing and ranking, clamped to the eligibility
    /// floor before any request is built.
    pub fn effective_age(&self) -> u8 {
        self.age.max(MINIMUM_ELIGIBILITY_AGE)
    }
}

/// Organization-level carrier restrictions. Absence of settings means every
/// carrier is considered contracted (fail-open while settings load).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSettings {
    #[serde(default)]
    pub carrier_contracts: Vec<String>,
}

impl OrgSettings {
    /// Contract match is case-sensitive but ignores whitespace on both sides.
    pub fn is_contracted(&self, carrier_name: &str) -> bool {
        let wanted = strip_whitespace(carrier_name);
        self.carrier_contracts
            .iter()
            .any(|contract| strip_whitespace(contract) == wanted)
    }
}

pub(crate) fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Wire envelope for the org-settings endpoint. A `success=false` response is
/// treated as settings being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSettingsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub org_settings: Option<OrgSettings>,
}

impl OrgSettingsEnvelope {
    pub fn into_settings(self) -> Option<OrgSettings> {
        if self.success {
            self.org_settings
        } else {
            None
        }
    }
}
