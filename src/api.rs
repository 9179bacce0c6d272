//! Payload shapes of the remote analytics endpoint.
//!
//! The endpoint takes a period and answers with models, each broken down by
//! month, dealer and user. Only the shapes live here; transport is someone
//! else's job.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SalesError};
use crate::models::SaleRecord;

const API_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_api_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), API_DATE_FORMAT)
        .map_err(|_| SalesError::InvalidDate(s.to_string()))
}

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < begin {
            return Err(SalesError::InvalidPeriod {
                begin: format_api_date(begin),
                end: format_api_date(end),
            });
        }
        Ok(Self { begin, end })
    }

    pub fn parse(begin: &str, end: &str) -> Result<Self> {
        Self::new(parse_api_date(begin)?, parse_api_date(end)?)
    }

    pub fn to_request(self) -> PeriodRequest {
        PeriodRequest {
            begin_date: format_api_date(self.begin),
            end_date: format_api_date(self.end),
        }
    }
}

/// POST body: `{ "begin_date": "DD.MM.YYYY", "end_date": "DD.MM.YYYY" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    pub begin_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiModel {
    pub model_id: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub filter_by_month: Vec<ApiMonth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMonth {
    #[serde(default)]
    pub month: String, // "YYYY-MM"
    #[serde(default)]
    pub dealers: Vec<ApiDealer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDealer {
    pub dealer_id: String,
    #[serde(default)]
    pub dealer_name: String,
    #[serde(default)]
    pub user_list: Vec<ApiUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    /// Unit count. Usually a numeric string, occasionally a bare number.
    #[serde(deserialize_with = "contract_as_string")]
    pub contract: String,
}

fn contract_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn parse_contract(model: &ApiModel, dealer: &ApiDealer, user: &ApiUser) -> Result<i64> {
    let raw = user.contract.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n);
    }
    // Fractional counts ("2.0", 2.5) truncate toward zero
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f.trunc() as i64),
        _ => Err(SalesError::InvalidUnits {
            model_id: model.model_id.clone(),
            dealer_id: dealer.dealer_id.clone(),
            user_id: user.user_id.clone(),
            value: user.contract.clone(),
        }),
    }
}

/// Flatten the nested response into one record per user entry.
/// With `month` set, other months are skipped.
pub fn flatten(models: &[ApiModel], month: Option<&str>) -> Result<Vec<SaleRecord>> {
    let mut records = Vec::new();
    for model in models {
        for m in &model.filter_by_month {
            if month.is_some_and(|wanted| wanted != m.month) {
                continue;
            }
            for dealer in &m.dealers {
                for user in &dealer.user_list {
                    records.push(SaleRecord {
                        model_id: model.model_id.clone(),
                        dealer_id: dealer.dealer_id.clone(),
                        salesperson_id: user.user_id.clone(),
                        model_name: model.model_name.clone(),
                        dealer_name: dealer.dealer_name.clone(),
                        salesperson_name: user.user_name.clone(),
                        units: parse_contract(model, dealer, user)?,
                    });
                }
            }
        }
    }
    Ok(records)
}
