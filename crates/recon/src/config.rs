use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::header::normalize_header;
use crate::model::{CanonicalField, Ledger};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReconConfig {
    /// Cost applied to every row of a ledger that has no cost column.
    #[serde(default)]
    pub default_cost: f64,
    /// A row is kept when its status contains any of these keywords.
    #[serde(default = "default_status_keywords")]
    pub status_keywords: Vec<String>,
    #[serde(default)]
    pub ledgers: LedgerLabels,
    #[serde(default)]
    pub aliases: AliasDictionary,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            default_cost: 0.0,
            status_keywords: default_status_keywords(),
            ledgers: LedgerLabels::default(),
            aliases: AliasDictionary::default(),
        }
    }
}

fn default_status_keywords() -> Vec<String> {
    strings(&["交易成功", "已发货"])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Ledger labels
// ---------------------------------------------------------------------------

/// Display names used in errors, advisories and logs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerLabels {
    #[serde(default = "default_official_label")]
    pub official: String,
    #[serde(default = "default_service_label")]
    pub service: String,
}

impl Default for LedgerLabels {
    fn default() -> Self {
        Self {
            official: default_official_label(),
            service: default_service_label(),
        }
    }
}

fn default_official_label() -> String {
    "官方表".into()
}

fn default_service_label() -> String {
    "客服表".into()
}

impl LedgerLabels {
    pub fn label(&self, ledger: Ledger) -> &str {
        match ledger {
            Ledger::Official => &self.official,
            Ledger::Service => &self.service,
        }
    }
}

// ---------------------------------------------------------------------------
// Alias dictionary
// ---------------------------------------------------------------------------

/// Accepted header spellings per canonical field, highest priority first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AliasDictionary {
    #[serde(default = "default_order_no_aliases")]
    pub order_no: Vec<String>,
    #[serde(default = "default_status_aliases")]
    pub status: Vec<String>,
    #[serde(default = "default_product_name_aliases")]
    pub product_name: Vec<String>,
    #[serde(default = "default_revenue_aliases")]
    pub revenue: Vec<String>,
    #[serde(default = "default_cost_aliases")]
    pub cost: Vec<String>,
}

impl Default for AliasDictionary {
    fn default() -> Self {
        Self {
            order_no: default_order_no_aliases(),
            status: default_status_aliases(),
            product_name: default_product_name_aliases(),
            revenue: default_revenue_aliases(),
            cost: default_cost_aliases(),
        }
    }
}

fn default_order_no_aliases() -> Vec<String> {
    strings(&["快手订单编号", "订单号", "订单编号", "订单id", "订单ID", "交易单号", "订单流水号"])
}

fn default_status_aliases() -> Vec<String> {
    strings(&["订单状态", "状态", "交易状态", "发货状态"])
}

fn default_product_name_aliases() -> Vec<String> {
    strings(&["订单商品名称", "商品名称", "产品名称", "商品", "sku名称"])
}

fn default_revenue_aliases() -> Vec<String> {
    strings(&[
        "商家实收", "支付金额", "订单金额", "销售金额", "销售额", "应收金额", "实付金额", "金额",
    ])
}

fn default_cost_aliases() -> Vec<String> {
    strings(&["成本", "产品成本", "采购价", "采购成本", "货品成本"])
}

impl AliasDictionary {
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::OrderNo => &self.order_no,
            CanonicalField::Status => &self.status,
            CanonicalField::ProductName => &self.product_name,
            CanonicalField::Revenue => &self.revenue,
            CanonicalField::Cost => &self.cost,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !self.default_cost.is_finite() {
            return Err(ReconError::ConfigValidation(format!(
                "default_cost must be a finite number, got {}",
                self.default_cost
            )));
        }

        for field in CanonicalField::ALL {
            let aliases = self.aliases.aliases(field);
            if aliases.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "aliases.{field}: at least one alias is required"
                )));
            }
            // A blank alias would fuzzy-match every header.
            if let Some(pos) = aliases.iter().position(|a| normalize_header(a).is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "aliases.{field}[{pos}]: alias is blank"
                )));
            }
        }

        // A blank keyword is contained in every status.
        if let Some(pos) = self.status_keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(format!(
                "status_keywords[{pos}]: keyword is blank"
            )));
        }

        for ledger in [Ledger::Official, Ledger::Service] {
            if self.ledgers.label(ledger).trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "ledgers.{ledger}: label is blank"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
