//! Billing DTOs
//!
//! Field names are camelCase; the Portuguese names used by existing clients
//! are accepted as aliases.

use chrono::{DateTime, NaiveDate, Utc};
use domain_billing::{BillingRecord, BillingRecordRequest, ListFilterRequest};
use serde::{Deserialize, Serialize};

/// New charge, from a JSON body or a query string; missing fields read as empty
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecordInput {
    #[serde(default, alias = "dataVencimento")]
    pub due_date: Option<String>,
    #[serde(default, alias = "cpf")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "valorCobranca", alias = "valorcobranca")]
    pub amount: Option<String>,
}

impl From<BillingRecordInput> for BillingRecordRequest {
    fn from(input: BillingRecordInput) -> Self {
        BillingRecordRequest::new(
            input.due_date.unwrap_or_default(),
            input.tax_id.unwrap_or_default(),
            input.amount.unwrap_or_default(),
        )
    }
}

/// Echo of an accepted charge with the id it was stored under
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecordAccepted {
    pub id: String,
    pub due_date: String,
    pub tax_id: String,
    pub amount: String,
}

impl BillingRecordAccepted {
    pub fn new(record: &BillingRecord, request: BillingRecordRequest) -> Self {
        Self {
            id: record.id.to_string(),
            due_date: request.due_date,
            tax_id: request.tax_id,
            amount: request.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecordResponse {
    pub id: String,
    pub due_date: NaiveDate,
    pub tax_id: String,
    /// pt-BR amount without currency symbol, e.g. `1.234,56`
    pub amount: String,
    pub month_ref: String,
    pub created_at: DateTime<Utc>,
}

impl From<BillingRecord> for BillingRecordResponse {
    fn from(record: BillingRecord) -> Self {
        Self {
            id: record.id.to_string(),
            month_ref: record.month_reference().to_string(),
            due_date: record.due_date,
            tax_id: record.customer_tax_id.as_str().to_string(),
            amount: record.amount.to_string(),
            created_at: record.created_at,
        }
    }
}

/// `GET /api/cobrancas?cpf=&mesref=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBillingRecordsQuery {
    #[serde(default, alias = "cpf")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "mesref", alias = "mesRef")]
    pub month_ref: Option<String>,
}

impl From<ListBillingRecordsQuery> for ListFilterRequest {
    fn from(query: ListBillingRecordsQuery) -> Self {
        ListFilterRequest::new(query.tax_id, query.month_ref)
    }
}

/// `GET /api/cobrancas/periodo?inicio=&fim=&cpf=`; dates are `YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    #[serde(default, alias = "inicio")]
    pub start: Option<String>,
    #[serde(default, alias = "fim")]
    pub end: Option<String>,
    #[serde(default, alias = "cpf")]
    pub tax_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_accepts_portuguese_names() {
        let input: BillingRecordInput = serde_json::from_str(
            r#"{"dataVencimento": "24/08/2022", "cpf": "50974463051", "valorCobranca": "R$150,00"}"#,
        )
        .unwrap();
        let request = BillingRecordRequest::from(input);

        assert_eq!(request.due_date, "24/08/2022");
        assert_eq!(request.tax_id, "50974463051");
        assert_eq!(request.amount, "R$150,00");
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let input: BillingRecordInput = serde_json::from_str(r#"{"taxId": null}"#).unwrap();
        assert_eq!(BillingRecordRequest::from(input), BillingRecordRequest::default());
    }
}
