use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::application::dto::imports::{ImportPreview, MortgageRow, OwnershipRow, PlotInfoRow};
use crate::application::errors::ServiceError;
use crate::domain::imports::{ImportType, RowError, row_number};
use crate::domain::mortgages::MortgageFields;
use crate::domain::owners::OwnerFields;
use crate::domain::ownerships::OwnershipFields;
use crate::domain::plot_info::PlotInfoFields;
use crate::domain::properties::PropertyFields;
use crate::domain::rules::{RuleResult, non_blank};

pub(crate) fn parse_row<T: DeserializeOwned>(row: &Value) -> Result<T, String> {
    serde_json::from_value(row.clone()).map_err(|e| format!("Invalid row: {e}"))
}

pub(crate) fn check_ownership_row(row: &OwnershipRow) -> RuleResult {
    non_blank(&row.property_address, "property_address")?;
    non_blank(&row.owner_name, "owner_name")?;
    ownership_fields(row, Uuid::nil(), Uuid::nil()).validate()
}

pub(crate) fn ownership_fields(row: &OwnershipRow, property_id: Uuid, owner_id: Uuid) -> OwnershipFields {
    OwnershipFields {
        property_id,
        owner_id,
        ownership_percentage: row.ownership_percentage,
        ownership_type: row.ownership_type,
        start_date: row.start_date,
        end_date: row.end_date,
        notes: row.notes.clone(),
    }
}

pub(crate) fn check_mortgage_row(row: &MortgageRow) -> RuleResult {
    non_blank(&row.property_address, "property_address")?;
    mortgage_fields(row, Uuid::nil()).validate()
}

pub(crate) fn mortgage_fields(row: &MortgageRow, property_id: Uuid) -> MortgageFields {
    MortgageFields {
        property_id,
        bank: row.bank.trim().to_string(),
        loan_amount: row.loan_amount,
        interest_rate: row.interest_rate,
        monthly_payment: row.monthly_payment,
        start_date: row.start_date,
        end_date: row.end_date,
        status: row.status,
        bank_account_id: None,
        linked_properties: Vec::new(),
        notes: row.notes.clone(),
    }
}

pub(crate) fn check_plot_info_row(row: &PlotInfoRow) -> RuleResult {
    non_blank(&row.property_address, "property_address")?;
    non_blank(&row.gush, "gush")?;
    non_blank(&row.chelka, "chelka")
}

pub(crate) fn plot_info_fields(row: &PlotInfoRow) -> PlotInfoFields {
    PlotInfoFields {
        gush: Some(row.gush.trim().to_string()),
        chelka: Some(row.chelka.trim().to_string()),
        sub_chelka: row.sub_chelka.clone(),
        registry_number: row.registry_number.clone(),
        registry_office: row.registry_office.clone(),
        notes: row.notes.clone(),
    }
}

/// Row-level message for a failed write. Internal failures stay opaque.
pub(crate) fn row_message(err: ServiceError) -> String {
    if let ServiceError::Internal(e) = &err {
        tracing::error!(error = ?e, "import_row_failed");
    }
    err.to_string()
}

/// Shape and rule checks that need no lookups.
fn check_row(import_type: ImportType, row: &Value) -> Result<(), String> {
    let checked = match import_type {
        ImportType::Properties => parse_row::<PropertyFields>(row)?.validate(),
        ImportType::Owners => parse_row::<OwnerFields>(row)?.validate(),
        ImportType::Ownerships => check_ownership_row(&parse_row::<OwnershipRow>(row)?),
        ImportType::Mortgages => check_mortgage_row(&parse_row::<MortgageRow>(row)?),
        ImportType::PlotInfo => check_plot_info_row(&parse_row::<PlotInfoRow>(row)?),
    };
    checked.map_err(|v| v.0)
}

/// Validates every row without writing anything.
pub fn preview_import(import_type: ImportType, rows: &[Value]) -> ImportPreview {
    let errors: Vec<RowError> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            check_row(import_type, row).err().map(|message| RowError {
                row: row_number(index),
                message,
            })
        })
        .collect();
    ImportPreview {
        total_rows: rows.len(),
        valid_rows: rows.len() - errors.len(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preview_numbers_rows_below_a_header() {
        let rows = vec![
            json!({"name": "Yossi Cohen", "email": "yossi@example.com"}),
            json!({"name": "", "email": "x@example.com"}),
            json!({"email": "missing-name@example.com"}),
        ];
        let preview = preview_import(ImportType::Owners, &rows);
        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.valid_rows, 1);
        let rows: Vec<usize> = preview.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![3, 4]);
        assert!(preview.errors[1].message.starts_with("Invalid row"));
    }

    #[test]
    fn ownership_rows_check_percentage_and_dates() {
        let rows = vec![
            json!({
                "property_address": "הרצל 10, תל אביב",
                "owner_name": "Yossi Cohen",
                "ownership_percentage": "50",
                "start_date": "2020-01-01"
            }),
            json!({
                "property_address": "הרצל 10, תל אביב",
                "owner_name": "Dana Levi",
                "ownership_percentage": "150",
                "start_date": "2020-01-01"
            }),
            json!({
                "property_address": "הרצל 10, תל אביב",
                "owner_name": "Dana Levi",
                "ownership_percentage": "50",
                "start_date": "2020-01-01",
                "end_date": "2019-01-01"
            }),
        ];
        let preview = preview_import(ImportType::Ownerships, &rows);
        assert_eq!(preview.valid_rows, 1);
        assert_eq!(preview.errors.len(), 2);
    }

    #[test]
    fn mortgage_and_plot_rows_need_their_keys() {
        let mortgages = vec![
            json!({
                "property_address": "הרצל 10, תל אביב",
                "bank": "Leumi",
                "loan_amount": "900000",
                "start_date": "2021-03-01",
                "status": "ACTIVE"
            }),
            json!({
                "property_address": "הרצל 10, תל אביב",
                "bank": "Leumi",
                "loan_amount": "0",
                "start_date": "2021-03-01"
            }),
            json!({
                "property_address": "הרצל 10, תל אביב",
                "bank": "Leumi",
                "loan_amount": "1000",
                "start_date": "2021-03-01",
                "status": "CLOSED"
            }),
        ];
        let preview = preview_import(ImportType::Mortgages, &mortgages);
        assert_eq!(preview.valid_rows, 1);
        assert_eq!(preview.errors.iter().map(|e| e.row).collect::<Vec<_>>(), vec![3, 4]);

        let plots = vec![
            json!({"property_address": "הרצל 10, תל אביב", "gush": "6638", "chelka": "12"}),
            json!({"property_address": "הרצל 10, תל אביב", "gush": " ", "chelka": "12"}),
            json!({"property_address": "הרצל 10, תל אביב", "gush": "6638"}),
        ];
        let preview = preview_import(ImportType::PlotInfo, &plots);
        assert_eq!(preview.valid_rows, 1);
        assert!(preview.errors[0].message.contains("gush"));
    }
}
