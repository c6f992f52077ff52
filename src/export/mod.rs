//! Export module
//!
//! Serializes a filtered ledger view to CSV, straight into an in-memory
//! buffer served as the response payload. No intermediate file.

use uuid::Uuid;

use crate::domain::{Currency, MonthFilter};
use crate::error::AppError;
use crate::ledger::LedgerService;

/// CSV exporter over the ledger query service
pub struct CsvExporter<'a> {
    ledger: &'a LedgerService,
}

impl<'a> CsvExporter<'a> {
    pub fn new(ledger: &'a LedgerService) -> Self {
        Self { ledger }
    }

    /// Export the user's expenses (optionally one month) as CSV bytes.
    ///
    /// Rows come out in the same order as `list_expenses`. Amounts are
    /// formatted to exactly two decimal places and carry the user's
    /// preferred currency symbol; quoting of embedded delimiters or quotes
    /// is handled by the csv writer.
    pub async fn export(
        &self,
        user_id: Uuid,
        month: Option<MonthFilter>,
        currency: Currency,
    ) -> Result<Vec<u8>, AppError> {
        let expenses = self.ledger.list_expenses(user_id, month).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());

        let amount_header = format!("Amount ({})", currency.symbol());
        writer.write_record(["Date", "Description", "Category", amount_header.as_str()])?;

        for expense in &expenses {
            writer.write_record([
                expense.date.format("%Y-%m-%d").to_string(),
                expense.description.clone(),
                expense.category.clone(),
                format!("{:.2} {}", expense.amount, currency.symbol()),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV buffer error: {}", e)))
    }
}

/// Attachment filename for the export: `expenses.csv`, or
/// `expenses_<month>.csv` when a month filter applies.
pub fn export_filename(month: Option<MonthFilter>) -> String {
    match month {
        Some(month) => format!("expenses_{}.csv", month),
        None => "expenses.csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_without_month() {
        assert_eq!(export_filename(None), "expenses.csv");
    }

    #[test]
    fn test_export_filename_with_month() {
        let month: MonthFilter = "2024-01".parse().unwrap();
        assert_eq!(export_filename(Some(month)), "expenses_2024-01.csv");
    }

    #[test]
    fn test_csv_quoting_of_embedded_delimiters() {
        // The writer must quote fields containing commas or quotes
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["2024-01-01", "Dinner, with \"friends\"", "Loisirs", "20.00 €"])
            .unwrap();
        let bytes = writer.into_inner().unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert_eq!(
            line.trim_end(),
            "2024-01-01,\"Dinner, with \"\"friends\"\"\",Loisirs,20.00 €"
        );
    }
}
