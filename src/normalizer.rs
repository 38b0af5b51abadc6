use csv::StringRecord;

use crate::error::{KasboekError, Result};
use crate::models::{Classification, Transaction};

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Strict `DD-MM-YYYY` -> ISO `YYYY-MM-DD`. Anything else is None.
pub fn parse_date_dmy(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 2 || parts[1].len() != 2 || parts[2].len() != 4 {
        return None;
    }
    chrono::NaiveDate::parse_from_str(raw, "%d-%m-%Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Statement amounts use `,` as the decimal separator. Must parse as a
/// finite, non-negative number; the sign lives in the Debit Credit column.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', ".");
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_debit_credit(raw: &str) -> Option<String> {
    match raw.trim().to_uppercase().as_str() {
        "D" | "C" => Some(raw.trim().to_uppercase()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Column indices resolved once per file from the header record. The
/// required columns (Reference, Transaction Date, Amount) must be present
/// in the header; a file without them is structurally unusable. All other
/// columns are optional.
#[derive(Debug)]
pub struct Columns {
    reference: usize,
    transaction_date: usize,
    amount: usize,
    account_number: Option<usize>,
    value_date: Option<usize>,
    booking_date: Option<usize>,
    currency: Option<usize>,
    debit_credit: Option<usize>,
    counterparty_account: Option<usize>,
    counterparty_holder: Option<usize>,
    payment_method: Option<usize>,
    description: Option<usize>,
    payment_type: Option<usize>,
    mandate_number: Option<usize>,
    creditor_id: Option<usize>,
    address: Option<usize>,
}

impl Columns {
    pub fn resolve(headers: &StringRecord) -> Result<Columns> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| KasboekError::MissingColumn(name.to_string()))
        };
        Ok(Columns {
            reference: required("Reference")?,
            transaction_date: required("Transaction Date")?,
            amount: required("Amount")?,
            account_number: find("Account Number"),
            value_date: find("Value Date"),
            booking_date: find("Booking Date"),
            currency: find("Currency"),
            debit_credit: find("Debit Credit"),
            counterparty_account: find("Counterparty Account"),
            counterparty_holder: find("Counterparty Holder"),
            payment_method: find("Payment Method"),
            description: find("Description"),
            payment_type: find("Payment Type"),
            mandate_number: find("Mandate Number"),
            creditor_id: find("Creditor ID"),
            address: find("Address"),
        })
    }
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

fn text(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalize one raw statement row into a transaction candidate.
///
/// Required-field policy: Reference, Transaction Date and Amount must be
/// present and parseable; a row failing any of them is rejected (None) and
/// the batch moves on. Every other field degrades to None when absent or
/// malformed.
pub fn normalize_row(record: &StringRecord, cols: &Columns) -> Option<Transaction> {
    let reference = text(record, Some(cols.reference))?;
    let transaction_date = parse_date_dmy(record.get(cols.transaction_date)?)?;
    let amount = parse_amount(record.get(cols.amount)?)?;

    Some(Transaction {
        id: None,
        reference,
        account_number: text(record, cols.account_number),
        transaction_date,
        value_date: text(record, cols.value_date).and_then(|v| parse_date_dmy(&v)),
        booking_date: text(record, cols.booking_date).and_then(|v| parse_date_dmy(&v)),
        currency: text(record, cols.currency),
        debit_credit: text(record, cols.debit_credit).and_then(|v| parse_debit_credit(&v)),
        amount,
        counterparty_account: text(record, cols.counterparty_account),
        counterparty_holder: text(record, cols.counterparty_holder),
        payment_method: text(record, cols.payment_method),
        description: text(record, cols.description),
        payment_type: text(record, cols.payment_type),
        mandate_number: text(record, cols.mandate_number),
        creditor_id: text(record, cols.creditor_id),
        address: text(record, cols.address),
        classification: Classification::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(vec![
            "Reference",
            "Account Number",
            "Transaction Date",
            "Value Date",
            "Currency",
            "Debit Credit",
            "Amount",
            "Counterparty Holder",
            "Description",
        ])
    }

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_date_dmy() {
        assert_eq!(parse_date_dmy("15-01-2025"), Some("2025-01-15".to_string()));
        assert_eq!(parse_date_dmy(" 01-12-2024 "), Some("2024-12-01".to_string()));
        assert_eq!(parse_date_dmy("2025-01-15"), None);
        assert_eq!(parse_date_dmy("5-1-2025"), None);
        assert_eq!(parse_date_dmy("garbage"), None);
    }

    #[test]
    fn test_parse_date_dmy_rejects_invalid_calendar_dates() {
        assert_eq!(parse_date_dmy("32-01-2025"), None);
        assert_eq!(parse_date_dmy("30-02-2025"), None);
        assert_eq!(parse_date_dmy("15-13-2025"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50"), Some(12.5));
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" 0,00 "), Some(0.0));
        assert_eq!(parse_amount("-5,00"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_resolve_missing_required_column() {
        let headers = StringRecord::from(vec!["Reference", "Amount"]);
        let err = Columns::resolve(&headers).unwrap_err();
        assert!(err.to_string().contains("Transaction Date"));
    }

    #[test]
    fn test_normalize_full_row() {
        let cols = Columns::resolve(&headers()).unwrap();
        let rec = row(&[
            "R1",
            "NL01BANK0123456789",
            "15-01-2025",
            "16-01-2025",
            "EUR",
            "d",
            "42,50",
            "Albert Heijn",
            "Groceries week 3",
        ]);
        let txn = normalize_row(&rec, &cols).unwrap();
        assert_eq!(txn.reference, "R1");
        assert_eq!(txn.transaction_date, "2025-01-15");
        assert_eq!(txn.value_date.as_deref(), Some("2025-01-16"));
        assert_eq!(txn.debit_credit.as_deref(), Some("D"));
        assert_eq!(txn.amount, 42.5);
        assert_eq!(txn.counterparty_holder.as_deref(), Some("Albert Heijn"));
        assert!(txn.classification.is_empty());
    }

    #[test]
    fn test_normalize_rejects_missing_reference() {
        let cols = Columns::resolve(&headers()).unwrap();
        let rec = row(&["  ", "", "15-01-2025", "", "EUR", "D", "10,00", "", ""]);
        assert!(normalize_row(&rec, &cols).is_none());
    }

    #[test]
    fn test_normalize_rejects_bad_required_date() {
        let cols = Columns::resolve(&headers()).unwrap();
        let rec = row(&["R1", "", "01/15/2025", "", "EUR", "D", "10,00", "", ""]);
        assert!(normalize_row(&rec, &cols).is_none());
    }

    #[test]
    fn test_normalize_rejects_bad_amount() {
        let cols = Columns::resolve(&headers()).unwrap();
        let rec = row(&["R1", "", "15-01-2025", "", "EUR", "D", "ten", "", ""]);
        assert!(normalize_row(&rec, &cols).is_none());
    }

    #[test]
    fn test_normalize_degrades_optional_fields() {
        let cols = Columns::resolve(&headers()).unwrap();
        let rec = row(&["R1", "", "15-01-2025", "not-a-date", "", "X", "10,00", "", ""]);
        let txn = normalize_row(&rec, &cols).unwrap();
        assert_eq!(txn.value_date, None);
        assert_eq!(txn.debit_credit, None);
        assert_eq!(txn.currency, None);
    }
}
