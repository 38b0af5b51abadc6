/// Classification attached to a transaction, either by a rule at import
/// time, by the bulk apply-rules pass, or by a manual edit. One fixed shape
/// so call sites cannot diverge on field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub category_id: Option<i64>,
    pub label_id: Option<i64>,
    pub person: Option<String>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.label_id.is_none() && self.person.is_none()
    }
}

/// One statement line, normalized. `id` is None for candidates that have
/// not been persisted yet; the importer assigns sequential ids and the
/// splitter derives `<parentId>.<n>` ids for children.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<String>,
    pub reference: String,
    pub account_number: Option<String>,
    pub transaction_date: String,
    pub value_date: Option<String>,
    pub booking_date: Option<String>,
    pub currency: Option<String>,
    pub debit_credit: Option<String>,
    pub amount: f64,
    pub counterparty_account: Option<String>,
    pub counterparty_holder: Option<String>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub payment_type: Option<String>,
    pub mandate_number: Option<String>,
    pub creditor_id: Option<String>,
    pub address: Option<String>,
    pub classification: Classification,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: Option<i64>,
    pub counterparty_account: Option<String>,
    pub counterparty_holder: String,
    pub category_id: i64,
    pub label_id: Option<i64>,
    pub person: Option<String>,
}

/// Outcome of one import batch, folded from per-row outcomes.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub transactions_imported: usize,
    pub rules_applied: usize,
    pub skipped_rows: usize,
    pub duplicate_references: Vec<String>,
}

/// One child in a split request: an amount plus its own classification.
#[derive(Debug, Clone)]
pub struct SplitPart {
    pub amount: f64,
    pub classification: Classification,
}

#[derive(Debug)]
pub struct SplitOutcome {
    pub deleted_id: String,
    pub new_transactions: Vec<Transaction>,
}
