/// How a column's value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Clickable cell that raises the `view_record` row action.
    Action,
    Text,
    Phone,
    Url,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub field: &'static str,
    pub kind: ColumnKind,
    pub sortable: bool,
}

const fn column(
    label: &'static str,
    field: &'static str,
    kind: ColumnKind,
    sortable: bool,
) -> ColumnSpec {
    ColumnSpec {
        label,
        field,
        kind,
        sortable,
    }
}

/// Column layout of the account table.
pub const ACCOUNT_COLUMNS: [ColumnSpec; 8] = [
    column("Account Name", "Name", ColumnKind::Action, true),
    column("Industry", "Industry", ColumnKind::Text, true),
    column("Type", "Type", ColumnKind::Text, true),
    column("Phone", "Phone", ColumnKind::Phone, false),
    column("Website", "Website", ColumnKind::Url, false),
    column("City", "BillingCity", ColumnKind::Text, false),
    column("State", "BillingState", ColumnKind::Text, false),
    column("Annual Revenue", "AnnualRevenue", ColumnKind::Currency, true),
];
