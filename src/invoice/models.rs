use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw values of the billing form, exactly as submitted.
///
/// Missing fields deserialize as empty strings so the collector can report
/// them as validation errors instead of a generic payload rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(default)]
    #[schema(example = "A. Khan")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "12 Park Lane")]
    pub address: String,
    #[serde(default)]
    #[schema(example = "0300-1234567")]
    pub contact: String,
    #[serde(default)]
    #[schema(example = "H-12")]
    pub plot_no: String,
    #[serde(default)]
    #[schema(example = "Sep 2025")]
    pub bill_month: String,
    /// Accepts a JSON number or string; blank means zero.
    #[serde(default, deserialize_with = "amount_text")]
    #[schema(example = "500")]
    pub dues: String,
    /// Accepts a JSON number or string; blank means zero.
    #[serde(default, deserialize_with = "amount_text")]
    #[schema(example = "1500")]
    pub current_payment: String,
}

/// The validated result of one form submission. Never mutated after
/// construction; a new submission produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub plot_no: String,
    pub bill_month: String,
    #[schema(value_type = String, example = "500")]
    pub dues: Decimal,
    #[schema(value_type = String, example = "1500")]
    pub current_payment: Decimal,
}

impl InvoiceRecord {
    /// Amount payable. Saturates at `Decimal::MAX`; records built by
    /// `InvoiceForm::collect` stay far below it.
    pub fn total(&self) -> Decimal {
        self.dues.saturating_add(self.current_payment)
    }
}

/// Which of the two printed copies is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum CopyLabel {
    Society,
    Resident,
}

impl CopyLabel {
    /// Render order on the page: the society keeps the top half.
    pub const ALL: [CopyLabel; 2] = [CopyLabel::Society, CopyLabel::Resident];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyLabel::Society => "Society's Copy",
            CopyLabel::Resident => "Resident's Copy",
        }
    }
}

impl fmt::Display for CopyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values derived from a record at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    #[schema(example = "2025-09-30")]
    pub issue_date: NaiveDate,
    #[schema(example = "2025-10-20")]
    pub due_date: NaiveDate,
    #[schema(value_type = String, example = "500")]
    pub dues: Decimal,
    #[schema(value_type = String, example = "1500")]
    pub current_payment: Decimal,
    #[schema(value_type = String, example = "2000")]
    pub total: Decimal,
    #[schema(example = "Rs\u{a0}500.00")]
    pub dues_formatted: String,
    #[schema(example = "Rs\u{a0}1,500.00")]
    pub current_payment_formatted: String,
    #[schema(example = "Rs\u{a0}2,000.00")]
    pub total_formatted: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RenderedCopy {
    pub label: CopyLabel,
    pub html: String,
}

/// JSON view of an invoice: the record, its derived values and the markup
/// of both copies.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoicePreview {
    pub record: InvoiceRecord,
    pub summary: InvoiceSummary,
    pub copies: Vec<RenderedCopy>,
}

fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        // Anything that is not a number reads as a blank amount.
        fn visit_bool<E: de::Error>(self, _: bool) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
            while map
                .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                .is_some()
            {}
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
