//! Invoice rendering: a pure transformation from a record and an issue date
//! into printable HTML.
//!
//! The issue date is passed in rather than read from the clock so the same
//! record always renders the same markup for a given day.

use chrono::NaiveDate;

use super::common::{due_date, escape_html, format_currency, format_date};
use super::models::{CopyLabel, InvoicePreview, InvoiceRecord, InvoiceSummary, RenderedCopy};

pub const SOCIETY_NAME: &str = "LUCKNOW CO-OPERATIVE HOUSING SOCIETY";
pub const SOCIETY_SUBTITLE: &str = "Security and conservatory services";
pub const PAYMENT_NOTE: &str = "Please make sure to pay the charges before the 10th of each month.";

/// Derive dates and totals for `record` as of `issue_date`.
pub fn summarize(record: &InvoiceRecord, issue_date: NaiveDate) -> InvoiceSummary {
    let total = record.total();
    InvoiceSummary {
        issue_date,
        due_date: due_date(issue_date),
        dues: record.dues,
        current_payment: record.current_payment,
        total,
        dues_formatted: format_currency(record.dues),
        current_payment_formatted: format_currency(record.current_payment),
        total_formatted: format_currency(total),
    }
}

/// Render one labelled copy of the invoice.
pub fn render_copy(record: &InvoiceRecord, label: CopyLabel, issue_date: NaiveDate) -> String {
    render_copy_with_summary(record, &summarize(record, issue_date), label)
}

fn render_copy_with_summary(
    record: &InvoiceRecord,
    summary: &InvoiceSummary,
    label: CopyLabel,
) -> String {
    format!(
        r#"<div class="invoice">
  <header class="invoice-header">
    <div>
      <h2 class="society-name">{society}</h2>
      <p class="society-subtitle">{subtitle}</p>
    </div>
    <div class="copy-pill">{label}</div>
  </header>
  <section class="meta">
    <div class="meta-row">
      <div><span class="meta-label">Issue Date</span><span class="meta-value">{issue_date}</span></div>
      <div><span class="meta-label">Due Date</span><span class="meta-value">{due_date}</span></div>
      <div><span class="meta-label">Billing Month</span><span class="meta-value">{bill_month}</span></div>
    </div>
    <div class="meta-row">
      <div class="w-50"><span class="meta-label">Resident Name</span><span class="meta-value">{name}</span></div>
      <div><span class="meta-label">Contact</span><span class="meta-value">{contact}</span></div>
      <div><span class="meta-label">Plot / House No.</span><span class="meta-value">{plot_no}</span></div>
    </div>
    <div class="meta-row">
      <div class="w-100"><span class="meta-label">Address</span><span class="meta-value">{address}</span></div>
    </div>
  </section>
  <section class="charges">
    <table class="charges-table">
      <thead>
        <tr><th class="left">Particulars</th><th>Amount (PKR)</th></tr>
      </thead>
      <tbody>
        <tr><td class="left">Previous / Other Dues</td><td>{dues}</td></tr>
        <tr><td class="left">Current Month Charges</td><td>{current_payment}</td></tr>
        <tr class="total-row"><td class="left">Total Payable</td><td>{total}</td></tr>
      </tbody>
    </table>
  </section>
  <section class="footer">
    <div class="signatures">
      <div class="sig-col"><div class="sig-line"></div><span class="sig-label">Date</span></div>
      <div class="sig-col"><div class="sig-line"></div><span class="sig-label">Office Secretary</span></div>
    </div>
    <p class="note">{note}</p>
  </section>
</div>
"#,
        society = SOCIETY_NAME,
        subtitle = SOCIETY_SUBTITLE,
        label = escape_html(label.as_str()),
        issue_date = format_date(summary.issue_date),
        due_date = format_date(summary.due_date),
        bill_month = escape_html(&record.bill_month),
        name = escape_html(&record.name),
        contact = escape_html(&record.contact),
        plot_no = escape_html(&record.plot_no),
        address = escape_html(&record.address),
        dues = summary.dues_formatted,
        current_payment = summary.current_payment_formatted,
        total = summary.total_formatted,
        note = PAYMENT_NOTE,
    )
}

/// Render both copies of one record, each from the same summary.
pub fn render_copies(record: &InvoiceRecord, issue_date: NaiveDate) -> Vec<RenderedCopy> {
    let summary = summarize(record, issue_date);
    CopyLabel::ALL
        .iter()
        .map(|&label| RenderedCopy {
            label,
            html: render_copy_with_summary(record, &summary, label),
        })
        .collect()
}

/// Both copies joined by the "cut here" divider, ready to embed in a page.
pub fn render_invoice_sheet(record: &InvoiceRecord, issue_date: NaiveDate) -> String {
    let copies: Vec<String> = render_copies(record, issue_date)
        .into_iter()
        .map(|copy| copy.html)
        .collect();
    copies.join("<div class=\"divider\"><span>&#9986;</span></div>\n")
}

/// Record, derived values and rendered copies in one value for the JSON API.
pub fn preview(record: InvoiceRecord, issue_date: NaiveDate) -> InvoicePreview {
    let summary = summarize(&record, issue_date);
    let copies = render_copies(&record, issue_date);
    InvoicePreview {
        record,
        summary,
        copies,
    }
}
