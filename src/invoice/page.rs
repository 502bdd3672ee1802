//! The single HTML page: billing form on top, printable invoice sheet below.

use super::common::escape_html;
use super::form::{
    FIELD_ADDRESS, FIELD_BILL_MONTH, FIELD_CONTACT, FIELD_CURRENT_PAYMENT, FIELD_DUES, FIELD_NAME,
    FIELD_PLOT_NO, LABEL_ADDRESS, LABEL_BILL_MONTH, LABEL_CONTACT, LABEL_CURRENT_PAYMENT,
    LABEL_DUES, LABEL_NAME, LABEL_PLOT_NO,
};
use super::models::InvoiceForm;
use super::validation::ValidationErrors;

const PAGE_STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/invoice.css"));

/// Everything the page needs to render.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Values to pre-fill, typically the rejected submission.
    pub form: Option<&'a InvoiceForm>,
    pub errors: Option<&'a ValidationErrors>,
    /// Output of `render_invoice_sheet`, if a record is held.
    pub invoice_sheet: Option<String>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let invoice_section = match &view.invoice_sheet {
        Some(sheet) => format!(
            r#"<section class="invoice-page">
  <div class="no-print actions">
    <button type="button" class="primaryBtn" onclick="window.print()">Print / Download PDF</button>
  </div>
{}</section>
"#,
            sheet
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Invoice Generator</title>
<style>
{styles}</style>
</head>
<body>
<main class="page">
<section class="card no-print">
  <h1 class="title">Invoice Generator</h1>
  <p class="subtitle">Fill the form and get a printable, bill-style invoice with two copies (Society&#39;s Copy &amp; Resident&#39;s Copy).</p>
{errors}  <form class="form" method="post" action="/invoice">
    <div class="grid">
{name}{contact}    </div>
{address}    <div class="grid">
{plot_no}{bill_month}    </div>
    <div class="grid">
{dues}{current_payment}    </div>
    <button type="submit" class="primaryBtn">Generate Invoice</button>
  </form>
</section>
{invoice}</main>
</body>
</html>
"#,
        styles = PAGE_STYLES,
        errors = render_errors(view.errors),
        name = text_field(view, FIELD_NAME, LABEL_NAME, None),
        contact = text_field(view, FIELD_CONTACT, LABEL_CONTACT, None),
        address = text_field(view, FIELD_ADDRESS, LABEL_ADDRESS, None),
        plot_no = text_field(view, FIELD_PLOT_NO, LABEL_PLOT_NO, None),
        bill_month = text_field(view, FIELD_BILL_MONTH, LABEL_BILL_MONTH, Some("Sep 2025")),
        dues = amount_field(view, FIELD_DUES, LABEL_DUES),
        current_payment = amount_field(view, FIELD_CURRENT_PAYMENT, LABEL_CURRENT_PAYMENT),
        invoice = invoice_section,
    )
}

fn submitted_value<'a>(form: &'a InvoiceForm, field: &str) -> &'a str {
    match field {
        FIELD_NAME => form.name.as_str(),
        FIELD_ADDRESS => form.address.as_str(),
        FIELD_CONTACT => form.contact.as_str(),
        FIELD_PLOT_NO => form.plot_no.as_str(),
        FIELD_BILL_MONTH => form.bill_month.as_str(),
        FIELD_DUES => form.dues.as_str(),
        FIELD_CURRENT_PAYMENT => form.current_payment.as_str(),
        _ => "",
    }
}

fn field_class(view: &PageView<'_>, field: &str) -> &'static str {
    match view.errors {
        Some(errors) if errors.has_field(field) => "field invalid",
        _ => "field",
    }
}

fn text_field(view: &PageView<'_>, field: &str, label: &str, placeholder: Option<&str>) -> String {
    let value = view.form.map(|f| submitted_value(f, field)).unwrap_or("");
    let placeholder = placeholder
        .map(|p| format!(r#" placeholder="{}""#, escape_html(p)))
        .unwrap_or_default();

    format!(
        r#"    <label class="{class}">
      <span>{label}</span>
      <input name="{field}" type="text" value="{value}"{placeholder} required>
    </label>
"#,
        class = field_class(view, field),
        label = escape_html(label),
        field = field,
        value = escape_html(value),
        placeholder = placeholder,
    )
}

fn amount_field(view: &PageView<'_>, field: &str, label: &str) -> String {
    let value = view.form.map(|f| submitted_value(f, field)).unwrap_or("0");

    format!(
        r#"    <label class="{class}">
      <span>{label} (PKR)</span>
      <input name="{field}" type="number" min="0" step="0.01" value="{value}">
    </label>
"#,
        class = field_class(view, field),
        label = escape_html(label),
        field = field,
        value = escape_html(value),
    )
}

fn render_errors(errors: Option<&ValidationErrors>) -> String {
    let errors = match errors {
        Some(errors) if !errors.is_empty() => errors,
        _ => return String::new(),
    };

    let items: String = errors
        .iter()
        .map(|e| match &e.suggestion {
            Some(suggestion) => format!(
                "    <li>{}. {}</li>\n",
                escape_html(&e.message),
                escape_html(suggestion)
            ),
            None => format!("    <li>{}</li>\n", escape_html(&e.message)),
        })
        .collect();

    format!("  <ul class=\"errors\" role=\"alert\">\n{}  </ul>\n", items)
}
