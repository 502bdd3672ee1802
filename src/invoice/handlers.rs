use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse, Responder};

use crate::invoice::models::{InvoiceForm, InvoicePreview};
use crate::invoice::page::{render_page, PageView};
use crate::invoice::renderer::{preview, render_invoice_sheet};
use crate::{AppState, ErrorResponse};

fn html_response(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

/// GET / - the form, plus both invoice copies once something was submitted.
pub async fn show_page(state: web::Data<AppState>) -> impl Responder {
    let invoice_sheet = state
        .current()
        .map(|record| render_invoice_sheet(&record, state.today()));

    let html = render_page(&PageView {
        invoice_sheet,
        ..PageView::default()
    });
    html_response(HttpResponse::Ok(), html)
}

/// POST /invoice - the form's only write path.
///
/// On success the held record is replaced and the browser is redirected
/// back to `/`. On failure the form is shown again with the submitted values
/// and the previous invoice, if any, stays in place.
pub async fn submit_invoice(
    state: web::Data<AppState>,
    form: web::Form<InvoiceForm>,
) -> impl Responder {
    let form = form.into_inner();

    match form.collect() {
        Ok(record) => {
            log::info!(
                "Invoice generated for plot {} ({})",
                record.plot_no,
                record.bill_month
            );
            if state.replace(record).is_some() {
                log::debug!("Previous invoice discarded");
            }
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish()
        }
        Err(errors) => {
            log::warn!("Invoice form rejected: {} field error(s)", errors.len());
            let invoice_sheet = state
                .current()
                .map(|record| render_invoice_sheet(&record, state.today()));

            let html = render_page(&PageView {
                form: Some(&form),
                errors: Some(&errors),
                invoice_sheet,
            });
            html_response(HttpResponse::BadRequest(), html)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/invoices/preview",
    tag = "Invoice",
    request_body = InvoiceForm,
    responses(
        (status = 200, description = "Derived invoice with both rendered copies", body = InvoicePreview),
        (status = 400, description = "One or more fields failed validation", body = ErrorResponse)
    )
)]
pub async fn preview_invoice(
    state: web::Data<AppState>,
    form: web::Json<InvoiceForm>,
) -> impl Responder {
    match form.collect() {
        Ok(record) => HttpResponse::Ok().json(preview(record, state.today())),
        Err(errors) => {
            log::warn!("Invoice preview rejected: {} field error(s)", errors.len());
            HttpResponse::BadRequest().json(ErrorResponse::validation(&errors))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/invoices/current",
    tag = "Invoice",
    responses(
        (status = 200, description = "The invoice currently on display", body = InvoicePreview),
        (status = 404, description = "No invoice has been generated yet", body = ErrorResponse)
    )
)]
pub async fn get_current_invoice(state: web::Data<AppState>) -> impl Responder {
    match state.current() {
        Some(record) => {
            HttpResponse::Ok().json(preview(record.as_ref().clone(), state.today()))
        }
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("No invoice generated yet")),
    }
}

/// Page routes at the root, JSON routes under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(show_page)))
        .service(web::resource("/invoice").route(web::post().to(submit_invoice)))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/invoices/preview").route(web::post().to(preview_invoice)),
                )
                .service(
                    web::resource("/invoices/current").route(web::get().to(get_current_invoice)),
                ),
        );
}
