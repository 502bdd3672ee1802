#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    lucknow_invoice_server::run().await
}
