#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    advocacia_docs_server::run().await
}
