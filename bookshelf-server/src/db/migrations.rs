//! Schema creation for the books table

use sqlx::SqlitePool;

/// Create the books table and its title index if they don't exist.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running book migrations...");

    // price is TEXT so decimals keep their exact scale
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id BLOB PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            price TEXT NOT NULL,
            publication_year INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_title ON books (title)")
        .execute(pool)
        .await?;

    tracing::info!("Book migrations complete");
    Ok(())
}
