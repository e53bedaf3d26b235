use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductChanges};
use business::domain::product::query::{Page, PriceSort, ProductFilter, ProductListQuery};
use business::domain::product::repository::ProductRepository;

use super::entity::{PRODUCT_COLUMNS, ProductEntity, price_to_decimal};
use crate::db::{database_error, write_error};

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&ProductFilter>) {
    let Some(filter) = filter else {
        return;
    };
    builder
        .push(" WHERE (category = ")
        .push_bind(filter.text.clone());
    if let Some(status) = filter.status() {
        builder.push(" OR status = ").push_bind(status);
    }
    builder.push(")");
}

fn order_clause(sort: Option<PriceSort>) -> &'static str {
    match sort {
        Some(PriceSort::Ascending) => " ORDER BY price ASC, created_at, id",
        Some(PriceSort::Descending) => " ORDER BY price DESC, created_at, id",
        None => " ORDER BY created_at, id",
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn find_page(&self, query: &ProductListQuery) -> Result<Page<Product>, RepositoryError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut count, query.filter.as_ref());
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filter(&mut select, query.filter.as_ref());
        select
            .push(order_clause(query.sort))
            .push(" LIMIT ")
            .push_bind(i64::from(query.page.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

        let entities = select
            .build_query_as::<ProductEntity>()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(Page::new(
            entities.into_iter().map(|e| e.into_domain()).collect(),
            u64::try_from(total).unwrap_or_default(),
            query.page,
        ))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO products (id, title, description, code, price, stock, category, thumbnail, thumbnails, status, tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.code)
        .bind(price_to_decimal(product.price)?)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.thumbnail)
        .bind(&product.thumbnails)
        .bind(product.status)
        .bind(&product.tags)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, RepositoryError> {
        let price = changes.price.map(price_to_decimal).transpose()?;

        // Absent fields bind NULL and COALESCE keeps the stored value.
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                code = COALESCE($4, code),
                price = COALESCE($5, price),
                stock = COALESCE($6, stock),
                category = COALESCE($7, category),
                thumbnail = COALESCE($8, thumbnail),
                thumbnails = COALESCE($9, thumbnails),
                status = COALESCE($10, status),
                tags = COALESCE($11, tags)
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.code)
        .bind(price)
        .bind(changes.stock)
        .bind(&changes.category)
        .bind(&changes.thumbnail)
        .bind(&changes.thumbnails)
        .bind(changes.status)
        .bind(&changes.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered_sql(text: &str) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut builder, ProductFilter::parse(Some(text)).as_ref());
        builder.sql().to_string()
    }

    #[test]
    fn should_match_category_only_for_plain_text() {
        assert_eq!(
            filtered_sql("books"),
            "SELECT COUNT(*) FROM products WHERE (category = $1)"
        );
    }

    #[test]
    fn should_also_match_status_for_availability_labels() {
        assert_eq!(
            filtered_sql("unavailable"),
            "SELECT COUNT(*) FROM products WHERE (category = $1 OR status = $2)"
        );
    }

    #[test]
    fn should_keep_insertion_order_without_sort() {
        assert_eq!(order_clause(None), " ORDER BY created_at, id");
        assert!(order_clause(Some(PriceSort::Descending)).starts_with(" ORDER BY price DESC"));
    }
}
