use async_trait::async_trait;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductChanges};
use business::domain::product::query::{Page, PriceSort, ProductListQuery};
use business::domain::product::repository::ProductRepository;

use super::store::MemoryStore;

pub struct MemoryProductRepository {
    store: MemoryStore,
}

impl MemoryProductRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.store.lock().await.products.clone())
    }

    async fn find_page(&self, query: &ProductListQuery) -> Result<Page<Product>, RepositoryError> {
        let state = self.store.lock().await;
        let mut matching: Vec<&Product> = state
            .products
            .iter()
            .filter(|p| query.filter.as_ref().is_none_or(|f| f.matches(p)))
            .collect();

        match query.sort {
            Some(PriceSort::Ascending) => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(PriceSort::Descending) => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
            None => {}
        }

        let total = matching.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(query.page.limit as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total, query.page))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        self.store
            .lock()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .await
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut state = self.store.lock().await;
        if state.products.iter().any(|p| p.title == product.title) {
            return Err(RepositoryError::Duplicated);
        }
        state.products.push(product.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, RepositoryError> {
        let mut state = self.store.lock().await;
        if let Some(title) = &changes.title
            && state.products.iter().any(|p| p.id != id && &p.title == title)
        {
            return Err(RepositoryError::Duplicated);
        }

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        changes.apply_to(product);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut state = self.store.lock().await;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        for cart in state.carts.iter_mut() {
            cart.remove_item(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::product::model::NewProductProps;
    use business::domain::product::query::{PageRequest, ProductFilter};

    fn product(title: &str, price: &str, category: &str, status: bool) -> Product {
        Product::new(NewProductProps {
            title: Some(title.to_string()),
            description: Some(format!("{title} description")),
            code: Some(title.to_uppercase()),
            price: Some(price.to_string()),
            stock: Some("3".to_string()),
            category: Some(category.to_string()),
            status: Some(status),
            ..Default::default()
        })
        .unwrap()
    }

    async fn seeded() -> MemoryProductRepository {
        let repo = MemoryProductRepository::new(MemoryStore::new());
        for p in [
            product("a", "30", "books", true),
            product("b", "10", "toys", false),
            product("c", "20", "books", true),
            product("d", "50", "toys", true),
            product("e", "40", "games", false),
        ] {
            repo.insert(&p).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn should_page_in_insertion_order() {
        let repo = seeded().await;

        let page = repo
            .find_page(&ProductListQuery {
                page: PageRequest { page: 1, limit: 2 },
                ..Default::default()
            })
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.next_page(), Some(2));
    }

    #[tokio::test]
    async fn should_sort_by_price_descending() {
        let repo = seeded().await;

        let page = repo
            .find_page(&ProductListQuery {
                sort: Some(PriceSort::Descending),
                ..Default::default()
            })
            .await
            .unwrap();

        let prices: Vec<_> = page.items.iter().map(|p| p.price).collect();
        assert_eq!(prices, [50.0, 40.0, 30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn should_filter_by_category_or_availability() {
        let repo = seeded().await;

        let books = repo
            .find_page(&ProductListQuery {
                filter: ProductFilter::parse(Some("books")),
                ..Default::default()
            })
            .await
            .unwrap();
        let unavailable = repo
            .find_page(&ProductListQuery {
                filter: ProductFilter::parse(Some("unavailable")),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(books.total_items, 2);
        assert_eq!(unavailable.total_items, 2);
        assert!(unavailable.items.iter().all(|p| !p.status));
    }

    #[tokio::test]
    async fn should_reject_duplicate_title() {
        let repo = seeded().await;

        let result = repo.insert(&product("a", "1", "misc", true)).await;

        assert!(matches!(result, Err(RepositoryError::Duplicated)));
    }

    #[tokio::test]
    async fn should_apply_only_supplied_fields() {
        let repo = seeded().await;
        let original = repo.get_all().await.unwrap().remove(0);

        let updated = repo
            .update(
                original.id,
                &ProductChanges {
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 99.0);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn should_report_missing_product_on_delete() {
        let repo = seeded().await;

        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
