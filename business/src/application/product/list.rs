use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::query::Page;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::list::{ListProductsParams, ListProductsUseCase};

pub struct ListProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListProductsUseCase for ListProductsUseCaseImpl {
    async fn execute(&self, params: ListProductsParams) -> Result<Page<Product>, ProductError> {
        let query = params.query;
        self.logger.debug(&format!(
            "Listing products: page={} limit={} filter={:?} sort={:?}",
            query.page.page, query.page.limit, query.filter, query.sort
        ));
        let page = self.repository.find_page(&query).await?;
        self.logger.info(&format!(
            "Listed {} of {} products",
            page.items.len(),
            page.total_items
        ));
        Ok(page)
    }
}
