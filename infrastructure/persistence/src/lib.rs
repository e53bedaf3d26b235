pub mod db;
pub mod cart {
    pub mod entity;
    pub mod repository;
}
pub mod memory {
    pub mod cart;
    pub mod product;
    pub mod store;
}
pub mod product {
    pub mod entity;
    pub mod repository;
}
