use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::CartError;
use super::value_objects::Quantity;
use crate::domain::product::model::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A shopping cart. Holds at most one line item per product, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        items: Vec<CartItem>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            items,
            created_at,
            updated_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_item(&self, product_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    fn find_item_mut(&mut self, product_id: Uuid) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }

    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Merges into the existing line for the product, or appends a new one.
    pub fn add_item(&mut self, product_id: Uuid, quantity: Quantity) -> Result<&CartItem, CartError> {
        let index = match self.items.iter().position(|i| i.product_id == product_id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item
                    .quantity
                    .checked_add(quantity.value())
                    .ok_or(CartError::InvalidQuantity)?;
                index
            }
            None => {
                self.items.push(CartItem {
                    product_id,
                    quantity: quantity.value(),
                });
                self.items.len() - 1
            }
        };
        self.touch();
        Ok(&self.items[index])
    }

    /// Adds `delta` (possibly negative) to an existing line.
    /// The line is left unchanged when the result would drop below one.
    pub fn adjust_quantity(&mut self, product_id: Uuid, delta: i32) -> Result<&CartItem, CartError> {
        let item = self
            .find_item_mut(product_id)
            .ok_or(CartError::ItemNotFound)?;
        let adjusted = item
            .quantity
            .checked_add(delta)
            .filter(|q| *q >= Quantity::MIN)
            .ok_or(CartError::InvalidQuantity)?;
        item.quantity = adjusted;
        self.touch();
        self.find_item(product_id).ok_or(CartError::ItemNotFound)
    }

    pub fn set_quantity(&mut self, product_id: Uuid, quantity: Quantity) -> Result<&CartItem, CartError> {
        let item = self
            .find_item_mut(product_id)
            .ok_or(CartError::ItemNotFound)?;
        item.quantity = quantity.value();
        self.touch();
        self.find_item(product_id).ok_or(CartError::ItemNotFound)
    }

    /// Returns whether a line was removed. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn ensure_can_checkout(&self) -> Result<(), CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A line item joined with its catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: Uuid,
    pub product: Option<Product>,
    pub quantity: i32,
}

/// A cart whose line items carry product data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDetails {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

impl CartDetails {
    /// Pairs each line with its product. Lines whose product vanished keep `None`.
    pub fn assemble(cart: Cart, products: &[Product]) -> Self {
        let lines = cart
            .items
            .iter()
            .map(|item| CartLine {
                product_id: item.product_id,
                product: products.iter().find(|p| p.id == item.product_id).cloned(),
                quantity: item.quantity,
            })
            .collect();
        Self { cart, lines }
    }

    pub fn total_price(&self) -> f64 {
        self.lines
            .iter()
            .filter_map(|line| line.product.as_ref().map(|p| p.price * f64::from(line.quantity)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn qty(value: i64) -> Quantity {
        Quantity::new(value).unwrap()
    }

    #[test]
    fn should_start_empty() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert!(matches!(cart.ensure_can_checkout(), Err(CartError::Empty)));
    }

    #[test]
    fn should_append_new_line_when_product_absent() {
        let mut cart = Cart::new();
        let product_id = Uuid::new_v4();

        cart.add_item(product_id, qty(2)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.find_item(product_id).unwrap().quantity, 2);
    }

    #[test]
    fn should_keep_insertion_order() {
        let mut cart = Cart::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        cart.add_item(first, qty(1)).unwrap();
        cart.add_item(second, qty(1)).unwrap();
        cart.add_item(first, qty(1)).unwrap();

        assert_eq!(cart.items[0].product_id, first);
        assert_eq!(cart.items[1].product_id, second);
    }

    #[test]
    fn should_decrement_with_negative_delta() {
        let mut cart = Cart::new();
        let product_id = Uuid::new_v4();
        cart.add_item(product_id, qty(3)).unwrap();

        let item = cart.adjust_quantity(product_id, -2).unwrap();

        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn should_leave_quantity_unchanged_when_delta_drops_below_one() {
        let mut cart = Cart::new();
        let product_id = Uuid::new_v4();
        cart.add_item(product_id, qty(2)).unwrap();

        let result = cart.adjust_quantity(product_id, -2);

        assert!(matches!(result, Err(CartError::InvalidQuantity)));
        assert_eq!(cart.find_item(product_id).unwrap().quantity, 2);
    }

    #[test]
    fn should_fail_adjusting_missing_line() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.adjust_quantity(Uuid::new_v4(), 1),
            Err(CartError::ItemNotFound)
        ));
    }

    #[test]
    fn should_set_absolute_quantity() {
        let mut cart = Cart::new();
        let product_id = Uuid::new_v4();
        cart.add_item(product_id, qty(7)).unwrap();

        cart.set_quantity(product_id, qty(2)).unwrap();

        assert_eq!(cart.find_item(product_id).unwrap().quantity, 2);
    }

    #[test]
    fn should_ignore_removal_of_absent_product() {
        let mut cart = Cart::new();
        cart.add_item(Uuid::new_v4(), qty(1)).unwrap();

        assert!(!cart.remove_item(Uuid::new_v4()));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn should_reject_overflowing_merge() {
        let mut cart = Cart::new();
        let product_id = Uuid::new_v4();
        cart.add_item(product_id, qty(i64::from(i32::MAX))).unwrap();

        assert!(matches!(
            cart.add_item(product_id, qty(1)),
            Err(CartError::InvalidQuantity)
        ));
    }

    #[test]
    fn should_pair_lines_with_products() {
        let mut cart = Cart::new();
        let gone = Uuid::new_v4();
        let product = Product::from_repository(
            Uuid::new_v4(),
            "Yerba".to_string(),
            "Yerba mate 1kg".to_string(),
            "YM-1".to_string(),
            4.5,
            10,
            "food".to_string(),
            None,
            vec![],
            true,
            vec![],
            Utc::now(),
        );
        cart.add_item(product.id, qty(2)).unwrap();
        cart.add_item(gone, qty(1)).unwrap();

        let details = CartDetails::assemble(cart, std::slice::from_ref(&product));

        assert_eq!(details.lines[0].product.as_ref().unwrap().id, product.id);
        assert!(details.lines[1].product.is_none());
        assert_eq!(details.total_price(), 9.0);
    }

    proptest! {
        #[test]
        fn adding_twice_merges_into_one_line(q1 in 1i64..10_000, q2 in 1i64..10_000) {
            let mut cart = Cart::new();
            let product_id = Uuid::new_v4();

            cart.add_item(product_id, qty(q1)).unwrap();
            cart.add_item(product_id, qty(q2)).unwrap();

            prop_assert_eq!(cart.items.len(), 1);
            prop_assert_eq!(i64::from(cart.items[0].quantity), q1 + q2);
        }

        #[test]
        fn adjusting_never_leaves_line_below_one(start in 1i64..100, delta in -200i32..200) {
            let mut cart = Cart::new();
            let product_id = Uuid::new_v4();
            cart.add_item(product_id, qty(start)).unwrap();

            let _ = cart.adjust_quantity(product_id, delta);

            prop_assert!(cart.find_item(product_id).unwrap().quantity >= 1);
        }
    }
}
