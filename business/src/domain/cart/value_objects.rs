use super::errors::CartError;

/// A line-item quantity: a positive count that fits the stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    pub const MIN: i32 = 1;

    pub fn new(value: i64) -> Result<Self, CartError> {
        i32::try_from(value)
            .ok()
            .filter(|v| *v >= Self::MIN)
            .map(Self)
            .ok_or(CartError::InvalidQuantity)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_one() {
        assert_eq!(Quantity::default().value(), 1);
    }

    #[test]
    fn should_reject_zero_and_negative() {
        assert!(matches!(Quantity::new(0), Err(CartError::InvalidQuantity)));
        assert!(matches!(Quantity::new(-5), Err(CartError::InvalidQuantity)));
    }

    #[test]
    fn should_reject_values_beyond_column_range() {
        assert!(Quantity::new(i64::from(i32::MAX)).is_ok());
        assert!(matches!(
            Quantity::new(i64::from(i32::MAX) + 1),
            Err(CartError::InvalidQuantity)
        ));
    }
}
