use super::model::Product;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Page number and size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Builds a request from raw query-string values.
    ///
    /// Malformed input is coerced instead of rejected: a leading integer is
    /// honoured (`"3abc"` -> 3), anything below 1 becomes 1 and text without
    /// digits falls back to the default.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: coerce_positive(page, DEFAULT_PAGE),
            limit: coerce_positive(limit, DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn coerce_positive(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    match leading_integer(raw) {
        Some(value) if value < 1 => 1,
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
        None => default,
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
}

impl PriceSort {
    /// Only `asc` and `desc` select an order; anything else leaves the list unsorted.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("asc") => Some(PriceSort::Ascending),
            Some("desc") => Some(PriceSort::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSort::Ascending => "asc",
            PriceSort::Descending => "desc",
        }
    }
}

/// Free-text filter matched against the category or the availability label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub text: String,
}

impl ProductFilter {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.filter(|text| !text.is_empty()).map(|text| Self {
            text: text.to_string(),
        })
    }

    /// The status value this filter selects, when it names an availability label.
    pub fn status(&self) -> Option<bool> {
        match self.text.as_str() {
            "available" => Some(true),
            "unavailable" => Some(false),
            _ => None,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        product.category == self.text || self.status() == Some(product.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    pub page: PageRequest,
    pub filter: Option<ProductFilter>,
    pub sort: Option<PriceSort>,
}

/// One page of results plus what is needed to describe its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_items,
            page: request.page,
            limit: request.limit,
        }
    }

    /// Never less than 1, even for an empty catalog.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(self.limit)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev_page().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.page + 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn should_default_when_values_absent() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
    }

    #[test]
    fn should_coerce_malformed_numbers() {
        assert_eq!(PageRequest::parse(Some("abc"), Some("")).page, DEFAULT_PAGE);
        assert_eq!(PageRequest::parse(Some("abc"), Some("")).limit, DEFAULT_LIMIT);
        assert_eq!(PageRequest::parse(Some("3abc"), None).page, 3);
        assert_eq!(PageRequest::parse(Some("0"), Some("-4")).page, 1);
        assert_eq!(PageRequest::parse(Some("0"), Some("-4")).limit, 1);
    }

    #[test]
    fn should_describe_first_page_of_five_items() {
        let page = Page::new(vec![1, 2], 5, PageRequest { page: 1, limit: 2 });

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next_page());
        assert_eq!(page.next_page(), Some(2));
        assert!(!page.has_prev_page());
        assert_eq!(page.prev_page(), None);
    }

    #[test]
    fn should_report_single_page_for_empty_catalog() {
        let page: Page<i32> = Page::new(vec![], 0, PageRequest::default());

        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next_page());
    }

    #[test]
    fn should_parse_sort_tokens() {
        assert_eq!(PriceSort::parse(Some("asc")), Some(PriceSort::Ascending));
        assert_eq!(PriceSort::parse(Some("desc")), Some(PriceSort::Descending));
        assert_eq!(PriceSort::parse(Some("price")), None);
    }

    #[test]
    fn should_map_availability_labels_to_status() {
        let available = ProductFilter::parse(Some("available")).unwrap();
        let category = ProductFilter::parse(Some("books")).unwrap();

        assert_eq!(available.status(), Some(true));
        assert_eq!(category.status(), None);
        assert!(ProductFilter::parse(Some("")).is_none());
    }

    proptest! {
        #[test]
        fn page_request_is_always_positive(page in ".*", limit in ".*") {
            let request = PageRequest::parse(Some(&page), Some(&limit));
            prop_assert!(request.page >= 1);
            prop_assert!(request.limit >= 1);
        }

        #[test]
        fn pages_cover_every_item(total in 0u64..10_000, limit in 1u32..200) {
            let page: Page<()> = Page::new(vec![], total, PageRequest { page: 1, limit });
            let capacity = u64::from(page.total_pages()) * u64::from(limit);
            prop_assert!(capacity >= total);
            prop_assert!(capacity < total + u64::from(limit) || total == 0);
        }
    }
}
