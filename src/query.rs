//! Pure query engine: substring filtering and slice-based pagination over a
//! borrowed collection. No I/O happens here.

use crate::models::{Item, ListItemsQuery, Page};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Normalized pagination parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParams {
    pub q: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl PageParams {
    pub fn new(q: Option<&str>, page: usize, limit: usize) -> Self {
        Self {
            q: q.filter(|q| !q.is_empty()).map(str::to_owned),
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

impl From<&ListItemsQuery> for PageParams {
    fn from(raw: &ListItemsQuery) -> Self {
        Self {
            q: raw
                .q
                .as_deref()
                .filter(|q| !q.is_empty())
                .map(str::to_lowercase),
            page: coerce(raw.page.as_deref(), DEFAULT_PAGE),
            limit: coerce(raw.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// Non-numeric or zero input falls back to the default; negative values
/// clamp to 1.
fn coerce(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(|raw| raw.trim().parse::<i64>().ok()) {
        None | Some(0) => default,
        Some(n) if n < 0 => 1,
        Some(n) => n as usize,
    }
}

/// Filters by case-insensitive substring match on `name` (when `q` is set)
/// and slices out the requested page. An out-of-range page yields an empty
/// `items` vector with valid metadata, not an error.
pub fn paginate(collection: &[Item], params: &PageParams) -> Page {
    let filtered: Vec<&Item> = match params.q.as_deref() {
        Some(q) => {
            let needle = q.to_lowercase();
            collection
                .iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .collect()
        }
        None => collection.iter().collect(),
    };

    let total = filtered.len();
    let total_pages = std::cmp::max(1, total.div_ceil(params.limit));
    let start = (params.page - 1).saturating_mul(params.limit);

    let items = filtered
        .into_iter()
        .skip(start)
        .take(params.limit)
        .cloned()
        .collect();

    Page {
        items,
        page: params.page,
        limit: params.limit,
        total,
        total_pages,
    }
}

pub fn find_by_id(collection: &[Item], id: i64) -> Option<&Item> {
    collection.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: f64) -> Item {
        Item {
            id,
            name: name.to_string(),
            category: None,
            price: Some(price),
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            item(1, "Laptop Pro", 2499.0),
            item(2, "Office Chair", 180.0),
            item(3, "Gaming Chair", 320.0),
            item(4, "Desk Lamp", 45.0),
            item(5, "Monitor", 600.0),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let page = paginate(&catalog(), &PageParams::new(Some("chair"), 1, 20));
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].name, "Office Chair");
        assert_eq!(page.items[1].name, "Gaming Chair");
    }

    #[test]
    fn laptop_scenario_returns_full_envelope() {
        let store = vec![item(1, "Laptop Pro", 2499.0)];
        let page = paginate(&store, &PageParams::new(Some("laptop"), 1, 20));
        assert_eq!(
            page,
            Page {
                items: store.clone(),
                page: 1,
                limit: 20,
                total: 1,
                total_pages: 1,
            }
        );
    }

    #[test]
    fn pagination_metadata_law_holds() {
        let items = catalog();
        for limit in 1..=6 {
            for page in 1..=4 {
                let result = paginate(&items, &PageParams::new(None, page, limit));
                assert_eq!(result.total_pages, std::cmp::max(1, items.len().div_ceil(limit)));
                assert!(result.items.len() <= limit);
            }
        }
    }

    #[test]
    fn slicing_respects_page_boundaries() {
        let page = paginate(&catalog(), &PageParams::new(None, 2, 2));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 3);
        assert_eq!(page.items[1].id, 4);
    }

    #[test]
    fn out_of_range_page_is_empty_but_valid() {
        let page = paginate(&catalog(), &PageParams::new(None, 99, 20));
        assert!(page.items.is_empty());
        assert_eq!(page.page, 99);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let page = paginate(&[], &PageParams::new(None, 1, 20));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn invalid_page_and_limit_coerce_to_defaults() {
        let raw = ListItemsQuery {
            q: None,
            page: Some("abc".to_string()),
            limit: Some("".to_string()),
        };
        let params = PageParams::from(&raw);
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn zero_and_negative_values_clamp() {
        assert_eq!(coerce(Some("0"), 20), 20);
        assert_eq!(coerce(Some("-3"), 20), 1);
        assert_eq!(coerce(Some("7"), 20), 7);
        assert_eq!(coerce(None, 1), 1);
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let items = catalog();
        assert_eq!(find_by_id(&items, 3).map(|i| i.name.as_str()), Some("Gaming Chair"));
        assert!(find_by_id(&items, 99_999_999).is_none());
    }
}
