//! Gallery queries: categories, photo listing, lookup and search.

use std::cmp::Reverse;

use time::macros::format_description;
use time::Date;

use crate::models::{Category, Photo, PhotoListQuery, PhotoPage, PhotoSearchQuery, PhotoSummary};
use crate::store::SiteStore;

/// All categories in storage order.
pub fn list_categories(store: &dyn SiteStore) -> Vec<Category> {
    store.categories().to_vec()
}

/// Photos filtered by category, ordered by ascending id.
pub fn list_photos(store: &dyn SiteStore, query: &PhotoListQuery) -> PhotoPage {
    let mut photos: Vec<&Photo> = store
        .photos()
        .iter()
        .filter(|photo| {
            query
                .category_id
                .map_or(true, |category_id| photo.category_id == category_id)
        })
        .collect();

    photos.sort_by_key(|photo| photo.id);

    paginate(photos, query.page, query.page_size)
}

/// Exact id lookup.
pub fn get_photo(store: &dyn SiteStore, id: u32) -> Option<Photo> {
    store.photos().iter().find(|photo| photo.id == id).cloned()
}

/// Photos matching a text term and/or date range, most recent first.
///
/// Every supplied filter must match. Photos sharing a date keep their
/// storage order.
pub fn search_photos(store: &dyn SiteStore, query: &PhotoSearchQuery) -> PhotoPage {
    let term = query
        .search_term
        .as_deref()
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let start = query.start_date.as_deref().map(parse_date);
    let end = query.end_date.as_deref().map(parse_date);

    let mut matches: Vec<(Option<Date>, &Photo)> = store
        .photos()
        .iter()
        .map(|photo| (parse_date(&photo.date), photo))
        .filter(|(_, photo)| match &term {
            Some(term) => {
                photo.title.to_lowercase().contains(term)
                    || photo.description.to_lowercase().contains(term)
            }
            None => true,
        })
        .filter(|(date, _)| within_bound(*date, start, |date, bound| date >= bound))
        .filter(|(date, _)| within_bound(*date, end, |date, bound| date <= bound))
        .collect();

    // Stable; undated photos sort last.
    matches.sort_by_key(|(date, _)| Reverse(*date));

    let photos = matches.into_iter().map(|(_, photo)| photo).collect();
    paginate(photos, query.page, query.page_size)
}

/// `bound` is `None` when no bound was requested and `Some(None)` when
/// the requested bound did not parse, which matches nothing.
fn within_bound(
    date: Option<Date>,
    bound: Option<Option<Date>>,
    cmp: impl Fn(Date, Date) -> bool,
) -> bool {
    match bound {
        None => true,
        Some(Some(bound)) => date.is_some_and(|date| cmp(date, bound)),
        Some(None) => false,
    }
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(value: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).ok()
}

/// Slice one 1-based page out of `photos`.
///
/// Offsets past the end, page 0 and arithmetic overflow all yield an
/// empty page; `total` is always the unpaginated count.
fn paginate(photos: Vec<&Photo>, page: usize, page_size: usize) -> PhotoPage {
    let total = photos.len();

    let offset = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size));

    let items = match offset {
        Some(offset) => photos
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(PhotoSummary::from)
            .collect(),
        None => Vec::new(),
    };

    PhotoPage { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SiteData};

    fn seeded() -> MemoryStore {
        MemoryStore::seeded().expect("seed store")
    }

    fn photo(id: u32, title: &str, date: &str, category_id: u32) -> Photo {
        let category_name = format!("Category {category_id}");
        Photo {
            id,
            thumbnail_url: format!("/t/{id}.jpg"),
            full_size_url: format!("/f/{id}.jpg"),
            title: title.to_string(),
            description: format!("Description of {title}"),
            date: date.to_string(),
            category_id,
            category_name,
        }
    }

    fn store_with(photos: Vec<Photo>) -> MemoryStore {
        let mut categories: Vec<Category> = photos
            .iter()
            .map(|p| Category {
                id: p.category_id,
                name: p.category_name.clone(),
                description: String::new(),
                photo_count: 0,
            })
            .collect();
        categories.sort_by_key(|c| c.id);
        categories.dedup_by_key(|c| c.id);

        MemoryStore::new(SiteData {
            categories,
            photos,
            locations: Vec::new(),
        })
        .expect("valid test store")
    }

    fn ids(page: &PhotoPage) -> Vec<u32> {
        page.items.iter().map(|item| item.id).collect()
    }

    fn list(category_id: Option<u32>, page: usize, page_size: usize) -> PhotoListQuery {
        PhotoListQuery {
            category_id,
            page,
            page_size,
        }
    }

    fn search(term: Option<&str>, start: Option<&str>, end: Option<&str>) -> PhotoSearchQuery {
        PhotoSearchQuery {
            search_term: term.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            page: 1,
            page_size: 30,
        }
    }

    #[test]
    fn categories_keep_storage_order() {
        let names: Vec<String> = list_categories(&seeded())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ambiente", "Pratos", "Eventos", "Equipe"]);
    }

    #[test]
    fn list_photos_filters_by_category_and_sorts_by_id() {
        let store = store_with(vec![
            photo(9, "Nove", "2024-01-01", 1),
            photo(2, "Dois", "2024-01-02", 2),
            photo(4, "Quatro", "2024-01-03", 1),
            photo(1, "Um", "2024-01-04", 1),
        ]);

        let all = list_photos(&store, &list(None, 1, 30));
        assert_eq!(ids(&all), vec![1, 2, 4, 9]);
        assert_eq!(all.total, 4);

        let filtered = list_photos(&store, &list(Some(1), 1, 30));
        assert_eq!(ids(&filtered), vec![1, 4, 9]);
        assert_eq!(filtered.total, 3);
    }

    #[test]
    fn unknown_category_yields_empty_page() {
        let page = list_photos(&seeded(), &list(Some(42), 1, 30));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn second_page_of_two_returns_offsets_two_and_three() {
        let store = store_with(
            (1..=5)
                .map(|id| photo(id, "Prato", "2024-01-01", 1))
                .collect(),
        );

        let page = list_photos(&store, &list(None, 2, 2));
        assert_eq!(ids(&page), vec![3, 4]);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let store = seeded();

        let beyond = list_photos(&store, &list(None, 10, 30));
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 6);

        let zero = list_photos(&store, &list(None, 0, 30));
        assert!(zero.items.is_empty());
        assert_eq!(zero.total, 6);

        let huge = list_photos(&store, &list(None, usize::MAX, usize::MAX));
        assert!(huge.items.is_empty());

        let empty_size = list_photos(&store, &list(None, 1, 0));
        assert!(empty_size.items.is_empty());
        assert_eq!(empty_size.total, 6);
    }

    #[test]
    fn summaries_drop_detail_fields() {
        let page = list_photos(&seeded(), &list(Some(2), 1, 1));
        let value = serde_json::to_value(&page.items[0]).expect("serialize");

        assert_eq!(value["title"], "Fettuccine Alfredo");
        assert_eq!(value["categoryName"], "Pratos");
        assert!(value.get("description").is_none());
        assert!(value.get("date").is_none());
        assert!(value.get("fullSizeUrl").is_none());
    }

    #[test]
    fn get_photo_returns_stored_record_or_none() {
        let store = seeded();

        let photo = get_photo(&store, 3).expect("photo 3 exists");
        assert_eq!(&photo, &store.photos()[2]);

        assert!(get_photo(&store, 0).is_none());
        assert!(get_photo(&store, 999).is_none());
    }

    #[test]
    fn search_orders_by_date_descending() {
        let page = search_photos(&seeded(), &search(None, None, None));
        assert_eq!(ids(&page), vec![3, 6, 2, 5, 1, 4]);
        assert_eq!(page.total, 6);
    }

    #[test]
    fn search_keeps_storage_order_for_equal_dates() {
        let store = store_with(vec![
            photo(5, "A", "2024-03-01", 1),
            photo(2, "B", "2024-03-02", 1),
            photo(8, "C", "2024-03-01", 1),
            photo(1, "D", "2024-03-01", 1),
        ]);

        let page = search_photos(&store, &search(None, None, None));
        assert_eq!(ids(&page), vec![2, 5, 8, 1]);
    }

    #[test]
    fn search_term_matches_title_or_description_case_insensitively() {
        let store = seeded();

        let by_title = search_photos(&store, &search(Some("LASANHA"), None, None));
        assert_eq!(ids(&by_title), vec![6]);

        // "massas" appears only in the chef photo's description.
        let by_description = search_photos(&store, &search(Some("massas"), None, None));
        assert_eq!(ids(&by_description), vec![4]);

        let accented = search_photos(&store, &search(Some("salão"), None, None));
        assert_eq!(ids(&accented), vec![1]);

        let nothing = search_photos(&store, &search(Some("pizza"), None, None));
        assert!(nothing.items.is_empty());
        assert_eq!(nothing.total, 0);
    }

    #[test]
    fn date_bounds_are_inclusive_and_combined() {
        let store = seeded();

        let from = search_photos(&store, &search(None, Some("2024-01-20"), None));
        assert_eq!(ids(&from), vec![3, 6, 2]);

        let until = search_photos(&store, &search(None, None, Some("2024-01-15")));
        assert_eq!(ids(&until), vec![1, 4]);

        let window = search_photos(
            &store,
            &search(Some("molho"), Some("2024-01-18"), Some("2024-01-20")),
        );
        assert_eq!(ids(&window), vec![2]);
    }

    #[test]
    fn unparseable_bounds_match_nothing() {
        let store = seeded();

        let page = search_photos(&store, &search(None, Some("not-a-date"), None));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        let page = search_photos(&store, &search(None, None, Some("2024-13-45")));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn undated_photos_never_match_bounds_and_sort_last() {
        let store = store_with(vec![
            photo(1, "A", "sometime", 1),
            photo(2, "B", "2024-03-02", 1),
        ]);

        let all = search_photos(&store, &search(None, None, None));
        assert_eq!(ids(&all), vec![2, 1]);

        let bounded = search_photos(&store, &search(None, Some("2000-01-01"), None));
        assert_eq!(ids(&bounded), vec![2]);
    }

    #[test]
    fn search_total_counts_all_matches_before_paging() {
        let mut query = search(None, None, None);
        query.page = 2;
        query.page_size = 4;

        let page = search_photos(&seeded(), &query);
        assert_eq!(ids(&page), vec![1, 4]);
        assert_eq!(page.total, 6);
    }

    #[test]
    fn empty_search_term_is_ignored() {
        let page = search_photos(&seeded(), &search(Some(""), None, None));
        assert_eq!(page.total, 6);
    }
}
