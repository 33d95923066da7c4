use serde::Serialize;

/// Page size substituted when the caller sends no limit (or a non-positive one).
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard ceiling on the page size a caller may request.
pub const MAX_LIMIT: i64 = 1000;

/// Normalized pagination metadata for a paged query.
///
/// Built once per request from the caller's raw `limit`/`page` and the total
/// row count reported by the repository. `offset` is consumed by the query
/// layer and never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginate {
    pub limit: i64,
    pub page: i64,
    pub total_page: i64,
    pub total_data: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<i64>,
    #[serde(skip)]
    pub offset: i64,
}

impl Paginate {
    /// Derive pagination metadata from untrusted `limit`/`page` input.
    ///
    /// Malformed input is coerced, never rejected: `limit <= 0` falls back to
    /// [`DEFAULT_LIMIT`], `limit > MAX_LIMIT` clamps to [`MAX_LIMIT`], and
    /// `page <= 0` becomes 1. `total_data` is trusted to be non-negative;
    /// the repository supplying it owns that guarantee.
    pub fn new(raw_limit: i64, raw_page: i64, total_data: i64) -> Self {
        let limit = if raw_limit > MAX_LIMIT {
            MAX_LIMIT
        } else if raw_limit <= 0 {
            DEFAULT_LIMIT
        } else {
            raw_limit
        };

        let page = if raw_page > 0 { raw_page } else { 1 };

        // Exact integer ceiling; float division would drift on large counts.
        let total_page = (total_data + limit - 1) / limit;

        let next_page = if total_page > page { Some(page + 1) } else { None };
        let prev_page = if page > 1 { Some(page - 1) } else { None };

        Self {
            limit,
            page,
            total_page,
            total_data,
            next_page,
            prev_page,
            offset: (page - 1) * limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_above_cap_clamps() {
        for raw in [1001, 5000, i64::MAX - 1] {
            assert_eq!(Paginate::new(raw, 1, 10).limit, MAX_LIMIT);
        }
    }

    #[test]
    fn limit_zero_or_negative_defaults() {
        for raw in [0, -1, -500, i64::MIN + 1] {
            assert_eq!(Paginate::new(raw, 1, 10).limit, DEFAULT_LIMIT);
        }
    }

    #[test]
    fn limit_in_range_kept() {
        for raw in [1, 10, 999, 1000] {
            assert_eq!(Paginate::new(raw, 1, 10).limit, raw);
        }
    }

    #[test]
    fn page_floor_is_one() {
        for raw in [0, -1, -42] {
            assert_eq!(Paginate::new(10, raw, 10).page, 1);
        }
        assert_eq!(Paginate::new(10, 7, 10).page, 7);
    }

    #[test]
    fn total_page_is_exact_ceiling() {
        for (total, limit, expected) in [
            (0, 10, 0),
            (1, 10, 1),
            (10, 10, 1),
            (11, 10, 2),
            (95, 20, 5),
            (100, 20, 5),
            (101, 20, 6),
            (999, 1000, 1),
            (1000, 1000, 1),
            (1001, 1000, 2),
        ] {
            let p = Paginate::new(limit, 1, total);
            assert_eq!(p.total_page, expected, "total={} limit={}", total, limit);
            if p.total_page > 0 {
                assert!(p.total_page * p.limit >= p.total_data);
                assert!((p.total_page - 1) * p.limit < p.total_data);
            }
        }
    }

    #[test]
    fn next_page_present_only_below_total() {
        let p = Paginate::new(10, 1, 25);
        assert_eq!(p.next_page, Some(2));
        let p = Paginate::new(10, 3, 25);
        assert_eq!(p.next_page, None);
        // Pages past the end still get no pointer.
        let p = Paginate::new(10, 9, 25);
        assert_eq!(p.next_page, None);
    }

    #[test]
    fn prev_page_present_only_past_first() {
        assert_eq!(Paginate::new(10, 1, 25).prev_page, None);
        assert_eq!(Paginate::new(10, 2, 25).prev_page, Some(1));
        assert_eq!(Paginate::new(10, 9, 25).prev_page, Some(8));
    }

    #[test]
    fn offset_skips_previous_pages() {
        for (limit, page) in [(10, 1), (10, 4), (25, 3), (1000, 2)] {
            let p = Paginate::new(limit, page, 10_000);
            assert_eq!(p.offset, (p.page - 1) * p.limit);
        }
        assert_eq!(Paginate::new(0, 0, 5).offset, 0);
    }

    #[test]
    fn recomputation_is_stable() {
        let a = Paginate::new(17, 3, 400);
        let b = Paginate::new(17, 3, 400);
        assert_eq!(a, b);
    }

    #[test]
    fn typical_mid_collection_page() {
        let p = Paginate::new(20, 2, 95);
        assert_eq!(p.limit, 20);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_page, 5);
        assert_eq!(p.offset, 20);
        assert_eq!(p.next_page, Some(3));
        assert_eq!(p.prev_page, Some(1));
    }

    #[test]
    fn absent_params_fall_back_to_defaults() {
        let p = Paginate::new(0, 0, 5);
        assert_eq!(p.limit, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_page, 1);
        assert_eq!(p.offset, 0);
        assert_eq!(p.next_page, None);
        assert_eq!(p.prev_page, None);
    }

    #[test]
    fn oversized_limit_on_empty_collection() {
        let p = Paginate::new(5000, 1, 0);
        assert_eq!(p.limit, 1000);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_page, 0);
        assert_eq!(p.offset, 0);
        assert_eq!(p.next_page, None);
        assert_eq!(p.prev_page, None);
    }

    #[test]
    fn last_partial_page() {
        let p = Paginate::new(10, 5, 42);
        assert_eq!(p.limit, 10);
        assert_eq!(p.page, 5);
        assert_eq!(p.total_page, 5);
        assert_eq!(p.offset, 40);
        assert_eq!(p.next_page, None);
        assert_eq!(p.prev_page, Some(4));
    }

    #[test]
    fn wire_shape_omits_absent_pointers_and_offset() {
        let v = serde_json::to_value(Paginate::new(10, 1, 5)).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("limit"), Some(&serde_json::json!(10)));
        assert_eq!(obj.get("page"), Some(&serde_json::json!(1)));
        assert_eq!(obj.get("total_page"), Some(&serde_json::json!(1)));
        assert_eq!(obj.get("total_data"), Some(&serde_json::json!(5)));
        assert!(!obj.contains_key("next_page"));
        assert!(!obj.contains_key("prev_page"));
        assert!(!obj.contains_key("offset"));

        let v = serde_json::to_value(Paginate::new(10, 2, 35)).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("next_page"), Some(&serde_json::json!(3)));
        assert_eq!(obj.get("prev_page"), Some(&serde_json::json!(1)));
    }
}
