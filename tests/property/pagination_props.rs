//! Search pagination properties

use proptest::prelude::*;
use studentnest::shared::listing::PropertyQuery;

proptest! {
    #[test]
    fn limit_is_always_clamped(limit in proptest::option::of(any::<u32>())) {
        let query = PropertyQuery { limit, ..Default::default() };
        let effective = query.limit();
        prop_assert!((1..=PropertyQuery::MAX_LIMIT).contains(&effective));
        if limit.is_none() {
            prop_assert_eq!(effective, PropertyQuery::DEFAULT_LIMIT);
        }
    }

    #[test]
    fn offset_follows_page_and_limit(page in 0u32..1000, limit in 1u32..=50) {
        let query = PropertyQuery { page: Some(page), limit: Some(limit), ..Default::default() };
        prop_assert_eq!(query.page(), page.max(1));
        prop_assert_eq!(query.offset(), i64::from(page.max(1) - 1) * i64::from(limit));
    }

    #[test]
    fn offset_never_overflows(page in any::<u32>(), limit in proptest::option::of(any::<u32>())) {
        let query = PropertyQuery { page: Some(page), limit, ..Default::default() };
        prop_assert!(query.offset() >= 0);
    }
}

#[test]
fn last_representable_page_has_finite_offset() {
    let query = PropertyQuery { page: Some(u32::MAX), limit: Some(50), ..Default::default() };
    assert_eq!(query.offset(), i64::from(u32::MAX - 1) * 50);
}
