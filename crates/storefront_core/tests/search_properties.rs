use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config;
use storefront_core::{
    ErrorInfo, ErrorKind, Generation, Page, Product, SearchCriteria, SearchSession, SearchStatus,
};

const PAGE_SIZE: u32 = 5;

fn product(id: u16) -> Product {
    Product::new(format!("p{id}"), format!("Product {id}"), u64::from(id) * 10)
}

fn start() -> (SearchSession, u32) {
    let criteria = SearchCriteria::new("tea").with_page_size(PAGE_SIZE);
    let (session, request) = SearchSession::start(criteria, Generation::new(7));
    (session, request.page)
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn accumulated_ids_stay_unique(
        pages in prop::collection::vec(prop::collection::vec(0_u16..40, 0..=PAGE_SIZE as usize), 1..8)
    ) {
        let (mut session, mut next_page) = start();
        let generation = session.generation();
        for ids in pages {
            let items = ids.into_iter().map(product).collect();
            session.apply_success(generation, Page::new(next_page, items));
            match session.load_more() {
                Some(request) => next_page = request.page,
                None => break,
            }
        }

        let mut seen = HashSet::new();
        for item in session.items() {
            prop_assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        }
    }

    #[test]
    fn full_pages_load_contiguously(
        cycles in 0_u32..10,
        overlap in 0_u16..PAGE_SIZE as u16
    ) {
        let (mut session, first) = start();
        let generation = session.generation();
        let full_page = |page: u32| -> Vec<Product> {
            // Each page repeats `overlap` ids of the previous one but is never short.
            let base = (page as u16 - 1) * (PAGE_SIZE as u16 - overlap);
            (base..base + PAGE_SIZE as u16).map(product).collect()
        };

        session.apply_success(generation, Page::new(first, full_page(first)));
        for _ in 0..cycles {
            let request = session.load_more().expect("idle after a full page");
            prop_assert_eq!(request.page, session.highest_loaded_page() + 1);
            session.apply_success(generation, Page::new(request.page, full_page(request.page)));
        }

        prop_assert_eq!(session.highest_loaded_page(), 1 + cycles);
        prop_assert_eq!(session.status(), SearchStatus::Idle);
        prop_assert!(session.has_more());
    }

    #[test]
    fn superseded_generation_never_mutates(
        ids in prop::collection::vec(0_u16..40, 0..=PAGE_SIZE as usize),
        fail in any::<bool>(),
        page in 1_u32..4
    ) {
        let (mut session, _) = start();
        let before = session.clone();
        let old = Generation::new(session.generation().value() - 1);

        if fail {
            session.apply_failure(old, page, ErrorInfo::new(ErrorKind::Timeout, "late"));
        } else {
            let items = ids.into_iter().map(product).collect();
            session.apply_success(old, Page::new(page, items));
        }

        prop_assert_eq!(session, before);
    }
}
