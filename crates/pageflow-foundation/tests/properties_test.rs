//! Invariants that hold across arbitrary sequences of entrances and responses.

use pageflow_testing::prelude::*;

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

const MAX_PAGE: i32 = 8;
const PAGE_SIZE: u32 = 4;

/// Page contents of a stable upstream list: page `p` holds `p * 4 .. p * 4 + 4`.
fn page_items(page: i32) -> Vec<u32> {
    if !(0..MAX_PAGE).contains(&page) {
        return Vec::new();
    }
    let start = page as u32 * PAGE_SIZE;
    (start..start + PAGE_SIZE).collect()
}

fn assert_dividers(rule: &ContentTestRule<u32>) {
    let content = rule.content();
    let dividers = content.dividers();
    assert_eq!(
        dividers.len() as i32,
        content.end_page() - content.begin_page(),
        "one divider per page"
    );
    if let Some(last) = dividers.last() {
        assert_eq!(*last, content.len());
    }
    assert!(dividers.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn random_sessions_keep_dividers_consistent() {
    for seed in 1..40 {
        let mut rng = Lcg(seed);
        let mut rule = ContentTestRule::new();
        let mut issued: Vec<PageRequest> = Vec::new();

        for _ in 0..60 {
            match rng.below(7) {
                0 => issued.push(rule.content_mut().go_to(rng.below(MAX_PAGE as u64) as i32).expect("page is loadable")),
                1 if rule.content().window().has_pages() => {
                    issued.push(rule.content_mut().next_page(false).expect("page is loadable"))
                }
                2 if rule.content().window().has_pages() => {
                    issued.push(rule.content_mut().prev_page(false).expect("page is loadable"))
                }
                3 if rule.content().window().has_pages() => {
                    let page = rule.content().begin_page();
                    if let Ok(request) = rule.content_mut().refresh_page(page) {
                        issued.push(request);
                    }
                }
                4 if !issued.is_empty() => {
                    // Answer any request ever issued, most of them stale.
                    let request = issued[rng.below(issued.len() as u64) as usize];
                    let current = rule.content().pending_request().copied();
                    let applied =
                        rule.respond_to(&request, page_items(request.page()), 0, MAX_PAGE);
                    assert_eq!(applied, current == Some(request));
                }
                5 if !issued.is_empty() => {
                    let request = issued[rng.below(issued.len() as u64) as usize];
                    let current = rule.content().pending_request().copied();
                    let applied = rule
                        .content_mut()
                        .apply_error(request.id(), ContentError::loader("flaky"));
                    assert_eq!(applied, current == Some(request));
                }
                _ => {
                    rule.content_mut().on_reach_bottom();
                }
            }
            assert_dividers(&rule);
        }
    }
}

#[test]
fn stale_responses_change_nothing() {
    let mut rule = ContentTestRule::new();
    rule.content_mut().go_to(0).expect("page is loadable");
    rule.respond(page_items(0), 0, MAX_PAGE);
    let stale = rule.content_mut().next_page(false).expect("page is loadable");
    rule.content_mut().go_to(3).expect("page is loadable");
    rule.take_events();

    let items = rule.content().items().to_vec();
    let dividers = rule.content().dividers().to_vec();

    assert!(!rule.respond_to(&stale, page_items(1), 0, MAX_PAGE));
    assert!(!rule.content_mut().apply_error(stale.id(), ContentError::NotFound));

    assert_eq!(rule.content().items(), items.as_slice());
    assert_eq!(rule.content().dividers(), dividers.as_slice());
    assert!(rule.take_events().is_empty());
}

#[test]
fn only_one_request_is_ever_current() {
    let mut rule = ContentTestRule::<u32>::new();
    let requests = [
        rule.content_mut().go_to(0).expect("page is loadable"),
        rule.content_mut().go_to(1).expect("page is loadable"),
        rule.content_mut().next_page(true).expect("page is loadable"),
        rule.content_mut().prev_page(true).expect("page is loadable"),
    ];

    for (index, request) in requests.iter().enumerate() {
        let current = rule.content().pending_request() == Some(request);
        assert_eq!(current, index == requests.len() - 1);
    }
    let ids: Vec<_> = requests.iter().map(PageRequest::id).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn seam_duplicates_within_range_are_dropped() {
    let config = ContentConfig::default().with_duplicates_check_range(2);
    let mut rule = ContentTestRule::with_config(config);
    rule.content_mut().go_to(0).expect("page is loadable");
    rule.respond(vec![1, 2, 3, 4, 5, 6], 0, 3);

    rule.content_mut().next_page(false).expect("page is loadable");
    // 5 and 6 sit within two positions of the seam, 1 does not.
    rule.respond(vec![5, 6, 7, 1], 0, 3);

    assert_eq!(rule.content().items(), &[1, 2, 3, 4, 5, 6, 7, 1]);

    rule.content_mut().prev_page(false).expect("page is loadable");
    assert_eq!(rule.last_request().page(), -1);
    rule.respond(vec![0, 2, 1], -1, 3);

    assert_eq!(rule.content().items(), &[0, 1, 2, 3, 4, 5, 6, 7, 1]);
    assert_eq!(rule.content().dividers(), &[1, 7, 9]);
}

#[test]
fn refresh_with_identical_items_changes_in_place() {
    let mut rule = ContentTestRule::new();
    rule.content_mut().go_to(2).expect("page is loadable");
    rule.respond(page_items(2), 0, MAX_PAGE);
    rule.content_mut().next_page(false).expect("page is loadable");
    rule.respond(page_items(3), 0, MAX_PAGE);
    rule.take_events();

    let items = rule.content().items().to_vec();
    let dividers = rule.content().dividers().to_vec();

    rule.content_mut().refresh_page(3).expect("page 3 is loaded");
    rule.respond(page_items(3), 0, MAX_PAGE);

    assert_eq!(
        rule.take_mutations(),
        vec![ContentEvent::ChangeRange { start: 4, count: 4 }]
    );
    assert_eq!(rule.content().items(), items.as_slice());
    assert_eq!(rule.content().dividers(), dividers.as_slice());
    assert_eq!(rule.content().begin_page(), 2);
    assert_eq!(rule.content().end_page(), 4);
}

#[test]
fn go_to_then_refresh_round_trip() {
    let mut rule = ContentTestRule::new();
    rule.content_mut().go_to(0).expect("page is loadable");
    rule.respond(vec!["a", "b", "c"], 0, 1);
    rule.take_events();

    rule.content_mut().refresh_page(0).expect("page 0 is loaded");
    rule.respond(vec!["a", "b", "c"], 0, 1);

    assert_eq!(
        rule.take_mutations(),
        vec![ContentEvent::ChangeRange { start: 0, count: 3 }]
    );
    assert_eq!(rule.content().items(), &["a", "b", "c"]);
    assert_eq!(rule.content().dividers(), &[3]);
}

#[test]
fn empty_first_page_is_idempotent() {
    let mut rule = ContentTestRule::<u32>::new();

    for _ in 0..2 {
        rule.content_mut().go_to(0).expect("page is loadable");
        rule.respond(Vec::new(), 0, 1);

        let events = rule.take_events();
        assert!(events.iter().all(|event| !event.is_mutation()));
        assert_eq!(
            events.last(),
            Some(&ContentEvent::ShowBlockingError(ContentError::NotFound))
        );
        assert_eq!(
            rule.content().view_state().display(),
            &DisplayMode::Tip(ContentError::NotFound)
        );
    }
}

/// Pages `[1, 2, 3]`, `[4, 5, 6]` and `[7, 8, 9]`, events drained.
fn three_loaded_pages(config: ContentConfig) -> ContentTestRule<u32> {
    let mut rule = ContentTestRule::with_config(config);
    rule.content_mut().go_to(0).expect("page is loadable");
    rule.respond(vec![1, 2, 3], 0, 3);
    for page in [vec![4, 5, 6], vec![7, 8, 9]] {
        rule.content_mut().next_page(false).expect("page is loadable");
        rule.respond(page, 0, 3);
    }
    rule.take_events();
    rule
}

#[test]
fn refresh_drops_duplicates_of_both_neighbours() {
    let mut rule = three_loaded_pages(ContentConfig::default());

    rule.content_mut().refresh_page(1).expect("page 1 is loaded");
    rule.respond(vec![3, 4, 5, 6, 7], 0, 3);

    assert_eq!(rule.content().items(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(rule.content().dividers(), &[3, 6, 9]);
    assert_eq!(
        rule.take_mutations(),
        vec![ContentEvent::ChangeRange { start: 3, count: 3 }]
    );
}

#[test]
fn refresh_keeps_duplicates_beyond_check_range() {
    let config = ContentConfig::default().with_duplicates_check_range(1);
    let mut rule = three_loaded_pages(config);

    rule.content_mut().refresh_page(1).expect("page 1 is loaded");
    // Only 3 and 7 border the slice; 2 and 8 sit two positions away.
    rule.respond(vec![2, 3, 4, 5, 7, 8], 0, 3);

    assert_eq!(rule.content().items(), &[1, 2, 3, 2, 4, 5, 8, 7, 8, 9]);
    assert_eq!(rule.content().dividers(), &[3, 7, 10]);
    assert_eq!(
        rule.take_mutations(),
        vec![
            ContentEvent::ChangeRange { start: 3, count: 3 },
            ContentEvent::InsertRange { start: 6, count: 1 },
        ]
    );
}
