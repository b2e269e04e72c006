use postfeed_core::collection::matches_query;
use postfeed_core::error::DETAIL_LOAD_FAILED;
use postfeed_core::memory::MemorySource;
use postfeed_core::{
    CollectionController, Comment, DetailController, DetailView, PhraseTable, Post,
};
use pretty_assertions::assert_eq;

const WORDS: &[&str] = &[
    "sunt", "aut", "facere", "repellat", "provident", "occaecati", "quia", "et", "suscipit",
    "recusandae", "consequuntur", "expedita", "qui", "est", "esse", "rerum", "tempore", "vitae",
    "dolorem", "eum",
];

/// One hundred posts with deterministic placeholder text, ten per user.
fn fixture_posts() -> Vec<Post> {
    (1..=100u64)
        .map(|id| {
            let word = |offset: u64| WORDS[((id * 7 + offset * 3) % WORDS.len() as u64) as usize];
            Post {
                id,
                user_id: (id - 1) / 10 + 1,
                title: format!("{} {} {}", word(0), word(1), word(2)),
                body: format!("{} {}\n{} {}", word(3), word(4), word(5), word(6)),
            }
        })
        .collect()
}

fn fixture_comments() -> Vec<Comment> {
    (1..=100u64)
        .flat_map(|post_id| {
            (0..5u64).map(move |n| Comment {
                id: (post_id - 1) * 5 + n + 1,
                post_id,
                name: format!("quia et {n}"),
                email: format!("reader{n}@example.com"),
                body: "est rerum tempore".to_string(),
            })
        })
        .collect()
}

fn fixture() -> MemorySource {
    MemorySource::new(fixture_posts(), fixture_comments())
}

fn assert_prefix_invariant(feed: &CollectionController) {
    let expected = (feed.page() * feed.page_size()).min(feed.filtered_len());
    assert_eq!(feed.items().len(), expected);
    assert_eq!(feed.has_more(), feed.filtered_len() > feed.items().len());
}

#[test]
fn full_feed_pages_through_to_the_end() {
    let source = fixture();
    let mut feed = CollectionController::new(12);
    feed.initialize(&source);

    assert_eq!(feed.items().len(), 12);
    assert!(feed.has_more());

    for _ in 0..8 {
        assert!(feed.load_more());
        assert_prefix_invariant(&feed);
    }
    assert_eq!(feed.items().len(), 100);
    assert!(!feed.has_more());

    assert!(!feed.load_more());
    assert_eq!(feed.items().len(), 100);
    assert_eq!(feed.items(), &fixture_posts()[..]);
}

#[test]
fn collection_is_fetched_once() {
    let source = fixture();
    let mut feed = CollectionController::new(12);
    feed.initialize(&source);
    feed.set_search_query("quia");
    feed.load_more();
    feed.initialize(&source);
    assert_eq!(source.list_calls(), 1);
}

#[test]
fn search_filters_and_resets_pagination() {
    let source = fixture();
    let mut feed = CollectionController::new(12);
    feed.initialize(&source);
    feed.load_more();
    feed.load_more();

    feed.set_search_query("QUIA");
    assert_eq!(feed.page(), 1);
    assert_prefix_invariant(&feed);

    let all = fixture_posts();
    let matching: Vec<Post> = all
        .iter()
        .filter(|post| post.title.contains("quia") || post.body.contains("quia"))
        .cloned()
        .collect();
    assert_eq!(feed.filtered_len(), matching.len());
    assert_eq!(feed.items(), &matching[..12]);
    for post in all.iter().filter(|post| !matching.contains(post)) {
        assert!(!matches_query(post, "quia"), "post {} should not match", post.id);
    }

    feed.set_search_query("no such words anywhere");
    assert!(feed.items().is_empty());
    assert!(!feed.has_more());
    assert!(!feed.load_more());
    assert_eq!(feed.error(), None);
}

#[test]
fn narrow_search_fits_on_one_page() {
    let source = fixture();
    let mut feed = CollectionController::new(12);
    feed.initialize(&source);
    for _ in 0..3 {
        feed.load_more();
    }

    feed.set_search_query("ET Consequuntur EST");
    let expected: Vec<Post> = fixture_posts()
        .into_iter()
        .filter(|post| [1, 21, 41, 61, 81].contains(&post.id))
        .collect();
    assert_eq!(feed.filtered_len(), 5);
    assert_eq!(feed.items(), &expected[..]);
    assert!(!feed.has_more());
    assert!(!feed.load_more());
    assert_eq!(feed.items().len(), 5);
    assert_eq!(feed.page(), 1);
    for post in fixture_posts().iter().filter(|post| !expected.contains(post)) {
        assert!(!matches_query(post, "et consequuntur est"), "post {} matched", post.id);
    }
}

#[test]
fn failed_listing_leaves_an_empty_feed() {
    let source = fixture().failing_posts();
    let mut feed = CollectionController::new(12);
    feed.initialize(&source);
    assert!(feed.error().is_some());
    assert!(feed.items().is_empty());
    assert!(!feed.is_loading());
}

#[test]
fn detail_loads_post_with_comments() {
    let source = fixture();
    let table = PhraseTable::builtin();
    let mut detail = DetailController::new();
    detail.load(&source, 42, &table);

    match detail.view() {
        DetailView::Ready { post, comments, is_translated } => {
            assert_eq!(post.id, 42);
            assert_eq!(comments.len(), 5);
            assert!(comments.iter().all(|comment| comment.post_id == 42));
            assert!(!is_translated);
        }
        other => panic!("unexpected view {other:?}"),
    }

    detail.toggle_translation();
    match detail.view() {
        DetailView::Ready { comments, is_translated, .. } => {
            assert!(is_translated);
            assert_eq!(comments[0].body, "есть вещей временем");
            assert_eq!(comments[0].email, "reader0@example.com");
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn unknown_post_is_not_found() {
    let source = fixture();
    let mut detail = DetailController::new();
    detail.load(&source, 1000, &PhraseTable::builtin());
    assert_eq!(detail.view(), DetailView::NotFound);
}

#[test]
fn comment_failure_hides_the_post() {
    let source = fixture().failing_comments();
    let mut detail = DetailController::new();
    detail.load(&source, 1, &PhraseTable::builtin());
    assert_eq!(detail.view(), DetailView::Failed(DETAIL_LOAD_FAILED));
    assert!(detail.data().is_none());
}

#[test]
fn post_failure_is_generic_error() {
    let source = fixture().failing_post();
    let mut detail = DetailController::new();
    detail.load(&source, 1, &PhraseTable::builtin());
    assert_eq!(detail.view(), DetailView::Failed(DETAIL_LOAD_FAILED));
}

#[test]
fn navigating_between_posts_reloads() {
    let source = fixture();
    let table = PhraseTable::builtin();
    let mut detail = DetailController::new();
    detail.load(&source, 1, &table);
    detail.load(&source, 2, &table);
    assert_eq!(detail.post_id(), Some(2));
    assert_eq!(detail.data().map(|data| data.post.id), Some(2));
}
