use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pageflow_foundation::{PageRequest, PageSource, PagedContent};

const PAGE_SIZE: u32 = 50;

#[derive(Default)]
struct LastRequest(Option<PageRequest>);

impl PageSource<u32> for LastRequest {
    fn request_page(&mut self, request: &PageRequest) {
        self.0 = Some(*request);
    }
}

fn page(page: i32) -> Vec<u32> {
    // One item of overlap with the previous page.
    let start = (page as u32 * PAGE_SIZE).saturating_sub(1);
    (start..start + PAGE_SIZE).collect()
}

fn answer(content: &mut PagedContent<u32, LastRequest>) {
    if let Some(request) = content.source().0 {
        content
            .apply_result(request.id(), page(request.page()), 0, i32::MAX)
            .expect("apply");
    }
}

fn append_pages(c: &mut Criterion) {
    c.bench_function("append_40_pages", |b| {
        b.iter(|| {
            let mut content = PagedContent::new(LastRequest::default());
            content.go_to(0).expect("page is loadable");
            answer(&mut content);
            for _ in 0..40 {
                content.next_page(false).expect("page is loadable");
                answer(&mut content);
            }
            black_box(content.len())
        });
    });
}

fn refresh_middle_page(c: &mut Criterion) {
    let mut content = PagedContent::new(LastRequest::default());
    content.go_to(0).expect("page is loadable");
    answer(&mut content);
    for _ in 0..40 {
        content.next_page(false).expect("page is loadable");
        answer(&mut content);
    }

    c.bench_function("refresh_middle_page", |b| {
        b.iter(|| {
            content.refresh_page(20).expect("page 20 is loaded");
            answer(&mut content);
            black_box(content.dividers().len())
        });
    });
}

criterion_group!(benches, append_pages, refresh_middle_page);
criterion_main!(benches);
