mod loader;
mod view;

use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use pageflow_foundation::{ContentConfig, ContentError, PagedContent};

use loader::{Catalog, ChannelSource, Outcome};
use view::LogView;

type Content = PagedContent<String, ChannelSource>;

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let catalog = parse_args()?;
    println!("=== Pageflow Demo ===");
    println!(
        "{} page(s) of {} item(s), page 2 fails once",
        catalog.pages, catalog.page_size
    );

    let (requests, outcomes, worker) = loader::spawn(catalog);
    let mut content = PagedContent::with_config(ChannelSource::new(requests), ContentConfig::new());
    content.attach(Box::new(LogView));

    run_session(&mut content, &outcomes, catalog)?;

    let snapshot = content.solidify();
    println!(
        "loaded {} page(s) ({}..{} of {}), {} item(s), backup saved: {}",
        content.window().page_count(),
        content.begin_page(),
        content.end_page(),
        content.max_page(),
        snapshot.len(),
        content.source().has_backup()
    );
    if let (Some(first), Some(last)) = (snapshot.iter().next(), snapshot.iter().last()) {
        println!("first: {first}, last: {last}");
    }

    drop(content);
    worker
        .join()
        .map_err(|_| anyhow::anyhow!("loader thread panicked"))?;
    Ok(())
}

fn parse_args() -> Result<Catalog> {
    let mut args = std::env::args().skip(1);
    let pages = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid page count {arg:?}"))?,
        None => 5,
    };
    let page_size = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid page size {arg:?}"))?,
        None => 10,
    };
    if pages < 1 || page_size == 0 {
        bail!("need at least one page of at least one item");
    }
    Ok(Catalog {
        pages,
        page_size,
        flaky_page: Some(2),
        latency: Duration::from_millis(20),
    })
}

fn run_session(content: &mut Content, outcomes: &Receiver<Outcome>, catalog: Catalog) -> Result<()> {
    log::info!("-- restore");
    content.restore();
    settle(content, outcomes)?;

    log::info!("-- scroll to the bottom");
    // Each page is tried at most twice: the flaky page fails once.
    for _ in 0..catalog.pages * 2 {
        if content.on_reach_bottom().is_none() {
            break;
        }
        settle(content, outcomes)?;
    }

    log::info!("-- pull to refresh at the bottom");
    content.on_refresh_footer();
    settle(content, outcomes)?;

    log::info!("-- jump twice in a row, the first answer arrives stale");
    content.go_to(catalog.pages - 1)?;
    content.go_to(0)?;
    settle(content, outcomes)?;

    log::info!("-- switch to the next page");
    content.switch_to(1)?;
    settle(content, outcomes)?;

    log::info!("-- a second restore is ignored");
    if content.restore().is_some() {
        bail!("restore honored after loading");
    }
    Ok(())
}

/// Applies outcomes until nothing is pending.
fn settle(content: &mut Content, outcomes: &Receiver<Outcome>) -> Result<()> {
    while content.is_loading() {
        let outcome = outcomes
            .recv()
            .context("loader stopped with a request pending")?;
        match outcome {
            Outcome::Loaded {
                request,
                items,
                min,
                max,
            } => {
                content.apply_result(request.id(), items, min, max)?;
            }
            Outcome::Failed { request, message } => {
                content.apply_error(request.id(), ContentError::loader(message));
            }
        }
    }
    Ok(())
}
