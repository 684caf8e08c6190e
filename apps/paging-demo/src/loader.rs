//! Page loader running on a worker thread.
//!
//! Requests go out over one channel, outcomes come back over another and are
//! applied on the thread owning the controller.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pageflow_foundation::{PageRequest, PageSource};

/// Shape of the simulated upstream list.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    pub pages: i32,
    pub page_size: usize,
    /// The first load of this page fails.
    pub flaky_page: Option<i32>,
    pub latency: Duration,
}

impl Catalog {
    /// Items of `page`. Every page after the first repeats the last item of the
    /// page before it, as an upstream that shifted between fetches would.
    fn page(&self, page: i32) -> Vec<String> {
        if !(0..self.pages).contains(&page) {
            return Vec::new();
        }
        let size = self.page_size;
        let start = (page as usize * size).saturating_sub(usize::from(page > 0));
        let end = (page as usize + 1) * size;
        (start..end).map(|index| format!("item {index}")).collect()
    }
}

pub enum Outcome {
    Loaded {
        request: PageRequest,
        items: Vec<String>,
        min: i32,
        max: i32,
    },
    Failed {
        request: PageRequest,
        message: String,
    },
}

/// Spawns the worker. It exits once the request sender is dropped.
pub fn spawn(catalog: Catalog) -> (Sender<PageRequest>, Receiver<Outcome>, JoinHandle<()>) {
    let (request_tx, request_rx) = mpsc::channel::<PageRequest>();
    let (outcome_tx, outcome_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut flaky_page = catalog.flaky_page;
        for request in request_rx {
            log::trace!("worker picked up request {} for page {}", request.id().get(), request.page());
            thread::sleep(catalog.latency);
            let outcome = if flaky_page == Some(request.page()) {
                flaky_page = None;
                Outcome::Failed {
                    request,
                    message: format!("connection reset while loading page {}", request.page()),
                }
            } else {
                Outcome::Loaded {
                    request,
                    items: catalog.page(request.page()),
                    min: 0,
                    max: catalog.pages,
                }
            };
            if outcome_tx.send(outcome).is_err() {
                break;
            }
        }
        log::debug!("loader stopped");
    });

    (request_tx, outcome_rx, handle)
}

/// [`PageSource`] forwarding requests to the worker and keeping the first-page backup.
pub struct ChannelSource {
    requests: Sender<PageRequest>,
    backup: Option<Vec<String>>,
}

impl ChannelSource {
    pub fn new(requests: Sender<PageRequest>) -> Self {
        Self {
            requests,
            backup: None,
        }
    }

    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }
}

impl PageSource<String> for ChannelSource {
    fn request_page(&mut self, request: &PageRequest) {
        if self.requests.send(*request).is_err() {
            log::warn!("loader is gone, request {} dropped", request.id());
        }
    }

    fn load_backup(&mut self) -> Option<Vec<String>> {
        self.backup.clone()
    }

    fn save_backup(&mut self, items: &[String]) {
        log::debug!("saving backup of {} item(s)", items.len());
        self.backup = Some(items.to_vec());
    }
}
