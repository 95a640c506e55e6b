//! Lazy iteration over paginated collections.
//!
//! A [`PaginatedStream`] yields items one at a time and follows the `next`
//! link of each collection envelope until the server stops handing one out.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use crate::models::Page;
use crate::Result;

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

type FetchPage<T> = Box<dyn Fn(String, bool) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// A stream that lazily fetches pages of a collection.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::models::Resource;
/// use futures_util::StreamExt;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let mut devices = client.devices().stream_by_link("products/p1/devices", None);
///
/// while let Some(device) = devices.next().await {
///     let device = device?;
///     println!("{}", device.href());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Fetch a page by link; the flag marks the first page.
    fetch_page: FetchPage<T>,
    /// Current page of items being yielded.
    current_items: VecDeque<T>,
    /// Link of the next page, `None` once exhausted.
    next_link: Option<String>,
    /// Whether the first page is still to be fetched.
    first: bool,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
}

impl<T: Send + 'static> PaginatedStream<T> {
    /// Create a stream starting at `link`.
    pub(crate) fn new<F>(link: impl Into<String>, fetch_page: F) -> Self
    where
        F: Fn(String, bool) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: VecDeque::new(),
            next_link: Some(link.into()),
            first: true,
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.next_link = page.next_link().map(str::to_owned);
                        this.current_items = page.items.into();

                        if !this.current_items.is_empty() {
                            continue;
                        }
                        return Poll::Ready(None);
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_link = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(link) = this.next_link.take() {
                let first = std::mem::replace(&mut this.first, false);
                this.pending_fetch = Some((this.fetch_page)(link, first));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
