//! Telemetry service for device, cluster and group time series.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::client::{decode, expect_status, expect_success, ClientInner, RequestOptions, NO_BODY};
use crate::models::{CommandPoint, DataPoint, EventPoint, Page, RawPage, TelemetryOwner};
use crate::Result;

/// Service for the `resources` sub-API of devices, clusters and groups.
///
/// Reads return one page of points and honour pagination and
/// [`TimeRange`](crate::client::TimeRange) options. Writes post a batch and
/// return whatever points the server echoes back.
///
/// # Example
///
/// ```no_run
/// use chrono::{Duration, Utc};
/// use cloudthing_rs::{RequestOptions, TimeRange};
/// use cloudthing_rs::models::DataPoint;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let device = client.devices().get_by_id("d1", None).await?;
///
/// client
///     .telemetry()
///     .write_data(&device, &[DataPoint::new("temp", Utc::now(), 21.5)])
///     .await?;
///
/// let now = Utc::now();
/// let options = RequestOptions::new().time_range(TimeRange::between(now - Duration::hours(1), now));
/// let page = client.telemetry().data(&device, Some(options)).await?;
/// println!("{} samples in the last hour", page.params.size);
/// # Ok(())
/// # }
/// ```
pub struct TelemetryService {
    inner: Arc<ClientInner>,
}

impl TelemetryService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Read data points of `owner`.
    pub async fn data<O>(&self, owner: &O, options: Option<RequestOptions>) -> Result<Page<DataPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.list_by_link(&owner.data_link(), options).await
    }

    /// Read events of `owner`.
    pub async fn events<O>(
        &self,
        owner: &O,
        options: Option<RequestOptions>,
    ) -> Result<Page<EventPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.list_by_link(&owner.events_link(), options).await
    }

    /// Read commands sent to `owner`.
    pub async fn commands<O>(
        &self,
        owner: &O,
        options: Option<RequestOptions>,
    ) -> Result<Page<CommandPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.list_by_link(&owner.commands_link(), options).await
    }

    /// Write data points for `owner`.
    pub async fn write_data<O>(&self, owner: &O, points: &[DataPoint]) -> Result<Vec<DataPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.write_by_link(&owner.data_link(), points).await
    }

    /// Write events for `owner`.
    pub async fn write_events<O>(&self, owner: &O, points: &[EventPoint]) -> Result<Vec<EventPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.write_by_link(&owner.events_link(), points).await
    }

    /// Send commands to `owner`.
    pub async fn write_commands<O>(
        &self,
        owner: &O,
        points: &[CommandPoint],
    ) -> Result<Vec<CommandPoint>>
    where
        O: TelemetryOwner + ?Sized,
    {
        self.write_by_link(&owner.commands_link(), points).await
    }

    /// Read one page of any series link, e.g. a key-scoped one from
    /// [`TelemetryOwner::data_key_link`].
    pub async fn list_by_link<P: DeserializeOwned>(
        &self,
        href: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<P>> {
        let response = self
            .inner
            .dispatch(Method::GET, href, NO_BODY, options.as_ref())
            .await?;
        let response = expect_status(response, StatusCode::OK).await?;
        let raw: RawPage<P> = decode(response).await?;
        Ok(Page {
            items: raw.items,
            params: raw.params,
        })
    }

    /// Post points to any series link.
    ///
    /// Any 2xx status is accepted. An empty response body yields no points.
    pub async fn write_by_link<P>(&self, href: &str, points: &[P]) -> Result<Vec<P>>
    where
        P: Serialize + DeserializeOwned + Sync,
    {
        let response = self
            .inner
            .dispatch(Method::POST, href, Some(points), None)
            .await?;
        let response = expect_success(response).await?;

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
