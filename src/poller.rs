//! One shared poller drives both device generations.
//!
//! The generation picked at configuration time selects the extractor
//! strategy; everything downstream of extraction is common. `collect` is the
//! whole engine surface: fetch every source, extract, derive, and return
//! the complete metric set, or fail the cycle with no partial output.

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{Config, Generation};
use crate::derive::{self, ChannelRole};
use crate::extract::{flatten_by, html, walk, IndexedRecords, PageRecords};
use crate::fieldmap::{pages, subtrees, FieldMap};
use crate::hub::HubClient;
use crate::metric::Metric;

pub struct Poller<C> {
    client: C,
    fields: FieldMap,
    generation: Generation,
    plugin_instance: String,
}

impl<C: HubClient> Poller<C> {
    /// Build a poller over a modem client. Fails if the built-in field maps
    /// do not validate.
    pub fn new(client: C, cfg: &Config) -> Result<Self> {
        Ok(Self {
            client,
            fields: FieldMap::builtin()?,
            generation: cfg.hub.generation,
            plugin_instance: cfg.plugin_instance.clone(),
        })
    }

    /// Run one poll cycle.
    pub async fn collect(&self) -> Result<Vec<Metric>> {
        match self.generation {
            Generation::V1 => self.collect_pages().await,
            Generation::V3 => self.collect_walks().await,
        }
    }

    async fn collect_pages(&self) -> Result<Vec<Metric>> {
        let instance = self.plugin_instance.as_str();

        let configuration = self.page(pages::CONFIGURATION).await?;
        let speeds = derive::page_max_speeds(&configuration)?;
        let mut metrics = derive::bitrate_metrics(instance, speeds);

        let downstream = self.page(pages::DOWNSTREAM).await?;
        metrics.extend(derive::page_channel_metrics(
            instance,
            ChannelRole::Downstream,
            &downstream.columns,
        )?);

        let upstream = self.page(pages::UPSTREAM).await?;
        metrics.extend(derive::page_channel_metrics(
            instance,
            ChannelRole::Upstream,
            &upstream.columns,
        )?);

        debug!(count = metrics.len(), "derived metrics from status pages");

        Ok(metrics)
    }

    async fn collect_walks(&self) -> Result<Vec<Metric>> {
        let instance = self.plugin_instance.as_str();

        let qos = self.subtree(subtrees::QOS).await?;
        let flows = self.subtree(subtrees::QOS_FLOWS).await?;
        let speeds = derive::max_speeds(&qos, &flows)?;
        let mut metrics = derive::bitrate_metrics(instance, speeds);

        let downstream = self.subtree(subtrees::DOWNSTREAM).await?;
        let channels = flatten_by(&downstream, "chanid")?;
        metrics.extend(derive::walk_downstream_metrics(instance, &channels)?);

        let upstream = self.subtree(subtrees::UPSTREAM).await?;
        let status = self.subtree(subtrees::UPSTREAM_STATUS).await?;
        let channels = flatten_by(&upstream, "chanid")?;
        metrics.extend(derive::walk_upstream_metrics(instance, &channels, &status)?);

        debug!(count = metrics.len(), "derived metrics from OID walks");

        Ok(metrics)
    }

    /// Fetch and extract one status page.
    async fn page(&self, name: &str) -> Result<PageRecords> {
        let spec = self.fields.page(name)?;
        let markup = self
            .client
            .fetch_page(name)
            .await
            .with_context(|| format!("fetching page {name}"))?;

        let records =
            html::parse_page(spec, &markup).with_context(|| format!("extracting page {name}"))?;
        Ok(records)
    }

    /// Fetch and extract one OID subtree.
    async fn subtree(&self, name: &str) -> Result<IndexedRecords> {
        let spec = self.fields.subtree(name)?;
        let dump = self
            .client
            .fetch_walk(spec.base())
            .await
            .with_context(|| format!("walking subtree {name}"))?;

        Ok(walk::parse_walk(spec, &dump))
    }
}
