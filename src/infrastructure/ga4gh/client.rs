//! HTTP client for GA4GH search endpoints.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::protocol::{
    PAGE_SIZE, Paged, SearchDatasetsRequest, SearchDatasetsResponse, SearchVariantSetsRequest,
    SearchVariantSetsResponse, SearchVariantsRequest, SearchVariantsResponse,
};
use crate::domain::entities::{Dataset, GenomicRegion, Variant, VariantSet};
use crate::domain::gateways::VariantGateway;
use crate::error::AppError;
use crate::infrastructure::http::{HttpSettings, UpstreamClient, UpstreamError, as_base};

/// Upper bound on pages fetched per search, guarding against servers that
/// keep returning the same token.
const MAX_PAGES: usize = 1_000;

/// GA4GH server reached over HTTP (`POST <base>/<kind>/search`).
#[derive(Debug, Clone)]
pub struct Ga4ghClient {
    http: UpstreamClient,
    base_url: Url,
}

impl Ga4ghClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, settings: &HttpSettings) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new("GA4GH", settings)?,
            base_url: as_base(base_url),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs a search, following `nextPageToken` until it is empty.
    async fn search_all<Req, Resp, Item>(
        &self,
        path: &str,
        mut request: impl FnMut(Option<String>) -> Req,
        mut items: impl FnMut(Resp) -> Vec<Item>,
    ) -> Result<Vec<Item>, UpstreamError>
    where
        Req: Serialize + Send + Sync,
        Resp: DeserializeOwned + Paged,
    {
        let url = self.base_url.join(path)?;
        let mut collected = Vec::new();
        let mut page_token = None;

        for page in 0..MAX_PAGES {
            let body = request(page_token.take());
            let response: Resp = self.http.post_json(&url, &body).await?;
            let next = response.next_page_token().map(str::to_string);
            collected.extend(items(response));

            tracing::debug!(%url, page, total = collected.len(), "GA4GH page fetched");

            match next {
                Some(token) => page_token = Some(token),
                None => return Ok(collected),
            }
        }

        tracing::warn!(%url, pages = MAX_PAGES, "GA4GH pagination cut off");
        Ok(collected)
    }
}

#[async_trait]
impl VariantGateway for Ga4ghClient {
    async fn search_datasets(&self) -> Result<Vec<Dataset>, AppError> {
        let datasets = self
            .search_all(
                "datasets/search",
                |page_token| SearchDatasetsRequest {
                    page_size: PAGE_SIZE,
                    page_token,
                },
                |resp: SearchDatasetsResponse| resp.datasets,
            )
            .await?;

        Ok(datasets.into_iter().map(Dataset::from).collect())
    }

    async fn search_variant_sets(&self, dataset_id: &str) -> Result<Vec<VariantSet>, AppError> {
        let sets = self
            .search_all(
                "variantsets/search",
                |page_token| SearchVariantSetsRequest {
                    dataset_id: dataset_id.to_string(),
                    page_size: PAGE_SIZE,
                    page_token,
                },
                |resp: SearchVariantSetsResponse| resp.variant_sets,
            )
            .await?;

        Ok(sets.into_iter().map(VariantSet::from).collect())
    }

    async fn search_variants(
        &self,
        variant_set_id: &str,
        region: &GenomicRegion,
    ) -> Result<Vec<Variant>, AppError> {
        let variants = self
            .search_all(
                "variants/search",
                |page_token| SearchVariantsRequest {
                    variant_set_id: variant_set_id.to_string(),
                    reference_name: region.reference_name.clone(),
                    start: region.start,
                    end: region.end,
                    page_size: PAGE_SIZE,
                    page_token,
                },
                |resp: SearchVariantsResponse| resp.variants,
            )
            .await?;

        tracing::info!(variant_set_id, %region, count = variants.len(), "GA4GH variants fetched");

        Ok(variants.into_iter().map(Variant::from).collect())
    }
}
