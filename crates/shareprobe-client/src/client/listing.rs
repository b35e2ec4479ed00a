//! Share, schema and table listing.

use crate::error::SharingResult;
use crate::http::HttpBackend;
use crate::models::{ListPage, SchemaItem, ShareItem, TableItem};
use crate::url::{build_schemas_url, build_shares_url, build_tables_url};

use super::SharingClient;

impl<B: HttpBackend> SharingClient<B> {
    /// List shares visible to the token, in server order.
    pub(crate) async fn fetch_shares(&self) -> SharingResult<Vec<ShareItem>> {
        let url = build_shares_url(&self.endpoint)?;
        let page: ListPage<ShareItem> = self.backend.get_json(&url).await?;
        Ok(page.into_items(&url))
    }

    /// List schemas of one share, in server order.
    pub(crate) async fn fetch_schemas(&self, share: &str) -> SharingResult<Vec<SchemaItem>> {
        let url = build_schemas_url(&self.endpoint, share)?;
        let page: ListPage<SchemaItem> = self.backend.get_json(&url).await?;
        Ok(page.into_items(&url))
    }

    /// List tables of one schema, in server order.
    pub(crate) async fn fetch_tables(
        &self,
        share: &str,
        schema: &str,
    ) -> SharingResult<Vec<TableItem>> {
        let url = build_tables_url(&self.endpoint, share, schema)?;
        let page: ListPage<TableItem> = self.backend.get_json(&url).await?;
        Ok(page.into_items(&url))
    }
}
