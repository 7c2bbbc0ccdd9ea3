use super::tags::{Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::{AdminError, Result};
use crate::schema::{Metrics, MetricsQuery};

impl AdminApi {
    pub async fn metrics(&self, range: MetricsQuery) -> Result<Metrics> {
        if range.from > range.to {
            return Err(AdminError::form("from", "Start date is after end date"));
        }
        let endpoint = Endpoint::get("getMetrics", "/metrics").query(&range)?;
        self.query(endpoint, move |_: &Metrics| vec![Tag::id(TagKind::Metrics, format!("{}..{}", range.from, range.to))])
            .await
    }
}
