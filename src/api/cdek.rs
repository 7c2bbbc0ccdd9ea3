use serde_json::Value;
use uuid::Uuid;

use super::tags::{Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::{AdminError, Result};
use crate::schema::{CdekWaybill, PrintForm, WaybillBody};

impl AdminApi {
    /// Waybill attached to an order, `None` when none was issued yet.
    pub async fn waybill(&self, order_id: Uuid) -> Result<Option<CdekWaybill>> {
        let endpoint = Endpoint::get("getWaybill", format!("/orders/{order_id}/waybill"));
        match self.query(endpoint, move |_: &CdekWaybill| vec![Tag::id(TagKind::CdekWaybill, order_id)]).await {
            Ok(waybill) => Ok(Some(waybill)),
            Err(AdminError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_waybill(&self, body: &WaybillBody) -> Result<CdekWaybill> {
        let endpoint = Endpoint::post("createWaybill", "/cdek/waybills").invalidates(waybill_tags(body.order_id));
        self.mutate(endpoint, body).await
    }

    pub async fn delete_waybill(&self, waybill: &CdekWaybill) -> Result<()> {
        let endpoint = Endpoint::delete("deleteWaybill", format!("/cdek/waybills/{}", waybill.uuid))
            .invalidates(waybill_tags(waybill.order_id));
        self.discard::<()>(endpoint, None).await
    }

    /// Link to the printable label. Not cached: CDEK links expire.
    pub async fn waybill_print_form(&self, uuid: Uuid) -> Result<PrintForm> {
        self.command::<(), _>(Endpoint::get("getWaybillPrintForm", format!("/cdek/waybills/{uuid}/print")), None)
            .await
    }

    /// Forwards a request from the CDEK map widget to the backend's service proxy.
    pub async fn cdek_service(&self, query: Vec<(String, String)>, body: Option<Value>) -> Result<Value> {
        let mut endpoint = if body.is_some() {
            Endpoint::post("cdekService", "/cdek/service")
        } else {
            Endpoint::get("cdekService", "/cdek/service")
        };
        endpoint.query = query;
        self.relay(endpoint, body).await
    }
}

fn waybill_tags(order_id: Uuid) -> [Tag; 2] {
    [Tag::id(TagKind::CdekWaybill, order_id), Tag::id(TagKind::Order, order_id)]
}
