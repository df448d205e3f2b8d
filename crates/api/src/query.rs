//! Query parameter types shared by several handler modules.

use parkline_core::ticket::TicketState;
use parkline_core::types::DbId;
use parkline_db::models::ticket::CompanyTicketListParams;
use serde::Deserialize;

/// Merchant listing query (`?parking_lot_id=&state=`).
///
/// `parking_lot_id` is optional here so a missing value surfaces as a
/// validation error instead of a bare extractor rejection.
#[derive(Debug, Deserialize)]
pub struct MerchantTicketQuery {
    pub parking_lot_id: Option<DbId>,
    pub state: Option<TicketState>,
}

impl MerchantTicketQuery {
    pub fn into_params(self) -> Option<CompanyTicketListParams> {
        Some(CompanyTicketListParams {
            parking_lot_id: self.parking_lot_id?,
            state: self.state,
        })
    }
}
