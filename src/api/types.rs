//! Auction API wire types and the domain record built from them

use serde::Deserialize;

/// One auction listing, as kept in the page cache
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionRecord {
    /// Display name of the item
    pub name: String,

    /// Item lore (descriptive text), kept verbatim
    pub lore: String,

    /// Starting bid in coins
    pub starting_price: f64,

    /// Auction UUID
    pub id: String,
}

/// A single auction entry as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuction {
    pub item_name: String,
    #[serde(default)]
    pub item_lore: String,
    pub starting_bid: f64,
    pub uuid: String,
}

impl From<RawAuction> for AuctionRecord {
    fn from(raw: RawAuction) -> Self {
        Self {
            name: raw.item_name,
            lore: raw.item_lore,
            starting_price: raw.starting_bid,
            id: raw.uuid,
        }
    }
}

/// Response body for one page of the auctions endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuctionsResponse {
    pub success: bool,

    /// Failure reason, present when `success` is false
    #[serde(default)]
    pub cause: Option<String>,

    #[serde(default)]
    pub auctions: Option<Vec<RawAuction>>,

    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}
