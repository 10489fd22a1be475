mod clients;
mod scrapers;

pub use clients::http::{HttpFetcher, Page, RedirectTarget};
pub use scrapers::{
    listing::{extract_listing, ListingPage, ListingRow},
    product::{extract_product, ProductData, RawOffer},
    regions::extract_region_codes,
};
