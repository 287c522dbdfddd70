use std::path::PathBuf;
use std::time::Duration;

pub const MDM_API_BASE: &str = "https://www.masterduelmeta.com/api/v1";
pub const CARD_IMAGE_BASE: &str = "https://s3.duellinksmeta.com/cards";
pub const YGOPRODECK_CARD_INFO_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";

/// Number of cards requested per page from the cards endpoint.
pub const CARDS_PAGE_SIZE: usize = 1000;
/// Upper bound on sets returned by the sets endpoint (single page).
pub const SETS_PAGE_LIMIT: usize = 500;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

pub fn sets_url() -> String {
    format!("{}/sets", MDM_API_BASE)
}

pub fn sets_query() -> Vec<(&'static str, String)> {
    vec![
        ("page", "1".to_string()),
        ("limit", SETS_PAGE_LIMIT.to_string()),
        ("fields", "name,release,type".to_string()),
    ]
}

pub fn cards_url() -> String {
    format!("{}/cards", MDM_API_BASE)
}

pub fn cards_query(pack_id: &str, page: usize) -> Vec<(&'static str, String)> {
    vec![
        ("obtain.source", pack_id.to_string()),
        ("cardSort", "monsterTypeOrder".to_string()),
        ("aggregate", "search".to_string()),
        ("fields", "name,rarity,konamiID".to_string()),
        ("page", page.to_string()),
        ("limit", CARDS_PAGE_SIZE.to_string()),
    ]
}

/// Image URL for a card, keyed by the catalog's internal document id.
pub fn card_image_url(catalog_id: &str) -> String {
    format!("{}/{}_w420.webp", CARD_IMAGE_BASE, catalog_id)
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("md-pull-sdk")
    } else {
        PathBuf::from(".md-pull-sdk-cache")
    }
}
