//! Classification and validation for the identifiers a request may carry:
//! wallet addresses, naming-system domains and bare handles.

use regex::Regex;
use std::sync::LazyLock;

static ENS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*?\.(eth|xyz|app|luxe|kred|art|ceo|club)$").unwrap());
static LENS_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i).*\.lens$").unwrap());
static DOTBIT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i).*\.bit$").unwrap());
static SNS_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i).*\.sol$").unwrap());
static UNSTOPPABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i).*\.(crypto|888|nft|blockchain|bitcoin|dao|x|klever|hi|zil|kresus|polygon|wallet|binanceus|anime|go|manga|eth)$",
    )
    .unwrap()
});
static SPACEID_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i).*\.(bnb|arb)$").unwrap());
static CROSSBELL_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i).*\.csb$").unwrap());

static ETH_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^0x[a-f0-9]{40}$").unwrap());
/// Zero addresses, bodies built only from low-entropy vanity digits, and
/// the conventional burn address. Well-formed but never a real identity.
static ETH_EXCLUDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^0x0*.$|0x[123468abef]*$|0x0*dead$").unwrap());
static BTC_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$").unwrap());
static SOLANA_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap());
static TWITTER_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9_]{1,15}$").unwrap());
static FARCASTER_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9_-]{1,61}(?:\.eth)?(?:\.farcaster)?$").unwrap());

/// Hex-shaped Ethereum address that is not one of the excluded vanity or
/// burn patterns.
pub fn is_valid_ethereum_address(address: &str) -> bool {
    ETH_ADDRESS.is_match(address) && !ETH_EXCLUDED.is_match(address)
}

/// Base58-shaped Solana account key.
pub fn is_valid_solana_address(address: &str) -> bool {
    SOLANA_ADDRESS.is_match(address)
}

pub fn is_ens_name(term: &str) -> bool {
    ENS_NAME.is_match(term)
}

pub fn is_dotbit_name(term: &str) -> bool {
    DOTBIT_NAME.is_match(term)
}

pub fn is_sns_name(term: &str) -> bool {
    SNS_NAME.is_match(term)
}

/// Map a free-form identifier onto the naming platform it belongs to.
/// Order matters: suffix rules win over address shapes, and anything
/// unrecognized falls through to the universal resolver.
pub fn search_platform(term: &str) -> &'static str {
    if ENS_NAME.is_match(term) {
        "ens"
    } else if ETH_ADDRESS.is_match(term) {
        "ethereum"
    } else if LENS_NAME.is_match(term) {
        "lens"
    } else if UNSTOPPABLE_NAME.is_match(term) {
        "unstoppableDomains"
    } else if SPACEID_NAME.is_match(term) {
        "space_id"
    } else if CROSSBELL_NAME.is_match(term) {
        "crossbell"
    } else if DOTBIT_NAME.is_match(term) {
        "dotbit"
    } else if SNS_NAME.is_match(term) {
        "sns"
    } else if BTC_ADDRESS.is_match(term) {
        "bitcoin"
    } else if SOLANA_ADDRESS.is_match(term) {
        "solana"
    } else if TWITTER_HANDLE.is_match(term) {
        "twitter"
    } else if FARCASTER_HANDLE.is_match(term) {
        "farcaster"
    } else {
        "next.id"
    }
}

/// Shorten a long identifier for display, keeping both ends. Addresses keep
/// their `0x` prefix intact; other strings split evenly around the gap.
pub fn format_text(input: &str, length: Option<usize>) -> String {
    if input.is_empty() {
        return String::new();
    }
    let len = length.unwrap_or(12);
    let chars = (len / 2).saturating_sub(2);
    let total = input.chars().count();
    if total <= len {
        return input.to_string();
    }

    let (head, tail) = if input.starts_with("0x") {
        (chars + 2, chars)
    } else {
        (chars + 1, chars + 1)
    };
    let start: String = input.chars().take(head).collect();
    let end: String = input.chars().skip(total - tail).collect();
    format!("{start}...{end}")
}
