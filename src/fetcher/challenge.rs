//! Detection of bot-protection interstitials served with a 2xx status.

const VENDOR_MARKERS: [&str; 8] = [
    "cloudflare",
    "ddos-guard",
    "sucuri",
    "incapsula",
    "imperva",
    "perimeterx",
    "datadome",
    "akamai",
];

const CHALLENGE_PHRASES: [&str; 6] = [
    "checking your browser",
    "verify you are human",
    "verifying you are human",
    "just a moment...",
    "attention required",
    "enable javascript and cookies to continue",
];

/// A page counts as a challenge only when it names a protection vendor and
/// also uses challenge wording; either one alone is common on real pages.
pub fn is_challenge_page(body: &str) -> bool {
    let lower = body.to_lowercase();
    VENDOR_MARKERS.iter().any(|vendor| lower.contains(vendor))
        && CHALLENGE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
