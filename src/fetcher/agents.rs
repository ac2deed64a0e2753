use rand::Rng;
use rand::seq::SliceRandom;

use crate::fetcher::types::AgentProfile;

const DESKTOP_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

const MOBILE_AGENTS: [&str; 2] = [
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
];

/// User agents chosen for one fetch call.
///
/// Both are drawn up front so the random source is never held across an
/// await point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgents {
    pub desktop: &'static str,
    pub mobile: &'static str,
}

impl UserAgents {
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            desktop: DESKTOP_AGENTS.choose(rng).copied().unwrap_or(DESKTOP_AGENTS[0]),
            mobile: MOBILE_AGENTS.choose(rng).copied().unwrap_or(MOBILE_AGENTS[0]),
        }
    }

    pub fn for_profile(&self, profile: AgentProfile) -> &'static str {
        match profile {
            AgentProfile::Desktop => self.desktop,
            AgentProfile::Mobile => self.mobile,
        }
    }
}
