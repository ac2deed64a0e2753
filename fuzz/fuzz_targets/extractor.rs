#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use pagescore::analysis;
use pagescore::extractor::extract;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let Ok(url) = Url::parse("https://example.com/") else {
        return;
    };

    // Extraction and scoring must never panic, whatever the markup.
    let signals = extract(&html, &url);
    let report = analysis::analyze(&signals);
    assert!(report.score <= 100);
});
