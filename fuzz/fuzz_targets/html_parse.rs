#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let dom = html::parse_document(&input);
    let _ = html::document_title(&dom);
});
