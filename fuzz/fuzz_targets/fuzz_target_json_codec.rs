#![no_main]
use libfuzzer_sys::fuzz_target;
use passkeep::vault::codec::JsonCodec;
use passkeep::vault::ports::VaultCodec;

fuzz_target!(|data: &[u8]| {
    // Stored text is untrusted; decoding must fail cleanly, never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = JsonCodec.decode_entries(s);
        let _ = JsonCodec.decode_credentials(s);
    }
});
