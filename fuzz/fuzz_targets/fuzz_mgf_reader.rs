#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either parse or fail with an MgfError, never panic
    let mut reader = fbmn_export::mgf::MgfReader::new(Cursor::new(data));

    for _ in 0..100 {
        match reader.next_spectrum() {
            Ok(Some(spectrum)) => {
                let _ = spectrum.total_ion_current();
            }
            Ok(None) => break,
            Err(_) => break,
        }
    }
});
