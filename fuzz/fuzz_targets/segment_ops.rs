#![no_main]

use libfuzzer_sys::fuzz_target;
use segbuf_core::{Segment, SEGMENT_CAPACITY};

fuzz_target!(|data: &[u8]| {
    // Interleave appends, truncations, copies and tails on one segment and
    // check every copy keeps its own contents.

    let mut seg = Segment::new();
    let mut model: Vec<u8> = Vec::new();
    let mut copies: Vec<(Segment, Vec<u8>)> = Vec::new();

    for pair in data.chunks(2) {
        let arg = pair.get(1).copied().unwrap_or(0) as usize;
        match pair[0] % 4 {
            0 => {
                let input = vec![pair[0]; arg];
                let n = seg.append(&input);
                assert_eq!(n, arg.min(SEGMENT_CAPACITY - model.len()));
                model.extend_from_slice(&input[..n]);
            }
            1 => {
                let n = seg.truncate(arg);
                model.truncate(arg);
                assert_eq!(n, model.len());
            }
            2 => copies.push((seg.copy(), model.clone())),
            _ => match seg.tail(arg) {
                Some(tail) => {
                    assert!(arg < model.len());
                    copies.push((tail, model[arg..].to_vec()));
                }
                None => assert!(arg >= model.len()),
            },
        }
        assert_eq!(seg.bytes(), &model[..]);
    }

    for (copy, expected) in &copies {
        assert_eq!(copy.bytes(), &expected[..]);
    }
});
