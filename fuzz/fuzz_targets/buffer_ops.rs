#![no_main]

use libfuzzer_sys::fuzz_target;
use segbuf_core::{Buffer, BufferConfig};

fuzz_target!(|data: &[u8]| {
    // Drive a buffer with opcode/length pairs and check it against a Vec model.
    // Tests handling of:
    // - Writes that land exactly on segment boundaries
    // - Zero-length writes
    // - Snapshots diverging from their source
    // - Peeks into destinations larger than the stream

    let buffer = Buffer::with_config(BufferConfig {
        metrics: false,
        ..Default::default()
    });
    let mut model: Vec<u8> = Vec::new();
    let mut forked: Option<(Buffer, Vec<u8>)> = None;

    for op in data.chunks(2) {
        let arg = op.get(1).copied().unwrap_or(0) as usize;
        match op[0] % 4 {
            0 => {
                let chunk: Vec<u8> = (0..arg * 3).map(|i| (i as u8) ^ op[0]).collect();
                assert_eq!(buffer.write(&chunk), chunk.len());
                model.extend_from_slice(&chunk);
            }
            1 => {
                let mut dst = vec![0u8; arg * 4];
                let n = buffer.read_at(&mut dst, 0).unwrap();
                assert_eq!(n, dst.len().min(model.len()));
                assert_eq!(&dst[..n], &model[..n]);
                assert!(buffer.read_at(&mut dst, arg as u64 + 1).is_err());
            }
            2 => {
                forked = Some((buffer.snapshot(), model.clone()));
            }
            _ => {
                if let Some((snapshot, snapshot_model)) = forked.as_mut() {
                    let chunk = vec![op[0]; arg];
                    snapshot.write(&chunk);
                    snapshot_model.extend_from_slice(&chunk);
                    assert_eq!(&snapshot.to_bytes()[..], &snapshot_model[..]);
                }
            }
        }
        assert_eq!(buffer.len(), model.len());
    }

    let mut out = Vec::new();
    assert_eq!(buffer.drain_to(&mut out).unwrap() as usize, model.len());
    assert_eq!(out, model);
});
