//! Packed row vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hostgate_core::rules::codec;

use vector_loader::load;

#[test]
fn codec_vectors() {
    let files = [
        "row_bootstrap.json",
        "row_reserved_pattern.json",
        "row_high_bits_ignored.json",
        "row_all_allow.json",
        "write_script_deny.json",
        "write_undecided_clears.json",
        "write_global_allow.json",
        "write_last_slot.json",
    ];

    for f in files {
        let v = load(f);
        let mut packed = v.packed.decode();

        if let Some(w) = &v.write {
            packed = codec::apply(packed, w.kind, w.permission);
        }

        let decoded = codec::decode(packed);
        assert_eq!(decoded, v.expect.to_set(), "vector={}", v.description);

        if let Some(ex) = &v.expect_packed {
            assert_eq!(packed, ex.decode(), "vector={}", v.description);
            assert_eq!(codec::encode(&decoded), ex.decode(), "vector={}", v.description);
        }
    }
}
