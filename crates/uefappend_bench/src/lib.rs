//! Benchmark utilities.

use rand::Rng;
use uefappend_testkit::AtmBuilder;

/// Generate random payload data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate a TAP image of `count` records of `size` random bytes each.
///
/// # Panics
///
/// Panics if `size` exceeds the 16-bit length field.
pub fn random_tap(count: usize, size: usize) -> Vec<u8> {
    (0..count)
        .fold(AtmBuilder::new(), |builder, i| {
            let name = format!("FILE{i}");
            builder.record(name.as_bytes(), 0x2900, 0x2900, &random_data(size))
        })
        .build()
}
