//! Property-based test generators using proptest.
//!
//! Provides strategies for generating ATM records and streams that
//! respect the format's field widths.

use crate::fixtures::AtmBuilder;
use proptest::prelude::*;

/// One record to be written into an ATM image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    /// File name, 1 to 13 printable characters.
    pub name: Vec<u8>,
    /// Load address.
    pub load: u16,
    /// Execute address.
    pub exec: u16,
    /// Payload.
    pub data: Vec<u8>,
}

/// Strategy for generating Atom file names.
pub fn record_name_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::string::string_regex("[A-Z][A-Z0-9.]{0,12}")
        .expect("Invalid regex")
        .prop_map(String::into_bytes)
}

/// Strategy for generating record payloads, biased towards block
/// boundaries.
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..1100),
        prop::sample::select(vec![1usize, 255, 256, 257, 511, 512, 513])
            .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len)),
    ]
}

/// Strategy for generating a single record.
pub fn record_strategy() -> impl Strategy<Value = RecordSpec> {
    (
        record_name_strategy(),
        any::<u16>(),
        any::<u16>(),
        payload_strategy(),
    )
        .prop_map(|(name, load, exec, data)| RecordSpec {
            name,
            load,
            exec,
            data,
        })
}

/// Strategy for generating a TAP-style stream of 1 to 4 records.
pub fn records_strategy() -> impl Strategy<Value = Vec<RecordSpec>> {
    prop::collection::vec(record_strategy(), 1..5)
}

/// Builds the ATM image for `records`.
#[must_use]
pub fn build_atm(records: &[RecordSpec]) -> Vec<u8> {
    records
        .iter()
        .fold(AtmBuilder::new(), |builder, r| {
            builder.record(&r.name, r.load, r.exec, &r.data)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn names_fit_the_header(name in record_name_strategy()) {
            prop_assert!(!name.is_empty() && name.len() <= 13);
            prop_assert!(name.iter().all(|b| b.is_ascii_graphic()));
        }

        #[test]
        fn built_image_has_every_record(records in records_strategy()) {
            let atm = build_atm(&records);
            let expected: usize = records.iter().map(|r| 22 + r.data.len()).sum();
            prop_assert_eq!(atm.len(), expected);
        }
    }
}
