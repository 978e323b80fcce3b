//! End-to-end tests for appending ATM files to UEF containers.

use proptest::prelude::*;
use uefappend_core::{AppendOutcome, Config, ContainerSession, CoreError};
use uefappend_storage::InMemoryBackend;
use uefappend_testkit::prelude::*;

fn append_all(ws: &TempWorkspace, inputs: &[&[u8]]) -> Vec<AppendOutcome> {
    let mut session = ContainerSession::open(&ws.container_path(), Config::default()).unwrap();
    session.ensure_header().unwrap();
    let outcomes = inputs
        .iter()
        .enumerate()
        .map(|(i, bytes)| {
            let path = ws.write_input(&format!("input{i}.atm"), bytes);
            session.append_file(&path).unwrap()
        })
        .collect();
    session.finish().unwrap();
    outcomes
}

#[test]
fn hello_matches_reference_bytes() {
    let vector = hello_vector();
    let ws = TempWorkspace::new();
    append_all(&ws, &[&vector.input]);

    assert_bytes_eq(&ws.read_container(), &vector.expected);
}

#[test]
fn second_run_appends_with_gap_and_preserves_prefix() {
    let vector = hello_vector();
    let ws = TempWorkspace::new();
    append_all(&ws, &[&vector.input]);
    let before = ws.read_container();

    append_all(&ws, &[&x_input()]);
    let after = ws.read_container();

    assert_eq!(&after[..before.len()], before.as_slice());
    assert_bytes_eq(&after[before.len()..], &appended_x_chunks());
}

#[test]
fn second_input_in_same_run_gets_gap() {
    let vector = hello_vector();
    let ws = TempWorkspace::new();
    append_all(&ws, &[&vector.input, &x_input()]);

    let mut expected = vector.expected.clone();
    expected.extend_from_slice(&appended_x_chunks());
    assert_bytes_eq(&ws.read_container(), &expected);
}

#[test]
fn foreign_file_is_not_touched() {
    let ws = TempWorkspace::new();
    let target = ws.container_path();
    std::fs::write(&target, b"PK\x03\x04 definitely a zip").unwrap();

    let result = ContainerSession::open(&target, Config::default());
    assert!(matches!(result, Err(CoreError::WrongFileType)));
    assert_eq!(std::fs::read(&target).unwrap(), b"PK\x03\x04 definitely a zip");
}

#[test]
fn unreadable_input_is_skipped_and_run_continues() {
    let ws = TempWorkspace::new();
    let mut session = ContainerSession::open(&ws.container_path(), Config::default()).unwrap();
    session.ensure_header().unwrap();

    let missing = session
        .append_file(&ws.path().join("does_not_exist.atm"))
        .unwrap();
    assert!(matches!(missing, AppendOutcome::Skipped { .. }));

    let hello = ws.write_input("hello.atm", &hello_vector().input);
    let written = session.append_file(&hello).unwrap();
    assert_eq!(written.summary().records, 1);
    session.finish().unwrap();

    // The skipped input leaves no trace, so HELLO is still the first record.
    assert_bytes_eq(&ws.read_container(), &hello_vector().expected);
}

#[test]
fn tap_stream_with_trailing_bytes() {
    let mut tap = AtmBuilder::new()
        .record(b"ONE", 0x2900, 0x2900, &[1; 300])
        .record(b"TWO", 0x3000, 0x3000, &[2; 10])
        .build();
    tap.extend_from_slice(b"junk");

    let ws = TempWorkspace::new();
    let outcomes = append_all(&ws, &[&tap]);
    assert_eq!(
        outcomes[0],
        AppendOutcome::Appended(uefappend_core::TranscodeSummary {
            records: 2,
            blocks: 3,
            bytes: 310,
        })
    );

    let bytes = ws.read_container();
    let ids: Vec<u16> = split_chunks(&bytes[12..])
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(
        ids,
        [
            0x0117, // baud
            0x0110, 0x0104, 0x0110, 0x0104, 0x0104, 0x0110, 0x0104, // ONE
            0x0112, 0x0110, 0x0104, 0x0110, 0x0104, // TWO
        ]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_block_checksum_and_layout_holds(records in records_strategy()) {
        let atm = build_atm(&records);
        let mut session = ContainerSession::with_backend(InMemoryBackend::new(), Config::default()).unwrap();
        let summary = session.append_reader(atm.as_slice()).unwrap();
        prop_assert_eq!(summary.records, records.len());

        let bytes = session.finish().unwrap().into_data();
        let chunks = split_chunks(&bytes[12..]).unwrap();
        let mut chunks = chunks.iter().skip(1);

        for (index, record) in records.iter().enumerate() {
            if index > 0 {
                prop_assert_eq!(chunks.next().unwrap().id, 0x0112);
            }
            prop_assert_eq!(chunks.next().unwrap().id, 0x0110);

            let block_count = record.data.len().div_ceil(256);
            let mut load = record.load;
            let mut rebuilt = Vec::new();
            for block in 0..block_count {
                let header = &chunks.next().unwrap().payload[3..];
                prop_assert_eq!(chunks.next().unwrap().id, 0x0110);
                let data = &chunks.next().unwrap().payload[3..];

                let name_len = record.name.len();
                prop_assert_eq!(&header[..4], b"****");
                prop_assert_eq!(&header[4..4 + name_len], record.name.as_slice());
                let fields = &header[4 + name_len..];
                prop_assert_eq!(fields[0], b'\r');

                let flags = fields[1];
                prop_assert_eq!(flags & 0x80 != 0, block + 1 != block_count);
                prop_assert_eq!(flags & 0x01 != 0, block != 0);
                prop_assert_eq!(flags & 0x40, 0x40);
                prop_assert_eq!(u16::from_le_bytes([fields[2], fields[3]]), block as u16);
                prop_assert_eq!(usize::from(fields[4]) + 1, data.len() - 1);
                prop_assert_eq!(u16::from_le_bytes([fields[5], fields[6]]), record.exec);
                prop_assert_eq!(u16::from_le_bytes([fields[7], fields[8]]), load);

                let (body, checksum) = data.split_at(data.len() - 1);
                let sum = header.iter().chain(body).fold(0u8, |a, &b| a.wrapping_add(b));
                prop_assert_eq!(checksum[0], sum);

                load = load.wrapping_add(body.len() as u16);
                rebuilt.extend_from_slice(body);
            }
            prop_assert_eq!(rebuilt, record.data.clone());
        }
        prop_assert!(chunks.next().is_none());
    }
}
