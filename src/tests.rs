use std::collections::VecDeque;

use crate::{
    connection::{Connection, Request, Response},
    memory::{Measurement, RecordIndex, SlotRecord},
    Bm58, Bm58Error, ACKNOWLEDGE, ATTENTION,
};

/// A connection that replays a script of responses and records every
/// request it was sent.
struct Scripted {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
}

impl Scripted {
    fn new(responses: &[&[u8]]) -> Self {
        Self {
            sent: Vec::new(),
            responses: responses.iter().map(|r| r.to_vec()).collect(),
        }
    }

    /// A script whose first response acknowledges the handshake.
    fn linked(responses: &[&[u8]]) -> Self {
        let mut all: Vec<&[u8]> = vec![&[ACKNOWLEDGE]];
        all.extend_from_slice(responses);
        Self::new(&all)
    }
}

impl Connection for Scripted {
    type Error = ();

    fn send(&mut self, request: &Request) -> Result<(), ()> {
        self.sent.push(request.message().as_bytes().to_vec());
        Ok(())
    }

    fn recv(&mut self, limit: usize) -> Result<Response, ()> {
        let mut data = self.responses.pop_front().unwrap_or_default();
        data.truncate(limit);
        Ok(Response::new(data))
    }

    fn send_recv(&mut self, request: &Request) -> Result<Response, ()> {
        self.send(request)?;
        self.recv(request.response_limit())
    }
}

fn index(value: u8) -> RecordIndex {
    RecordIndex::new(value).unwrap()
}

#[test]
fn handshake_links_on_acknowledge() {
    let connection = Scripted::new(&[&[ACKNOWLEDGE]]);
    let bm58 = Bm58::connect(connection).unwrap();

    assert_eq!(bm58.release().sent, vec![vec![ATTENTION]]);
}

#[test]
fn handshake_rejects_wrong_byte() {
    let connection = Scripted::new(&[&[0xAB]]);

    let error = Bm58::connect(connection).map(|_| ()).unwrap_err();
    assert_eq!(
        error,
        Bm58Error::NoAcknowledge {
            response: Some(0xAB)
        }
    );
}

#[test]
fn handshake_rejects_silence() {
    let connection = Scripted::new(&[&[]]);

    let error = Bm58::connect(connection).map(|_| ()).unwrap_err();
    assert_eq!(error, Bm58Error::NoAcknowledge { response: None });
}

#[test]
fn ident_accepts_short_read() {
    let text = [b'X'; 40];
    let connection = Scripted::linked(&[&text]);

    let mut bm58 = Bm58::connect(connection).unwrap();
    let ident = bm58.ident().unwrap();

    assert_eq!(ident.len(), 40);
    assert_eq!(ident.raw(), &text);
}

#[test]
fn ident_may_be_empty() {
    let connection = Scripted::linked(&[&[]]);

    let mut bm58 = Bm58::connect(connection).unwrap();
    let ident = bm58.ident().unwrap();

    assert!(ident.is_empty());
    assert_eq!(ident.text(), "");
}

#[test]
fn ident_text_strips_nul_padding() {
    let connection = Scripted::linked(&[b"Beurer BM-58\0\0\0"]);

    let mut bm58 = Bm58::connect(connection).unwrap();
    let ident = bm58.ident().unwrap();

    assert_eq!(ident.text(), "Beurer BM-58");
}

#[test]
fn record_count_reads_single_byte() {
    let connection = Scripted::linked(&[&[42]]);

    let mut bm58 = Bm58::connect(connection).unwrap();

    assert_eq!(bm58.record_count().unwrap(), 42);
}

#[test]
fn missing_record_count_is_fatal() {
    let connection = Scripted::linked(&[&[]]);

    let mut bm58 = Bm58::connect(connection).unwrap();

    match bm58.record_count() {
        Err(Bm58Error::NotResponding { command }) => assert_eq!(command, 0xA2),
        other => panic!("expected NotResponding, got {other:?}"),
    }
}

#[test]
fn decode_applies_offsets() {
    let measurement = Measurement::from_payload(&[100, 75, 60, 3, 15, 8, 30, 24]);

    assert_eq!(measurement.systole, 125);
    assert_eq!(measurement.diastole, 100);
    assert_eq!(measurement.pulse, 60);
    assert_eq!(measurement.month, 3);
    assert_eq!(measurement.day, 15);
    assert_eq!(measurement.hour, 8);
    assert_eq!(measurement.minute, 30);
    assert_eq!(measurement.year, 2024);
    assert_eq!(measurement.timestamp().to_string(), "2024-03-15 08:30");
}

#[test]
fn decode_is_deterministic() {
    let payload = [255, 0, 33, 12, 31, 23, 59, 99];

    assert_eq!(
        Measurement::from_payload(&payload),
        Measurement::from_payload(&payload)
    );
    assert_eq!(Measurement::from_payload(&payload).systole, 280);
    assert_eq!(Measurement::from_payload(&payload).diastole, 25);
    assert_eq!(Measurement::from_payload(&payload).year, 2099);
}

#[test]
fn classify_present_response() {
    let response = [0xAC, 100, 75, 60, 3, 15, 8, 30, 24];

    match SlotRecord::classify(&response) {
        SlotRecord::Present(measurement) => {
            assert_eq!(measurement, Measurement::from_payload(&[100, 75, 60, 3, 15, 8, 30, 24]));
        }
        other => panic!("expected Present, got {other:?}"),
    }
}

#[test]
fn classify_absent_response() {
    assert_eq!(SlotRecord::classify(&[0xA9]), SlotRecord::Absent);
}

#[test]
fn classify_malformed_responses() {
    // Wrong length, wrong marker, or both.
    let cases: &[&[u8]] = &[
        &[],
        &[0x00],
        &[0xAC],
        &[0xAC, 1, 2, 3, 4],
        &[0xA9, 0xA9],
        &[0x00, 1, 2, 3, 4, 5, 6, 7, 8],
        &[0xAC, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    ];

    for case in cases {
        assert_eq!(
            SlotRecord::classify(case),
            SlotRecord::Malformed { len: case.len() },
            "response {case:02X?}"
        );
    }
}

#[test]
fn records_fetches_every_slot_in_order() {
    let connection = Scripted::linked(&[
        // Record count, then one response per slot.
        &[3],
        &[0xAC, 100, 75, 60, 3, 15, 8, 30, 24],
        &[0xA9],
        &[0xAC, 1, 2],
    ]);

    let mut bm58 = Bm58::connect(connection).unwrap();
    let outcomes: Vec<_> = bm58.records().unwrap().collect();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].0, index(1));
    assert!(matches!(outcomes[0].1, SlotRecord::Present(_)));
    assert_eq!(outcomes[1], (index(2), SlotRecord::Absent));
    assert_eq!(outcomes[2], (index(3), SlotRecord::Malformed { len: 3 }));

    // Handshake, count query, then one fetch per slot, ascending.
    assert_eq!(
        bm58.release().sent,
        vec![
            vec![0xAA],
            vec![0xA2],
            vec![0xA3, 1],
            vec![0xA3, 2],
            vec![0xA3, 3],
        ]
    );
}

#[test]
fn zero_records_yields_empty_stream() {
    let connection = Scripted::linked(&[&[0]]);

    let mut bm58 = Bm58::connect(connection).unwrap();

    {
        let mut records = bm58.records().unwrap();
        assert!(records.is_empty());
        assert_eq!(records.next(), None);
    }

    // No fetch request was ever written.
    assert_eq!(bm58.release().sent, vec![vec![0xAA], vec![0xA2]]);
}

#[test]
fn two_record_session_end_to_end() {
    let connection = Scripted::linked(&[&[2], &[0xAC, 100, 75, 60, 3, 15, 8, 30, 24], &[0xA9]]);

    let mut bm58 = Bm58::connect(connection).unwrap();
    let outcomes: Vec<_> = bm58.records().unwrap().map(|(_, record)| record).collect();

    let expected = Measurement {
        systole: 125,
        diastole: 100,
        pulse: 60,
        month: 3,
        day: 15,
        hour: 8,
        minute: 30,
        year: 2024,
    };

    assert_eq!(outcomes, vec![SlotRecord::Present(expected), SlotRecord::Absent]);
}

#[test]
fn record_index_is_one_based() {
    assert_eq!(RecordIndex::new(0), None);
    assert_eq!(RecordIndex::FIRST.value(), 1);
    assert_eq!(index(254).next(), Some(index(255)));
    assert_eq!(index(255).next(), None);
}

#[cfg(feature = "time")]
#[test]
fn timestamp_converts_valid_dates_only() {
    let valid = Measurement::from_payload(&[100, 75, 60, 3, 15, 8, 30, 24]).timestamp();
    let datetime = valid.to_datetime().unwrap();
    assert_eq!(datetime.year(), 2024);
    assert_eq!(datetime.month(), time::Month::March);
    assert_eq!(datetime.day(), 15);
    assert_eq!(datetime.hour(), 8);
    assert_eq!(datetime.minute(), 30);

    // Month 13 never names a real moment.
    let invalid = Measurement::from_payload(&[100, 75, 60, 13, 15, 8, 30, 24]).timestamp();
    assert_eq!(invalid.to_datetime(), None);
}
