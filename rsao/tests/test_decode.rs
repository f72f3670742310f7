use std::collections::BTreeMap;
use std::io::Write;

use librsao::{
    DecodeOptions, Decoder, GroupData, IndexLayout, IndexTable, SeparatorPolicy, UnusedGroupPolicy,
    errors::{Error, Section},
    parse_bytes, parse_file,
    tables::{GroupKind, group_spec},
};

const SETTINGS: &[u8; 77] =
    b"FF202008303231430001691691101000005016000010001400701000060501280000810140000";

/// Lays out synthetic SAO records group by group.
#[derive(Default)]
struct SaoBuilder {
    slots: Option<usize>,
    groups: BTreeMap<u8, Vec<Vec<u8>>>,
}

impl SaoBuilder {
    fn compact() -> Self {
        SaoBuilder {
            slots: Some(60),
            ..Default::default()
        }
    }

    fn sao4() -> Self {
        SaoBuilder {
            slots: Some(80),
            ..Default::default()
        }
    }

    fn raw(mut self, id: u8, elements: Vec<Vec<u8>>) -> Self {
        self.groups.insert(id, elements);
        self
    }

    fn values(self, id: u8, values: &[f64]) -> Self {
        let width = group_spec(id).unwrap().width;
        let elements = values
            .iter()
            .map(|v| format!("{:>width$.3}", v, width = width).into_bytes())
            .collect();
        self.raw(id, elements)
    }

    fn settings(self, block: &[u8]) -> Self {
        let elements = block.iter().map(|b| vec![*b]).collect();
        self.raw(3, elements)
    }

    fn build(&self) -> Vec<u8> {
        let slots = self.slots.unwrap_or(80);
        let mut out = Vec::new();

        for slot in 0..slots {
            if slot != 0 && slot % 40 == 0 {
                out.extend_from_slice(b"\r\n");
            }
            let count = self
                .groups
                .get(&(slot as u8 + 1))
                .map(|e| e.len())
                .unwrap_or(0);
            out.extend_from_slice(format!("{:03}", count).as_bytes());
        }
        out.extend_from_slice(b"\r\n");

        for (id, elements) in &self.groups {
            if elements.is_empty() {
                continue;
            }
            let spec = group_spec(*id).unwrap();
            if spec.kind == GroupKind::Settings {
                for e in elements {
                    out.extend_from_slice(e);
                }
            } else {
                for (i, e) in elements.iter().enumerate() {
                    assert_eq!(e.len(), spec.width, "group {id} element {i}");
                    if i != 0 && i % spec.wrap_count() == 0 {
                        out.extend_from_slice(b"\r\n");
                    }
                    out.extend_from_slice(e);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out
    }
}

fn compact() -> Decoder {
    Decoder::new(DecodeOptions::default().with_index_layout(IndexLayout::Compact))
}

fn frequencies(n: usize) -> Vec<f64> {
    (0..n).map(|i| (15 + i) as f64 / 10.0).collect()
}

fn heights(n: usize) -> Vec<f64> {
    (0..n).map(|i| 200.0 + i as f64 * 5.0).collect()
}

fn sample_record() -> SaoBuilder {
    SaoBuilder::sao4()
        .values(1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
        .raw(2, vec![format!("{:<120}", "DPS-4D station TR169").into_bytes()])
        .settings(SETTINGS)
        .raw(
            4,
            vec![
                b"0004.250".to_vec(),
                b" Infinit".to_vec(),
                b"0300.000".to_vec(),
            ],
        )
        .values(7, &heights(20))
        .values(11, &frequencies(20))
        .raw(9, (0..45).map(|i| format!("{:>3}", i % 60).into_bytes()).collect())
        .values(22, &heights(4))
        .values(25, &frequencies(4))
        .values(51, &heights(10))
        .values(52, &frequencies(10))
}

#[test]
fn test_full_record() {
    let bytes = sample_record().build();
    let record = Decoder::default().decode(&bytes, "TR169.SAO").unwrap();

    assert_eq!(record.source(), "TR169.SAO");
    assert_eq!(record.offset(), 0);
    assert_eq!(record.encoded_len(), bytes.len());
    assert_eq!(record.index().slots(), 80);

    assert_eq!(record.geophysical_constants(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(record.description(), &["DPS-4D station TR169".to_string()]);
    assert_eq!(record.scaled_characteristics(), &[4.25, 9999.0, 300.0]);
    assert_eq!(record.o_f2_virtual_heights(), heights(20).as_slice());
    assert_eq!(record.o_f2_frequencies(), frequencies(20).as_slice());
    assert_eq!(record.o_f2_amplitudes().len(), 45);
    assert_eq!(record.o_f2_amplitudes()[44], 44.0);
    assert!(record.o_f1_frequencies().is_empty());
    assert!(record.group(12).unwrap().is_absent());

    let summary = record.to_string();
    assert!(summary.contains("O-trace F2 layer virtual heights"));
    assert!(!summary.contains("O-trace F1 layer virtual heights"));

    let timestamp = record.timestamp().unwrap();
    assert_eq!(timestamp.to_string(), "2020-03-23 14:30:00");
    assert_eq!(record.settings().unwrap().receiver_station().unwrap(), "169");
}

#[test]
fn test_lengths_follow_index() {
    let bytes = sample_record().build();
    let record = Decoder::default().decode(&bytes, "lengths").unwrap();

    for (id, data) in record.groups() {
        let count = record.index().count(id);
        match data {
            GroupData::Numeric(values) => assert_eq!(values.len(), count, "group {id}"),
            GroupData::Text(lines) => assert_eq!(lines.len(), count),
            GroupData::Settings(settings) => assert_eq!(settings.len(), count),
            GroupData::Absent => assert_eq!(count, 0, "group {id}"),
        }
    }
}

#[test]
fn test_traces() {
    let bytes = sample_record().build();
    let record = Decoder::default().decode(&bytes, "traces").unwrap();

    let traces = record.traces();
    assert_eq!(traces.len(), 8);

    let o_f2 = &traces[0];
    assert_eq!(o_f2.spec.name, "o_f2");
    assert!(o_f2.is_consistent());
    let points: Vec<_> = o_f2.points().collect();
    assert_eq!(points.len(), 20);
    assert_eq!(points[0], (1.5, 200.0));

    let x_f2 = traces.iter().find(|t| t.spec.name == "x_f2").unwrap();
    assert_eq!(x_f2.points().count(), 4);
    assert!(traces.iter().find(|t| t.spec.name == "o_es").unwrap().is_empty());

    let profile = record.profile();
    assert_eq!(profile.frequencies.len(), 10);
    assert_eq!(profile.heights[9], 245.0);
}

#[test]
fn test_empty_record_is_only_the_index() {
    let bytes = SaoBuilder::compact().build();
    assert_eq!(bytes.len(), 184);

    let record = compact().decode(&bytes, "empty").unwrap();
    assert_eq!(record.encoded_len(), 184);
    assert!(record.groups().all(|(_, g)| g.is_absent()));
    assert!(record.settings().is_none());
    assert!(record.timestamp().is_none());
}

#[test]
fn test_seven_element_group_takes_51_bytes() {
    let bytes = SaoBuilder::compact()
        .values(1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
        .build();
    assert_eq!(&bytes[..3], b"007");

    let record = compact().decode(&bytes, "a").unwrap();
    assert_eq!(record.encoded_len(), IndexTable::encoded_len(IndexLayout::Compact) + 51);
    assert_eq!(record.geophysical_constants().len(), 7);
}

#[test]
fn test_wrap_separators() {
    // 16 eight-byte fields: one wrap before the 16th, one terminator.
    let bytes = SaoBuilder::compact().values(52, &frequencies(16)).build();
    let record = compact().decode(&bytes, "b").unwrap();
    assert_eq!(record.encoded_len(), 184 + 16 * 8 + 2 + 2);
    assert_eq!(record.plasma_frequencies()[15], frequencies(16)[15]);

    // 41 three-byte fields: one wrap before element 40.
    let bytes = SaoBuilder::compact()
        .raw(34, (0..41).map(|_| b" 12".to_vec()).collect())
        .build();
    let record = compact().decode(&bytes, "b").unwrap();
    assert_eq!(record.encoded_len(), 184 + 41 * 3 + 2 + 2);
}

#[test]
fn test_strict_separators_on_built_record() {
    let bytes = sample_record().build();
    let decoder = Decoder::new(DecodeOptions::default().with_separators(SeparatorPolicy::Strict));
    assert!(decoder.decode(&bytes, "strict").is_ok());

    let mut broken = bytes.clone();
    let at = IndexTable::encoded_len(IndexLayout::Sao4) + 7 * 7;
    assert_eq!(&broken[at..at + 2], b"\r\n");
    broken[at..at + 2].copy_from_slice(b"  ");
    let err = decoder.decode(&broken, "strict").unwrap_err();
    assert!(matches!(
        err,
        Error::SeparatorMismatch {
            section: Section::Group(1),
            ..
        }
    ));
    assert!(Decoder::default().decode(&broken, "lenient").is_ok());
}

#[test]
fn test_short_settings_block() {
    let bytes = SaoBuilder::compact()
        .settings(&SETTINGS[..76])
        .values(4, &[1.0])
        .build();
    let record = compact().decode(&bytes, "d").unwrap();
    let settings = record.settings().unwrap();

    assert_eq!(settings.len(), 76);
    assert_eq!(settings.year().unwrap(), 2020);
    assert_eq!(settings.hour().unwrap(), 14);
    assert!(matches!(
        settings.high_interference(),
        Err(Error::MalformedRecord {
            field: "high_interference",
            ..
        })
    ));
    assert_eq!(record.scaled_characteristics(), &[1.0]);
}

#[test]
fn test_zero_count_group_between_groups() {
    let bytes = SaoBuilder::compact()
        .values(39, &[1.25, 2.5])
        .raw(41, vec![b"1".to_vec(), b"0".to_vec(), b"1".to_vec()])
        .build();
    assert_eq!(&bytes[3 * 39..3 * 40], b"000");

    let record = compact().decode(&bytes, "e").unwrap();
    assert!(record.group(40).unwrap().is_absent());
    assert!(record.quasi_parabolic_segments().is_empty());
    assert_eq!(record.e_true_height_coefficients(), &[1.25, 2.5]);
    assert_eq!(record.edit_flags(), &[1.0, 0.0, 1.0]);
    assert_eq!(record.encoded_len(), 184 + (2 * 11 + 2) + (3 + 2));
}

#[test]
fn test_idempotent() {
    let bytes = sample_record().build();
    let decoder = Decoder::default();
    let first = decoder.decode(&bytes, "same").unwrap();
    let second = decoder.decode(&bytes, "same").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unused_group_policy() {
    let bytes = SaoBuilder::compact()
        .values(53, &[9999.5])
        .raw(54, vec![b"A".to_vec(), b"B".to_vec()])
        .build();

    let err = compact().decode(&bytes, "unused").unwrap_err();
    match err {
        Error::UnexpectedGroup { group, count, offset } => {
            assert_eq!(group, 54);
            assert_eq!(count, 2);
            assert_eq!(offset, 184 + 8 + 2);
        }
        other => panic!("unexpected error: {other}"),
    }

    let decoder = Decoder::new(
        DecodeOptions::default()
            .with_index_layout(IndexLayout::Compact)
            .with_unused_groups(UnusedGroupPolicy::Skip),
    );
    let record = decoder.decode(&bytes, "unused").unwrap();
    assert_eq!(record.encoded_len(), bytes.len());
    assert!(record.group(54).unwrap().is_absent());
    assert_eq!(record.electron_densities(), &[9999.5]);
}

#[test]
fn test_error_stops_decoding() {
    let mut bytes = sample_record().build();
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let at = text.find("0300.000").unwrap();
    bytes[at..at + 8].copy_from_slice(b"03O0.000");

    let err = Decoder::default().decode(&bytes, "bad").unwrap_err();
    match err {
        Error::MalformedField {
            group,
            element,
            offset,
            ..
        } => {
            assert_eq!(group, 4);
            assert_eq!(element, 2);
            assert_eq!(offset, at);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_truncated_file() {
    let bytes = sample_record().build();
    let err = Decoder::default()
        .decode(&bytes[..bytes.len() - 1], "short")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Truncated {
            section: Section::Group(52),
            needed: 2,
            available: 1,
            ..
        }
    ));
    assert_eq!(err.offset(), Some(bytes.len() - 2));
}

#[test]
fn test_multiple_records() {
    let first = sample_record().build();
    let second = SaoBuilder::sao4().values(7, &heights(3)).build();

    let mut bytes = first.clone();
    bytes.extend_from_slice(&second);
    bytes.extend_from_slice(b"\r\n\x1a");

    let file = Decoder::default().decode_all(&bytes, "archive").unwrap();
    assert_eq!(file.record_count(), 2);
    assert_eq!(file.record_at(1).unwrap().offset(), first.len());
    assert_eq!(file.record_at(1).unwrap().o_f2_virtual_heights().len(), 3);

    let record = Decoder::default().decode(&bytes, "archive").unwrap();
    assert_eq!(&record, file.record_at(0).unwrap());
}

#[test]
fn test_parse_gzip_file() {
    let bytes = sample_record().build();

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&bytes).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&compressed).unwrap();

    let options = DecodeOptions::default();
    let from_file = parse_file(tmp.path(), &options).unwrap();
    let from_plain = parse_bytes(&bytes, "plain", &options).unwrap();
    assert_eq!(from_file.record_count(), 1);
    assert_eq!(
        from_file.records()[0].o_f2_frequencies(),
        from_plain.records()[0].o_f2_frequencies()
    );
}

#[test]
fn test_missing_file() {
    let err = parse_file("/nonexistent/file.SAO", &DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_record_serializes() {
    let bytes = sample_record().build();
    let record = Decoder::default().decode(&bytes, "json").unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["source"], "json");
    assert_eq!(json["groups"][0]["Numeric"][6], 7.0);
    assert_eq!(json["groups"][11], "Absent");
}

#[test]
fn test_eleven_byte_group_wraps_after_ten() {
    let coefficients: Vec<f64> = (1..=11).map(|i| i as f64 * 0.5).collect();
    let bytes = SaoBuilder::compact().values(37, &coefficients).build();
    let record = compact().decode(&bytes, "wrap11").unwrap();

    assert_eq!(record.encoded_len(), bytes.len());
    assert_eq!(record.encoded_len(), 184 + 11 * 11 + 2 + 2);
    assert_eq!(&bytes[184 + 110..184 + 112], b"\r\n");
    assert_eq!(record.f2_true_height_coefficients(), coefficients.as_slice());
}

#[test]
fn test_overflowing_field_is_malformed() {
    let bytes = SaoBuilder::compact()
        .raw(4, vec![b"0001.000".to_vec(), b"1.0E+999".to_vec()])
        .build();
    let err = compact().decode(&bytes, "overflow").unwrap_err();
    match err {
        Error::MalformedField {
            group,
            element,
            offset,
            text,
        } => {
            assert_eq!(group, 4);
            assert_eq!(element, 1);
            assert_eq!(offset, 184 + 8);
            assert_eq!(text, "1.0E+999");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_impossible_date_keeps_settings() {
    let mut block = *SETTINGS;
    block[9..13].copy_from_slice(b"0230");
    let bytes = SaoBuilder::compact().settings(&block).build();
    let record = compact().decode(&bytes, "date").unwrap();

    assert!(record.timestamp().is_none());
    let settings = record.settings().unwrap();
    assert!(matches!(
        settings.timestamp(),
        Err(Error::MalformedRecord {
            field: "timestamp",
            ..
        })
    ));
}
