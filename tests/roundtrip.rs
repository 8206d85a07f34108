use ymtool::ym_parser::YmVersion;
use ymtool::{DecodeOptions, DigiDrum, Header, MetadataEdit, Text, YmError, YmFile};

/// Builds a YM6 file with two DigiDrums, a skip region and metadata.
fn build_song(frame_count: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"YM6!");
    data.extend_from_slice(b"LeOnArD!");
    data.extend_from_slice(&frame_count.to_be_bytes());
    data.extend_from_slice(&0x0000_0005u32.to_be_bytes()); // Interleaved + 4-bit drums
    data.extend_from_slice(&2u16.to_be_bytes());
    data.extend_from_slice(&2_000_000u32.to_be_bytes());
    data.extend_from_slice(&50u16.to_be_bytes());
    data.extend_from_slice(&12u32.to_be_bytes());
    data.extend_from_slice(&4u16.to_be_bytes());
    data.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);

    data.extend_from_slice(&6u32.to_be_bytes());
    data.extend_from_slice(&[0x0F, 0x0E, 0x0D, 0x0C, 0x0B, 0x0A]);
    data.extend_from_slice(&1u32.to_be_bytes());
    data.push(0x80);

    data.extend_from_slice(b"Wings of Death\0Jochen Hippel\0Converted by Leonard\xb0\0");

    for i in 0..frame_count * 16 {
        data.push((i * 7 % 251) as u8);
    }
    data.extend_from_slice(b"End!");
    data
}

fn decode(data: &[u8]) -> YmFile {
    YmFile::from_bytes(data, DecodeOptions::strict()).expect("well-formed song")
}

fn header_len(data: &[u8]) -> usize {
    decode(data).header().encoded_len()
}

#[test]
fn round_trip_is_identity() {
    let data = build_song(32);
    assert_eq!(decode(&data).to_bytes().unwrap(), data);
}

#[test]
fn re_encode_is_idempotent() {
    let mut data = build_song(8);
    data.truncate(data.len() - 4);
    let once = YmFile::from_bytes(&data, DecodeOptions::lenient())
        .unwrap()
        .to_bytes()
        .unwrap();
    let twice = decode(&once).to_bytes().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn song_name_edit_only_touches_its_field() {
    let data = build_song(16);
    let mut file = decode(&data);
    file.set_metadata(MetadataEdit {
        song_name: Some("Wings".into()),
        ..Default::default()
    });
    let edited = file.to_bytes().unwrap();

    // Song name starts after 34 fixed bytes, 4 skip bytes and the DigiDrums
    let name_start = 34 + 4 + (4 + 6) + (4 + 1);
    let old_name_end = name_start + "Wings of Death".len();
    let new_name_end = name_start + "Wings".len();

    assert_eq!(&edited[..name_start], &data[..name_start]);
    assert_eq!(&edited[name_start..new_name_end], b"Wings");
    assert_eq!(edited[new_name_end], 0);
    assert_eq!(&edited[new_name_end..], &data[old_name_end..]);
}

#[test]
fn digest_is_stable_under_metadata_edits() {
    let data = build_song(16);
    let mut file = decode(&data);
    let before = file.frame_digest();

    file.set_metadata(MetadataEdit {
        song_name: Some("Renamed".into()),
        author: Some("Somebody".into()),
        comment: Some(String::new()),
    });
    let reread = decode(&file.to_bytes().unwrap());

    assert_eq!(before, reread.frame_digest());
    assert_eq!(reread.header().author.to_string(), "Somebody");
}

#[test]
fn truncated_frames_report_counts() {
    let data = build_song(10);
    let cut = header_len(&data) + 100;
    match YmFile::from_bytes(&data[..cut], DecodeOptions::lenient()) {
        Err(YmError::TruncatedFrameData { expected, actual }) => {
            assert_eq!(expected, 160);
            assert_eq!(actual, 100);
        }
        other => panic!("expected TruncatedFrameData, got {other:?}"),
    }
}

#[test]
fn ym3b_is_unsupported_not_malformed() {
    let mut data = build_song(2);
    data[..4].copy_from_slice(b"YM3b");
    match YmFile::from_bytes(&data, DecodeOptions::strict()) {
        Err(YmError::UnsupportedVersion(version)) => {
            assert_eq!(version, YmVersion::Ym3b);
            assert_eq!(version.to_string(), "YM3b");
        }
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn end_marker_only_checked_in_strict_mode() {
    let mut data = build_song(4);
    data.truncate(data.len() - 4);

    let file = YmFile::from_bytes(&data, DecodeOptions::lenient()).unwrap();
    assert!(matches!(
        YmFile::from_bytes(&data, DecodeOptions::strict()),
        Err(YmError::MissingEndMarker)
    ));

    // Encoding always appends the marker
    let encoded = file.to_bytes().unwrap();
    assert!(encoded.ends_with(b"End!"));
    assert_eq!(&encoded[..data.len()], &data[..]);
}

#[test]
fn empty_text_fields_round_trip() {
    let header = Header {
        frame_count: 1,
        ..Default::default()
    };
    let file = YmFile::new(header, vec![0x3F; 16]).unwrap();
    let encoded = file.to_bytes().unwrap();

    let text_start = 34;
    assert_eq!(&encoded[text_start..text_start + 3], &[0u8, 0, 0][..]);

    let decoded = decode(&encoded);
    assert!(decoded.header().song_name.is_empty());
    assert!(decoded.header().author.is_empty());
    assert!(decoded.header().comment.is_empty());
    assert_eq!(decoded, file);
}

#[test]
fn sample_list_edits_round_trip() {
    let data = build_song(3);
    let mut file = decode(&data);
    file.header_mut().samples.remove(0);
    file.header_mut().samples.push(DigiDrum::new(vec![1, 2, 3]));
    file.header_mut().samples.push(DigiDrum::default());

    let reread = decode(&file.to_bytes().unwrap());
    assert_eq!(reread.header().samples, file.header().samples);
    assert_eq!(reread.frames(), file.frames());
}

#[test]
fn non_latin1_edit_is_replaced() {
    let data = build_song(1);
    let mut file = decode(&data);
    file.set_metadata(MetadataEdit {
        comment: Some("\u{2665} YM".into()),
        ..Default::default()
    });
    assert_eq!(file.header().comment, Text::from_bytes(b"? YM"));
    let reread = decode(&file.to_bytes().unwrap());
    assert_eq!(reread.header().comment.as_bytes(), b"? YM");
}

#[test]
fn high_bit_text_survives() {
    let data = build_song(1);
    let file = decode(&data);
    assert_eq!(
        file.header().comment.as_bytes().last(),
        Some(&0xb0),
        "degree sign kept as a raw byte"
    );
    assert_eq!(file.to_bytes().unwrap(), data);
}

#[test]
fn unknown_attribute_bits_survive() {
    let mut data = build_song(2);
    data[16..20].copy_from_slice(&0xFFFF_FF00u32.to_be_bytes());
    let file = decode(&data);
    assert!(!file.header().attributes.is_interleaved());
    assert_eq!(file.to_bytes().unwrap(), data);
}
