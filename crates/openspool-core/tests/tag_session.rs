use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use openspool_core::{
    Catalog, EngineConfig, FileTag, MaterialType, PipelineError, SessionError, SpoolProfile,
    TagSession, TemperatureRange, read_profile, write_profile,
};

fn temp_dump(name: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("openspool_{name}_{unique}.ndef"))
}

#[test]
fn file_tag_round_trips_profile() {
    let path = temp_dump("round_trip");
    let orange = Catalog::builtin().find_by_value("orange").unwrap();
    let profile =
        SpoolProfile::from_color(orange, MaterialType::Abs, TemperatureRange::new(235, 255))
            .with_brand("Hatchbox");

    let mut tag = FileTag::create(&path);
    write_profile(&mut tag, &profile, &EngineConfig::default()).unwrap();

    let mut reopened = FileTag::open(&path).unwrap();
    let read = read_profile(&mut reopened, &EngineConfig::default()).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(read, profile);
}

#[test]
fn file_tag_open_missing_dump() {
    let path = temp_dump("missing");
    let err = match FileTag::open(&path) {
        Ok(_) => panic!("expected missing dump to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SessionError::Io(_)));
}

#[test]
fn file_tag_rejects_truncated_message() {
    let path = temp_dump("truncated");
    fs::write(&path, [0xd2, 0x10, 0x20, b'a', b'p']).unwrap();

    let mut tag = FileTag::open(&path).unwrap();
    let err = read_profile(&mut tag, &EngineConfig::default()).unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(err, PipelineError::Session(SessionError::Ndef(_))));
}

#[test]
fn file_tag_raw_payload_matches_encoding() {
    let path = temp_dump("raw");
    let mut tag = FileTag::create(&path);
    tag.write_payload(br#"{"color_hex":"9d432c","type":"tpu","min_temp":210,"max_temp":230}"#)
        .unwrap();

    let message = fs::read(&path).unwrap();
    let profile = read_profile(&mut tag, &EngineConfig::default()).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(&message[3..19], b"application/json");
    assert_eq!(profile.color_value, "brown");
    assert_eq!(profile.material, MaterialType::Tpu);
}
