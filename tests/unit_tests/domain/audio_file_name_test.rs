use safepath::domain::AudioFileName;

#[test]
fn given_response_prefix_when_generating_then_name_has_prefix_timestamp_and_extension() {
    let name = AudioFileName::for_response();

    let parts: Vec<&str> = name.as_str().trim_end_matches(".wav").split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "response");
    assert!(parts[1].parse::<i64>().is_ok());
    assert_eq!(parts[2].len(), 8);
    assert!(name.as_str().ends_with(".wav"));
}

#[test]
fn given_two_names_in_same_second_when_generating_then_they_differ() {
    let first = AudioFileName::for_upload();
    let second = AudioFileName::for_upload();

    assert_ne!(first, second);
}

#[test]
fn given_plain_file_name_when_parsing_then_accepted() {
    let name = AudioFileName::parse("response_1718000000_ab12cd34.wav").unwrap();

    assert_eq!(name.as_str(), "response_1718000000_ab12cd34.wav");
    assert_eq!(name.to_string(), "response_1718000000_ab12cd34.wav");
}

#[test]
fn given_path_separators_when_parsing_then_rejected() {
    for raw in ["../secret.wav", "a/b.wav", "a\\b.wav", "..", ".", ""] {
        assert!(AudioFileName::parse(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn given_control_character_when_parsing_then_rejected() {
    assert!(AudioFileName::parse("bad\nname.wav").is_err());
}
