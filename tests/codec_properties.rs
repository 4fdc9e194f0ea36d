//! Property tests for the type/state string codec

use proptest::prelude::*;
use tabula::codec::{SequenceDecoder, SequenceEncoder};
use tabula::render::colors::Color;

fn encode_all(fields: &[String]) -> String {
    let mut e = SequenceEncoder::new(';');
    for f in fields {
        e = e.append(f);
    }
    e.value()
}

fn decode_all(s: &str) -> Vec<String> {
    let mut d = SequenceDecoder::new(s, ';');
    let mut out = Vec::new();
    while let Some(token) = d.next_token() {
        out.push(token);
    }
    out
}

proptest! {
    #[test]
    fn round_trip_plain_fields(fields in proptest::collection::vec("[a-zA-Z0-9 _.,-]{0,20}", 1..8)) {
        let encoded = encode_all(&fields);
        prop_assert_eq!(decode_all(&encoded), fields);
    }

    #[test]
    fn round_trip_fields_with_delimiter_and_escape_bytes(
        fields in proptest::collection::vec(r#"[a-z;\\]{0,20}"#, 1..8)
    ) {
        let encoded = encode_all(&fields);
        prop_assert_eq!(decode_all(&encoded), fields);
    }

    #[test]
    fn round_trip_arbitrary_unicode(fields in proptest::collection::vec(".{0,12}", 1..6)) {
        let encoded = encode_all(&fields);
        prop_assert_eq!(decode_all(&encoded), fields);
    }

    #[test]
    fn decode_never_panics_on_arbitrary_input(input in ".{0,64}") {
        let mut d = SequenceDecoder::new(&input, ';');
        let _ = d.next_str("x");
        let _ = d.next_int(0);
        let _ = d.next_bool(false);
        let _ = d.next_color(Color::RED);
        while d.next_token().is_some() {}
    }

    #[test]
    fn round_trip_typed_fields(v in any::<i64>(), b in any::<bool>(), (r, g, bch) in (any::<u8>(), any::<u8>(), any::<u8>())) {
        let color = Color::new(r, g, bch);
        let encoded = SequenceEncoder::new(';')
            .append_int(v)
            .append_bool(b)
            .append_color(color)
            .value();
        let mut d = SequenceDecoder::new(&encoded, ';');
        prop_assert_eq!(d.next_int(0), v);
        prop_assert_eq!(d.next_bool(!b), b);
        prop_assert_eq!(d.next_color(Color::BLACK), color);
    }
}

#[test]
fn truncated_border_type_decodes_to_defaults() {
    // The canonical truncation example: everything after the tag missing
    let mut d = SequenceDecoder::new("border;", ';');
    assert_eq!(d.next_str(""), "border");
    assert_eq!(d.next_str(""), ""); // property name
    assert_eq!(d.next_str(""), ""); // description
    assert_eq!(d.next_int(2), 2); // thickness
    assert_eq!(d.next_color(Color::RED), Color::RED);
}

#[test]
fn newer_revision_extra_fields_are_ignored() {
    let mut d = SequenceDecoder::new("border;Prop;desc;2;255,0,0;future;42", ';');
    d.next_token();
    assert_eq!(d.next_str(""), "Prop");
    assert_eq!(d.next_str(""), "desc");
    assert_eq!(d.next_int(2), 2);
    assert_eq!(d.next_color(Color::BLACK), Color::RED);
    // Older decoders simply stop reading here; the rest stays unread
    assert!(d.has_more());
}
