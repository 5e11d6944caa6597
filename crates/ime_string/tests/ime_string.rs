#![expect(unsafe_code, reason = "builds strings from native pointers")]

use ime_string::{CAPACITY, ImeString, ImeStringError};

fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

#[test]
fn hello() {
    let s = ImeString::from("hello");

    assert_eq!(s.len(), 5);
    assert_eq!(s.get(0), Ok(u16::from(b'h')));
    assert_eq!(s.get(4), Ok(u16::from(b'o')));
    assert_eq!(s.to_string(), "hello");
}

// Oversized text keeps CAPACITY - 1 units, not CAPACITY.
#[test]
fn hundred_char_text_keeps_63() {
    let s = ImeString::from("a".repeat(100).as_str());

    assert_eq!(s.len(), 63);
    assert_eq!(s.len(), CAPACITY - 1);
    assert_eq!(s.to_string(), "a".repeat(63));
}

#[test]
fn null_handle_is_empty() {
    let s = unsafe { ImeString::from_wide_ptr(core::ptr::null()) };

    assert_eq!(s.len(), 0);
    assert_eq!(s.to_string(), "");
    assert_eq!(s, ImeString::EMPTY);
}

#[test]
fn terminated_handle() {
    let native = units("hi\0");
    let s = unsafe { ImeString::from_wide_ptr(native.as_ptr()) };

    assert_eq!(s.len(), 2);
    assert_eq!(s, "hi");
}

#[test]
fn terminated_handle_stops_at_first_terminator() {
    let native = units("ab\0cd\0");
    let s = unsafe { ImeString::from_wide_ptr(native.as_ptr()) };

    assert_eq!(s, "ab");
}

#[test]
fn terminated_handle_stops_at_capacity() {
    let mut native = vec![u16::from(b'n'); CAPACITY + 10];
    native.push(0);
    let s = unsafe { ImeString::from_wide_ptr(native.as_ptr()) };

    assert_eq!(s.len(), CAPACITY);
    assert!(s.iter().all(|u| u == u16::from(b'n')));
}

#[test]
fn counted_form_keeps_prefix() {
    let source = units("0123456789");
    for count in 0..=source.len() {
        let s = ImeString::from_units(&source, count);
        assert_eq!(s.len(), count);
        assert_eq!(s.as_slice(), &source[..count]);
    }
}

// Counted input is capped at CAPACITY, with no off-by-one.
#[test]
fn counted_form_caps_at_capacity() {
    let source: Vec<u16> = (0..200).collect();
    let s = ImeString::from_units(&source, source.len());

    assert_eq!(s.len(), CAPACITY);
    assert_eq!(s.as_slice(), &source[..CAPACITY]);

    let s = unsafe { ImeString::from_raw_parts(source.as_ptr(), source.len()) };
    assert_eq!(s.len(), CAPACITY);
}

#[test]
fn list_form_matches_text_form() {
    let long = "z".repeat(CAPACITY + 1);
    assert_eq!(ImeString::from(units(&long)).len(), CAPACITY - 1);
    assert_eq!(ImeString::from(&units("kana")), "kana");
}

#[test]
fn empty_inputs_match_empty() {
    let inputs = [
        ImeString::from(""),
        ImeString::from_slice(&[]),
        ImeString::from(Vec::<u16>::new()),
        ImeString::from_units(&units("abc"), 0),
        unsafe { ImeString::from_raw_parts(core::ptr::null(), 10) },
        unsafe { ImeString::from_wide_ptr(units("\0").as_ptr()) },
        ImeString::default(),
        ImeString::new(),
    ];

    for s in inputs {
        assert_eq!(s, ImeString::EMPTY);
        assert!(s.is_empty());
        assert_eq!(s.iter().count(), 0);
        assert_eq!(s.to_string(), "");
        assert_eq!(s.get(0), Err(ImeStringError::OutOfRange { index: 0, len: 0 }));
    }
}

#[test]
fn get_fails_at_and_past_len() {
    let full = "q".repeat(CAPACITY);
    for text in ["", "x", "candidate", full.as_str()] {
        let s = ImeString::from(text);
        for i in 0..s.len() {
            assert!(s.get(i).is_ok());
        }
        for i in [s.len(), s.len() + 1, CAPACITY, usize::MAX] {
            assert_eq!(
                s.get(i),
                Err(ImeStringError::OutOfRange { index: i, len: s.len() })
            );
        }
    }
}

#[test]
fn iteration_is_ordered_and_restartable() {
    let s = ImeString::from("restart");

    let once: Vec<u16> = s.iter().collect();
    let mut twice = Vec::new();
    for unit in &s {
        twice.push(unit);
    }

    assert_eq!(once, units("restart"));
    assert_eq!(once, twice);
}

#[test]
fn string_round_trip() {
    let full = "r".repeat(CAPACITY);
    for text in ["", "a", "ひらがな", "mixed 漢字 text", full.as_str()] {
        assert_eq!(ImeString::from(text).to_string(), text);
    }
}

#[test]
fn handle_points_at_storage() {
    let s = ImeString::from("ptr");
    let handle = s.handle();

    assert_eq!(handle.as_ptr(), s.as_ptr());
    let read: Vec<u16> = (0..s.len()).map(|i| unsafe { handle.get(i) }).collect();
    assert_eq!(read, s.as_slice());

    // A fresh string read back through its own pointer is identical.
    let again = unsafe { ImeString::from_raw_parts(s.as_ptr(), s.len()) };
    assert_eq!(again, s);
}

#[test]
fn error_messages() {
    let err = ImeString::from("ab").get(5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "index 5 is out of range for an ImeString of length 2"
    );
}
