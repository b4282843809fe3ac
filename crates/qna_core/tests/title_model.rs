use qna_core::{Locale, Title, TitleError, MAX_TITLE_LENGTH, MIN_TEXT_LENGTH};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

fn hash_of(title: &Title) -> u64 {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn accepts_lengths_within_bounds() {
    for length in [MIN_TEXT_LENGTH, 2, 50, MAX_TITLE_LENGTH] {
        let text = "a".repeat(length);
        let title = Title::new(text.clone()).unwrap();
        assert_eq!(title.as_str(), text);
        assert_eq!(title, Title::new(text).unwrap());
    }
}

#[test]
fn rejects_empty_and_too_long_text() {
    let err = Title::new("").unwrap_err();
    assert_eq!(
        err,
        TitleError::InvalidLength {
            length: 0,
            min: MIN_TEXT_LENGTH,
            max: MAX_TITLE_LENGTH,
        }
    );

    let err = Title::new("a".repeat(MAX_TITLE_LENGTH + 1)).unwrap_err();
    assert!(matches!(err, TitleError::InvalidLength { length: 101, .. }));
}

#[test]
fn rejects_absent_text() {
    assert_eq!(Title::from_optional(None).unwrap_err(), TitleError::Missing);
    assert!(Title::from_optional(Some("present".to_string())).is_ok());
}

#[test]
fn counts_characters_not_bytes() {
    let korean = "질".repeat(MAX_TITLE_LENGTH);
    assert!(korean.len() > MAX_TITLE_LENGTH);
    assert!(Title::new(korean).is_ok());
}

#[test]
fn equality_and_hash_follow_text() {
    let first = Title::new("abc").unwrap();
    let second = Title::new("abc").unwrap();
    let other = Title::new("abd").unwrap();

    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
    assert_ne!(first, other);
    assert_ne!(first, Title::new("ABC").unwrap());

    let set: HashSet<Title> = [first, second, other].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn whitespace_is_kept_verbatim() {
    let title = Title::new(" padded ").unwrap();
    assert_eq!(title.as_str(), " padded ");
    assert_ne!(title, Title::new("padded").unwrap());
}

#[test]
fn conversions_share_validation() {
    assert!(Title::try_from("ok").is_ok());
    assert!(Title::try_from(String::new()).is_err());
    assert!("".parse::<Title>().is_err());
    assert_eq!("hello".parse::<Title>().unwrap().to_string(), "hello");
}

#[test]
fn serializes_as_bare_string_and_validates_on_deserialize() {
    let title = Title::new("What is ownership?").unwrap();
    let json = serde_json::to_value(&title).unwrap();
    assert_eq!(json, serde_json::json!("What is ownership?"));

    let decoded: Title = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, title);

    let err = serde_json::from_value::<Title>(serde_json::json!("")).unwrap_err();
    assert!(err.to_string().contains("must be 1..=100 characters"));

    let err = serde_json::from_value::<Title>(serde_json::Value::Null).unwrap_err();
    assert!(err.to_string().contains("required"));
}

#[test]
fn error_messages_are_localized() {
    let err = Title::new("").unwrap_err();
    assert!(err.localized_message(Locale::En).contains("1..=100"));
    assert_eq!(
        err.localized_message(Locale::Ko),
        "질문의 제목 길이는 최소 1이상 100이하여야 합니다."
    );
}

#[test]
fn rejects_nul_characters() {
    assert_eq!(Title::new("\0abc").unwrap_err(), TitleError::ContainsNul);
    assert_eq!(Title::new("ab\0c").unwrap_err(), TitleError::ContainsNul);
    assert!(Title::new("abc").is_ok());
}
