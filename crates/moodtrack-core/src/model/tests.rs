use chrono::NaiveDate;

use crate::model::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_category_table_order_and_weights() {
    let weights: Vec<u8> = MoodCategory::ALL.iter().map(|c| c.weight()).collect();
    assert_eq!(weights, vec![5, 4, 3, 2, 1]);

    let labels: Vec<&str> = MoodCategory::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(
        labels,
        vec!["Sangat Senang", "Senang", "Biasa Saja", "Sedih", "Sangat Sedih"]
    );
}

#[test]
fn test_label_weight_label_roundtrip() {
    for category in MoodCategory::ALL {
        let weight = MoodCategory::from_label(category.label()).unwrap().weight();
        let back = MoodCategory::from_weight(weight).unwrap();
        assert_eq!(back, category);
        assert_eq!(back.label(), category.label());
    }
}

#[test]
fn test_color_bijection() {
    for category in MoodCategory::ALL {
        assert_eq!(MoodCategory::from_color(category.color()), Some(category));
        assert_eq!(
            MoodCategory::from_color(&category.color().to_lowercase()),
            Some(category)
        );
        // The chart colour for a category's weight is the category's own colour.
        assert_eq!(weight_color(category.weight()), category.color());
    }
    let colors: std::collections::HashSet<&str> =
        MoodCategory::ALL.iter().map(|c| c.color()).collect();
    assert_eq!(colors.len(), 5);
}

#[test]
fn test_index_matches_position() {
    for (i, category) in MoodCategory::ALL.iter().enumerate() {
        assert_eq!(category.index(), i);
    }
}

#[test]
fn test_weight_color_fallthrough() {
    assert_eq!(weight_color(0), "#F44336");
    assert_eq!(weight_color(9), "#F44336");
}

#[test]
fn test_category_from_str_variants() {
    assert_eq!("senang".parse::<MoodCategory>(), Ok(MoodCategory::Happy));
    assert_eq!("3".parse::<MoodCategory>(), Ok(MoodCategory::Neutral));
    assert_eq!("#f44336".parse::<MoodCategory>(), Ok(MoodCategory::VerySad));
    assert!("6".parse::<MoodCategory>().is_err());
    assert!("ecstatic".parse::<MoodCategory>().is_err());
}

#[test]
fn test_category_serde_uses_label() {
    let json = serde_json::to_string(&MoodCategory::Sad).unwrap();
    assert_eq!(json, "\"Sedih\"");
    let parsed: MoodCategory = serde_json::from_str("\"Sangat Senang\"").unwrap();
    assert_eq!(parsed, MoodCategory::VeryHappy);
    assert!(serde_json::from_str::<MoodCategory>("\"Marah\"").is_err());
}

#[test]
fn test_hex_to_rgb() {
    assert_eq!(hex_to_rgb("#4CAF50"), Some((0x4C, 0xAF, 0x50)));
    assert_eq!(hex_to_rgb("ffc107"), Some((0xFF, 0xC1, 0x07)));
    assert_eq!(hex_to_rgb("#123"), None);
    assert_eq!(hex_to_rgb("#zzzzzz"), None);
    assert_eq!(MoodCategory::Happy.rgb(), (0x8B, 0xC3, 0x4A));
}

#[test]
fn test_record_deserialize_numeric_id_and_datetime() {
    let json = r##"{
        "mood_id": 42,
        "date": "2025-12-03T00:00:00.000Z",
        "mood": "Senang",
        "color": "#8BC34A",
        "note": null
    }"##;
    let record: MoodRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.mood_id, "42");
    assert_eq!(record.date, date(2025, 12, 3));
    assert_eq!(record.category(), Some(MoodCategory::Happy));
    assert!(record.note_text().is_none());
}

#[test]
fn test_record_deserialize_plain_date_missing_note() {
    let json = r##"{"mood_id": "m-1", "date": "2025-04-09", "mood": "Sedih", "color": "#FF9800"}"##;
    let record: MoodRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.mood_id, "m-1");
    assert_eq!(record.date, date(2025, 4, 9));
    assert!(record.note.is_none());
}

#[test]
fn test_record_rejects_bad_date() {
    let json = r#"{"mood_id": "1", "date": "yesterday", "mood": "Sedih"}"#;
    assert!(serde_json::from_str::<MoodRecord>(json).is_err());
}

#[test]
fn test_empty_note_same_as_absent() {
    let mut record = MoodRecord {
        mood_id: "1".into(),
        date: date(2025, 1, 1),
        mood: "Senang".into(),
        color: "#8BC34A".into(),
        note: Some("   ".into()),
    };
    assert!(record.note_text().is_none());
    record.note = Some("walked the dog".into());
    assert_eq!(record.note_text(), Some("walked the dog"));
}

#[test]
fn test_unknown_label_has_no_category() {
    let json = r##"{"mood_id": "1", "date": "2025-01-01", "mood": "Marah", "color": "#000000"}"##;
    let record: MoodRecord = serde_json::from_str(json).unwrap();
    assert!(record.category().is_none());
}

#[test]
fn test_mood_input_body() {
    let input = MoodInput::new(date(2025, 4, 1), MoodCategory::Neutral, "meh");
    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "date": "2025-04-01",
            "color": "#FFC107",
            "mood": "Biasa Saja",
            "note": "meh"
        })
    );
}

#[test]
fn test_user_fallbacks() {
    let user = User::new("", "a@b.c");
    assert_eq!(user.display_name(), DEFAULT_DISPLAY_NAME);
    assert_eq!(user.avatar_url(), DEFAULT_AVATAR_URL);

    let user = User {
        name: "Rina".into(),
        email: "rina@example.com".into(),
        avatar: Some("https://example.com/r.png".into()),
    };
    assert_eq!(user.display_name(), "Rina");
    assert_eq!(user.avatar_url(), "https://example.com/r.png");
}

#[test]
fn test_login_response_parse() {
    let json = r#"{"token": "abc", "user": {"name": "Rina", "email": "rina@example.com"}}"#;
    let resp: LoginResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.token, "abc");
    assert!(resp.user.avatar.is_none());
}

#[test]
fn test_recommendation_parse_and_alias() {
    let json = r#"{
        "average_mood": 2.4,
        "low_moood_days": 7,
        "level": "bad",
        "recommendation": "Try to rest more."
    }"#;
    let rec: Recommendation = serde_json::from_str(json).unwrap();
    assert_eq!(rec.low_mood_days, 7);
    assert_eq!(rec.level, MoodLevel::Bad);
    assert!((rec.average_mood - 2.4).abs() < f64::EPSILON);
}

#[test]
fn test_level_unknown_falls_back_to_bad() {
    let level: MoodLevel = serde_json::from_str("\"terrible\"").unwrap();
    assert_eq!(level, MoodLevel::Bad);
    let level: MoodLevel = serde_json::from_str("\"Neutral\"").unwrap();
    assert_eq!(level, MoodLevel::Neutral);
}

#[test]
fn test_recommendation_without_level_is_bad() {
    let rec: Recommendation = serde_json::from_str(
        r#"{"average_mood": 3.4, "low_mood_days": 2, "recommendation": "Keep it up."}"#,
    )
    .unwrap();
    assert_eq!(rec.level, MoodLevel::Bad);
    assert_eq!(rec.low_mood_days, 2);
}

#[test]
fn test_level_palette() {
    assert_eq!(MoodLevel::Good.background(), "#ECFDF5");
    assert_eq!(MoodLevel::Good.accent(), "#10B981");
    assert_eq!(MoodLevel::Neutral.accent(), "#F59E0B");
    assert_eq!(MoodLevel::Bad.accent(), "#EF4444");
}

#[test]
fn test_period_navigation_wraps_years() {
    let dec = Period::new(12, 2025).unwrap();
    assert_eq!(dec.next(), Period::new(1, 2026).unwrap());
    let jan = Period::new(1, 2025).unwrap();
    assert_eq!(jan.prev(), Period::new(12, 2024).unwrap());
    assert_eq!(Period::new(3, 2025).unwrap().next().month_name(), "April");
}

#[test]
fn test_period_validation_and_display() {
    assert!(Period::new(0, 2025).is_err());
    assert!(Period::new(13, 2025).is_err());
    let p = Period::new(4, 2025).unwrap();
    assert_eq!(p.to_string(), "April 2025");
    assert_eq!(p.short_month_name(), "Apr");
    assert!(p.contains(date(2025, 4, 30)));
    assert!(!p.contains(date(2024, 4, 30)));
}

#[test]
fn test_period_days() {
    assert_eq!(Period::new(2, 2024).unwrap().days(), 29);
    assert_eq!(Period::new(2, 2025).unwrap().days(), 28);
    assert_eq!(Period::new(12, 2025).unwrap().days(), 31);
    assert_eq!(Period::new(4, 2025).unwrap().days(), 30);
}
