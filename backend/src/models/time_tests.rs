use super::*;
use chrono::NaiveDate;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn session(day: Weekday, start: &str, end: &str) -> ClassSession {
    ClassSession {
        day,
        subject: "Math".to_string(),
        start_time: t(start),
        end_time: t(end),
        instructor: None,
        room: None,
    }
}

#[test]
fn test_time_parse_padded() {
    let time = t("09:05");
    assert_eq!(time.hour(), 9);
    assert_eq!(time.minute(), 5);
    assert_eq!(time.to_string(), "09:05");
}

#[test]
fn test_time_parse_pads_single_digit_hour() {
    assert_eq!(t("9:00").to_string(), "09:00");
    assert_eq!(t("9:00"), t("09:00"));
}

#[test]
fn test_time_parse_rejects_garbage() {
    for bad in ["", "9", "09:5", "24:00", "12:60", "ab:cd", "123:00", "-1:00", "09:00:00"] {
        assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn test_time_ordering_matches_padded_strings() {
    let times = ["00:00", "07:30", "09:00", "10:00", "10:01", "21:59", "23:59"];
    for a in times {
        for b in times {
            assert_eq!(t(a).cmp(&t(b)), a.cmp(b), "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_time_serde_roundtrip_as_string() {
    let json = serde_json::to_string(&t("7:45")).unwrap();
    assert_eq!(json, "\"07:45\"");
    let back: TimeOfDay = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t("07:45"));
    assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
}

#[test]
fn test_on_the_hour() {
    assert_eq!(TimeOfDay::on_the_hour(7).unwrap().to_string(), "07:00");
    assert!(TimeOfDay::on_the_hour(24).is_none());
}

#[test]
fn test_weekday_parse_english_and_spanish() {
    assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
    assert_eq!("wed".parse::<Weekday>().unwrap(), Weekday::Wednesday);
    assert_eq!("Miércoles".parse::<Weekday>().unwrap(), Weekday::Wednesday);
    assert_eq!("Sabado".parse::<Weekday>().unwrap(), Weekday::Saturday);
    assert!("Funday".parse::<Weekday>().is_err());
}

#[test]
fn test_weekday_deserialize_spanish_names() {
    let day: Weekday = serde_json::from_str("\"Lunes\"").unwrap();
    assert_eq!(day, Weekday::Monday);
    let day: Weekday = serde_json::from_str("\"Sábado\"").unwrap();
    assert_eq!(day, Weekday::Saturday);
    assert_eq!(serde_json::to_string(&Weekday::Friday).unwrap(), "\"Friday\"");
}

#[test]
fn test_weekday_deserialize_matches_from_str() {
    for token in ["MONDAY", "Mon", "tue", "miercoles", "JUEVES", " friday ", "SAT", "domingo"] {
        let parsed: Weekday = token.parse().unwrap();
        let json = serde_json::to_string(token).unwrap();
        let deserialized: Weekday = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, parsed, "token {:?}", token);
    }
    assert!(serde_json::from_str::<Weekday>("\"Funday\"").is_err());
}

#[test]
fn test_weekday_of_local_calendar_day() {
    // 2024-01-01 was a Monday
    assert_eq!(weekday_of(&at(2024, 1, 1, 0, 0, 0)), Weekday::Monday);
    assert_eq!(weekday_of(&at(2024, 1, 1, 23, 59, 59)), Weekday::Monday);
    assert_eq!(weekday_of(&at(2024, 1, 7, 12, 0, 0)), Weekday::Sunday);
}

#[test]
fn test_format_time_truncates_seconds() {
    assert_eq!(format_time(&at(2024, 1, 1, 9, 59, 59)).to_string(), "09:59");
    assert_eq!(format_time(&at(2024, 1, 1, 0, 0, 0)), TimeOfDay::MIDNIGHT);
}

#[test]
fn test_is_active_half_open_boundaries() {
    let s = session(Weekday::Monday, "09:00", "10:00");
    assert!(is_active(&s, Weekday::Monday, t("09:00")));
    assert!(is_active(&s, Weekday::Monday, t("09:59")));
    assert!(!is_active(&s, Weekday::Monday, t("10:00")));
    assert!(!is_active(&s, Weekday::Monday, t("08:59")));
}

#[test]
fn test_is_active_other_day() {
    let s = session(Weekday::Monday, "09:00", "10:00");
    assert!(!is_active(&s, Weekday::Tuesday, t("09:30")));
}

#[test]
fn test_is_active_inverted_interval_is_inert() {
    let s = session(Weekday::Monday, "10:00", "09:00");
    for hour in 0..24 {
        let time = TimeOfDay::on_the_hour(hour).unwrap();
        assert!(!is_active(&s, Weekday::Monday, time));
    }
    let empty = session(Weekday::Monday, "10:00", "10:00");
    assert!(!is_active(&empty, Weekday::Monday, t("10:00")));
}
