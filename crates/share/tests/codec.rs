use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use engine::{
    CalculationInput, CalculationResult, Engine, EngineError, FixedClock, SplitPattern, Yen,
};
use share::ShareError;

fn calculate(total: i64, people: u32, pattern: SplitPattern) -> CalculationResult {
    Engine::builder()
        .clock(FixedClock::from_millis(1_700_000_000_000))
        .build()
        .calculate(&CalculationInput::new(Yen::new(total), people, pattern))
        .unwrap()
}

#[test]
fn token_is_base64_of_compact_json() {
    let result = calculate(1000, 3, SplitPattern::Equal);
    let token = share::encode(&result).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&STANDARD.decode(&token).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"t": 1000, "n": 3, "type": "equal", "ts": 1_700_000_000_000_i64})
    );
}

#[test]
fn decoded_token_recomputes_the_same_result() {
    for pattern in [
        SplitPattern::Equal,
        SplitPattern::OrganizerMore { burden_percent: 20 },
        SplitPattern::OrganizerLess {
            reduction_percent: 30,
        },
        SplitPattern::OrganizerFixed {
            amount: Yen::new(2000),
        },
    ] {
        let result = calculate(6000, 4, pattern);
        let input = share::decode(&share::encode(&result).unwrap()).unwrap();
        assert_eq!(input, CalculationInput::new(Yen::new(6000), 4, pattern));
        assert_eq!(calculate(6000, 4, input.pattern), result);
    }
}

#[test]
fn decode_accepts_browser_tokens() {
    // btoa(JSON.stringify({t: 5000, n: 4, type: "organizer_fixed", f: 1000, ts: 1}))
    let token = STANDARD.encode(r#"{"t":5000,"n":4,"type":"organizer_fixed","f":1000,"ts":1}"#);
    assert_eq!(
        share::decode(&token).unwrap().pattern,
        SplitPattern::OrganizerFixed {
            amount: Yen::new(1000)
        }
    );

    let url_safe = URL_SAFE_NO_PAD.encode(r#"{"t":5000,"n":4}"#);
    assert_eq!(
        share::decode(&url_safe).unwrap(),
        CalculationInput::equal(Yen::new(5000), 4)
    );
}

#[test]
fn decode_restores_plus_turned_into_space() {
    let token = STANDARD.encode(r#"{"t":6000,"n":4,"memo":"忘年会"}"#);
    assert!(token.contains('+'));
    assert_eq!(
        share::decode(&token.replace('+', " ")).unwrap(),
        CalculationInput::equal(Yen::new(6000), 4)
    );
}

#[test]
fn decode_accepts_share_links() {
    let token = STANDARD.encode(r#"{"t":6000,"n":4,"memo":"忘年会"}"#);
    let expected = CalculationInput::equal(Yen::new(6000), 4);

    let escaped = token.replace('+', "%2B").replace('/', "%2F").replace('=', "%3D");
    let link = format!("https://example.com/warikan/?lang=ja&calc={escaped}#result");
    assert_eq!(share::decode(&link).unwrap(), expected);

    // An unescaped `+` is read back as a space by form decoding.
    let raw = format!("https://example.com/?calc={token}");
    assert_eq!(share::decode(&raw).unwrap(), expected);

    assert_eq!(share::decode(&format!("?calc={escaped}")).unwrap(), expected);
}

#[test]
fn share_url_round_trips_through_decode() {
    let result = calculate(5000, 4, SplitPattern::OrganizerMore { burden_percent: 20 });
    let link = share::share_url("https://example.com/app?lang=ja&calc=stale", &result).unwrap();
    assert!(link.starts_with("https://example.com/app?lang=ja&calc="));
    assert_eq!(link.matches("calc=").count(), 1);
    assert_eq!(
        share::decode(&link).unwrap(),
        CalculationInput::new(
            Yen::new(5000),
            4,
            SplitPattern::OrganizerMore { burden_percent: 20 }
        )
    );
}

#[test]
fn link_without_token_is_rejected() {
    assert!(matches!(
        share::decode("https://example.com/?lang=ja"),
        Err(ShareError::MissingToken)
    ));
    let result = calculate(1000, 3, SplitPattern::Equal);
    assert!(matches!(
        share::share_url("not a url", &result),
        Err(ShareError::Url(_))
    ));
}

#[test]
fn decode_rejects_garbage() {
    assert!(matches!(
        share::decode("not base64!!"),
        Err(ShareError::Base64(_))
    ));
    assert!(matches!(
        share::decode(&STANDARD.encode("not json")),
        Err(ShareError::Json(_))
    ));
    assert!(matches!(
        share::decode(&STANDARD.encode(r#"{"t":1000,"n":3,"type":"split_by_age"}"#)),
        Err(ShareError::Input(EngineError::UnknownCalculationType(_)))
    ));
    assert!(matches!(
        share::decode(&STANDARD.encode(r#"{"t":1000,"n":0}"#)),
        Err(ShareError::Input(EngineError::InvalidInput(_)))
    ));
}

#[test]
fn detailed_text_lists_payments_and_remainder() {
    let text = share::share_text(&calculate(1000, 3, SplitPattern::Equal), true);
    assert_eq!(
        text,
        "【割り勘計算】\n総額: 1,000円\n人数: 3人\nパターン: 均等割り\n\n一人当たり: 333円\n余り: 1円\n\n計算アプリで詳細を見る"
    );

    let text = share::share_text(
        &calculate(5000, 4, SplitPattern::OrganizerMore { burden_percent: 20 }),
        true,
    );
    assert_eq!(
        text,
        "【割り勘計算】\n総額: 5,000円\n人数: 4人\nパターン: 幹事多め負担\n\n幹事: 1,502円\n参加者一人: 1,166円\n\n計算アプリで詳細を見る"
    );
}

#[test]
fn remainder_is_printed_without_grouping() {
    let text = share::share_text(&calculate(10_000_000, 9_999, SplitPattern::Equal), true);
    assert!(text.contains("\n一人当たり: 1,000円\n余り: 1000円\n"), "{text}");
}

#[test]
fn short_text_omits_payments() {
    let text = share::share_text(
        &calculate(
            6000,
            4,
            SplitPattern::OrganizerFixed {
                amount: Yen::new(2000),
            },
        ),
        false,
    );
    assert!(text.contains("パターン: 幹事固定額"));
    assert!(!text.contains("参加者一人"));
    assert!(text.ends_with("計算アプリで詳細を見る"));
}
