use mdmint_core::slug::{normalize, normalize_strict, Script, ScriptTable, Slugger, TableRomanizer};

fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[test]
fn test_simple_strings() {
    assert_eq!(normalize("Hello World"), "hello-world");
    assert_eq!(normalize("HeLLo WoRLd"), "hello-world");
    assert_eq!(normalize("  Hello World  "), "hello-world");
}

#[test]
fn test_special_characters() {
    assert_eq!(normalize("Hello@World!"), "hello-world");
    assert_eq!(normalize("Hello (World)"), "hello-world");
    assert_eq!(normalize("Hello [World]"), "hello-world");
    assert_eq!(normalize("Version 2.0.1"), "version-2-0-1");
    assert_eq!(normalize("hello_world"), "hello-world");
    assert_eq!(normalize("path\\to\\file"), "path-to-file");
}

#[test]
fn test_international_titles() {
    assert_eq!(normalize("Something // Way by Päter"), "something-way-by-pater");
    assert_eq!(normalize("Bloody by Rắn Cạp Đuôi"), "bloody-by-ran-cap-djuoi");
    assert_eq!(
        normalize_strict("เจ็บคอ by กระต่าย พรรณนิภา"),
        "ecchbkh-by-krataay-phrrnniphaa"
    );
}

#[test]
fn test_non_empty_for_letter_scripts() {
    for input in ["Привет", "你好", "こんにちは", "안녕하세요", "مرحبا", "שלום", "नमस्ते", "Ελλάδα"] {
        let slug = normalize(input);
        assert!(is_slug(&slug), "{input:?} gave {slug:?}");
    }
}

#[test]
fn test_output_always_url_safe() {
    let inputs = [
        "Hello 😀 World",
        "«Quoted» — dash",
        "a   b\t\tc\n\nd",
        "___leading and trailing___",
        "Mixed Кириллица and Latin",
        "100% & more",
    ];
    for input in inputs {
        let slug = normalize(input);
        assert!(slug.is_empty() || is_slug(&slug), "{input:?} gave {slug:?}");
    }
}

#[test]
fn test_long_input() {
    let input = "a".repeat(1000);
    assert_eq!(normalize(&input), input);
}

#[test]
fn test_symbol_only_input_is_empty() {
    assert_eq!(normalize("!@#$%^*()"), "");
    assert_eq!(normalize("😀🎉"), "");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_currency_and_math_signs_dropped_in_both_modes() {
    let cases = [
        ("Price 10 € or 5 £", "price-10-or-5"),
        ("a ∞ b", "a-b"),
        ("Rate ≈ 5‰ ± 1", "rate-5-1"),
        ("Step ① → Step ②", "step-step"),
        ("20°C", "20c"),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize(input), expected, "{input:?}");
        assert_eq!(normalize_strict(input), expected, "strict {input:?}");
    }
}

#[test]
fn test_latin_ligatures_survive_strict_mode() {
    assert_eq!(normalize_strict("ﬁle ﬂow"), "file-flow");
    assert_eq!(normalize("ﬁle ﬂow"), "file-flow");
}

#[test]
fn test_strict_mode_without_tables_drops_scripts() {
    let slugger = Slugger::with_table(ScriptTable::empty(), true);
    assert!(slugger.is_strict());
    assert_eq!(slugger.normalize("Привет"), "");

    let mut table = ScriptTable::empty();
    table.register(Script::Cyrillic, TableRomanizer);
    let slugger = Slugger::with_table(table, true);
    assert_eq!(slugger.normalize("Привет"), "privet");
}

#[test]
fn test_known_titles() {
    let titles = [
        "Hello World",
        "Texting & Driving",
        "Version 2.0.1",
        "Café Müller",
        "Straße nach Ærø",
        "Привет Мир",
        "你好世界",
        "C:\\Users\\docs",
    ];
    let table = titles
        .iter()
        .map(|t| format!("{:?} -> {:?}", t, normalize(t)))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r###"
"Hello World" -> "hello-world"
"Texting & Driving" -> "texting-and-driving"
"Version 2.0.1" -> "version-2-0-1"
"Café Müller" -> "cafe-muller"
"Straße nach Ærø" -> "strasse-nach-aero"
"Привет Мир" -> "privet-mir"
"你好世界" -> "ni-hao-shi-jie"
"C:\\Users\\docs" -> "c-users-docs"
"###);
}
