// slug normalization: transliterate, substitute symbols, collapse to [a-z0-9-]

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Underscores, path separators and whitespace runs all become a single hyphen
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_/\\]+").expect("separator pattern is valid"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen pattern is valid"));

/// Symbols that carry meaning and are spelled out instead of dropped
const SYMBOL_WORDS: &[(char, &str)] = &[('&', "and")];

/// Latin letters whose conventional romanization differs from the generic table
const LATIN_OVERRIDES: &[(char, &str)] = &[
    ('đ', "dj"),
    ('ð', "d"),
    ('ß', "ss"),
    ('æ', "ae"),
    ('œ', "oe"),
    ('ø', "o"),
    ('þ', "th"),
];

/// Unicode script families the normalizer distinguishes.
///
/// Detection is by code-point block, which is precise enough for choosing a
/// romanization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Greek,
    Cyrillic,
    Hebrew,
    Arabic,
    Devanagari,
    Thai,
    Hangul,
    Kana,
    Han,
    /// Emoji, pictographs, dingbats, currency and math signs, joiners and
    /// variation selectors
    Symbol,
    /// Combining marks, which belong to whatever letter precedes them
    Inherited,
    /// Digits and punctuation shared by every script
    Common,
    Other,
}

impl Script {
    pub fn of(ch: char) -> Script {
        let cp = ch as u32;
        match cp {
            0x41..=0x5A | 0x61..=0x7A => Script::Latin,
            0x00..=0x7F => Script::Common,
            0xA2..=0xA5 | 0xA9 | 0xAC | 0xAE | 0xB0 | 0xB1 | 0xD7 | 0xF7 => Script::Symbol,
            0xA0..=0xBF => Script::Common,
            0xC0..=0x24F | 0x250..=0x2AF | 0x1E00..=0x1EFF | 0x2C60..=0x2C7F | 0xA720..=0xA7FF => {
                Script::Latin
            }
            0xFB00..=0xFB06 | 0xFF21..=0xFF3A | 0xFF41..=0xFF5A => Script::Latin,
            0x300..=0x36F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0xFE20..=0xFE2F => {
                Script::Inherited
            }
            0x20E3 => Script::Symbol,
            0x20D0..=0x20FF => Script::Inherited,
            0x370..=0x3FF | 0x1F00..=0x1FFF => Script::Greek,
            0x400..=0x52F | 0x1C80..=0x1C8F | 0x2DE0..=0x2DFF | 0xA640..=0xA69F => {
                Script::Cyrillic
            }
            0x590..=0x5FF | 0xFB1D..=0xFB4F => Script::Hebrew,
            0x600..=0x6FF | 0x750..=0x77F | 0x8A0..=0x8FF | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF => {
                Script::Arabic
            }
            0x900..=0x97F => Script::Devanagari,
            0xE00..=0xE7F => Script::Thai,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x3040..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => Script::Kana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2FA1F => Script::Han,
            0x200D | 0xFE00..=0xFE0F | 0xE0000..=0xE007F => Script::Symbol,
            0x20A0..=0x20CF | 0x2100..=0x214F | 0x2190..=0x23FF | 0x2460..=0x24FF => Script::Symbol,
            0x2500..=0x27BF | 0x2900..=0x2BFF => Script::Symbol,
            0x1F000..=0x1FAFF => Script::Symbol,
            0x2000..=0x206F | 0x3000..=0x303F | 0xFF01..=0xFF20 => Script::Common,
            _ => Script::Other,
        }
    }
}

/// Romanization strategy for the characters of one script.
///
/// Returning `None` drops the character. The returned text may contain any
/// ASCII; everything outside letters, digits, whitespace and `-` is discarded.
pub trait Romanizer: Send + Sync {
    fn romanize(&self, ch: char) -> Option<Cow<'static, str>>;
}

/// Table-driven transliteration covering every script deunicode knows
pub struct TableRomanizer;

impl Romanizer for TableRomanizer {
    fn romanize(&self, ch: char) -> Option<Cow<'static, str>> {
        deunicode::deunicode_char(ch).map(Cow::Borrowed)
    }
}

/// Latin with diacritics stripped, plus letters that need a conventional spelling
pub struct LatinRomanizer {
    overrides: HashMap<char, &'static str>,
}

impl LatinRomanizer {
    pub fn new() -> Self {
        Self {
            overrides: LATIN_OVERRIDES.iter().copied().collect(),
        }
    }
}

impl Default for LatinRomanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Romanizer for LatinRomanizer {
    fn romanize(&self, ch: char) -> Option<Cow<'static, str>> {
        match self.overrides.get(&ch) {
            Some(text) => Some(Cow::Borrowed(*text)),
            None => TableRomanizer.romanize(ch),
        }
    }
}

/// Removes the character entirely
pub struct Dropped;

impl Romanizer for Dropped {
    fn romanize(&self, _ch: char) -> Option<Cow<'static, str>> {
        None
    }
}

/// Maps each script to its romanization strategy.
///
/// Scripts without an entry use the fallback table in the default mode and
/// are dropped in strict mode.
pub struct ScriptTable {
    entries: HashMap<Script, Box<dyn Romanizer>>,
    fallback: Box<dyn Romanizer>,
}

impl ScriptTable {
    /// A table with no per-script entries
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Box::new(TableRomanizer),
        }
    }

    pub fn register(&mut self, script: Script, romanizer: impl Romanizer + 'static) -> &mut Self {
        self.entries.insert(script, Box::new(romanizer));
        self
    }

    pub fn get(&self, script: Script) -> Option<&dyn Romanizer> {
        self.entries.get(&script).map(|r| r.as_ref())
    }

    fn fallback(&self) -> &dyn Romanizer {
        self.fallback.as_ref()
    }
}

impl Default for ScriptTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table
            .register(Script::Latin, LatinRomanizer::new())
            .register(Script::Symbol, Dropped)
            .register(Script::Inherited, Dropped);
        for script in [
            Script::Greek,
            Script::Cyrillic,
            Script::Hebrew,
            Script::Arabic,
            Script::Devanagari,
            Script::Thai,
            Script::Hangul,
            Script::Kana,
            Script::Han,
        ] {
            table.register(script, TableRomanizer);
        }
        table
    }
}

/// Derives URL-safe identifiers from arbitrary text.
pub struct Slugger {
    table: ScriptTable,
    strict: bool,
}

impl Slugger {
    pub fn new() -> Self {
        Self {
            table: ScriptTable::default(),
            strict: false,
        }
    }

    /// Strict mode keeps scripts apart: only a script's own table is used and
    /// a word boundary separates letters of different scripts.
    pub fn strict() -> Self {
        Self {
            table: ScriptTable::default(),
            strict: true,
        }
    }

    pub fn with_table(table: ScriptTable, strict: bool) -> Self {
        Self { table, strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Normalize `input` into a slug matching `^[a-z0-9]+(-[a-z0-9]+)*$`, or
    /// the empty string when nothing survives.
    pub fn normalize(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        let ascii = self.transliterate(&lowered);
        let spelled = substitute_symbols(&ascii);
        let separated = SEPARATOR_RUN.replace_all(&spelled, "-");

        // Leftover punctuation ("hello@world", "2.0.1") marks a word boundary
        let sanitized: String = separated
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        HYPHEN_RUN
            .replace_all(&sanitized, "-")
            .trim_matches('-')
            .to_string()
    }

    fn transliterate(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut last_script: Option<Script> = None;

        for ch in input.chars() {
            if ch.is_whitespace() {
                out.push(' ');
                continue;
            }

            let script = Script::of(ch);
            match script {
                Script::Common if ch.is_ascii() => {
                    out.push(ch);
                    continue;
                }
                Script::Common => {
                    out.push(' ');
                    continue;
                }
                Script::Inherited | Script::Symbol => {}
                _ => self.enter_script(script, &mut last_script, &mut out),
            }

            if ch.is_ascii() {
                out.push(ch);
            } else if let Some(text) = self.romanize(script, ch) {
                push_sanitized(&mut out, &text);
            }
        }

        out
    }

    fn enter_script(&self, script: Script, last: &mut Option<Script>, out: &mut String) {
        if self.strict && last.is_some_and(|prev| prev != script) {
            out.push(' ');
        }
        *last = Some(script);
    }

    fn romanize(&self, script: Script, ch: char) -> Option<Cow<'static, str>> {
        match self.table.get(script) {
            Some(romanizer) => romanizer.romanize(ch),
            None if self.strict => None,
            None => self.table.fallback().romanize(ch),
        }
    }
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize with the default (mixed-script) tables
pub fn normalize(input: &str) -> String {
    Slugger::new().normalize(input)
}

/// Normalize without mixing scripts inside one word
pub fn normalize_strict(input: &str) -> String {
    Slugger::strict().normalize(input)
}

fn push_sanitized(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_whitespace() || c == '-' {
            out.push(' ');
        }
    }
}

fn substitute_symbols(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match SYMBOL_WORDS.iter().find(|(symbol, _)| *symbol == ch) {
            Some((_, word)) => {
                out.push('-');
                out.push_str(word);
                out.push('-');
            }
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(normalize("Hello World"), "hello-world");
        assert_eq!(normalize("Hello"), "hello");
        assert_eq!(normalize("Test 123"), "test-123");
        assert_eq!(normalize("HeLLo WoRLd"), "hello-world");
    }

    #[test]
    fn test_ampersand_is_spelled_out() {
        assert_eq!(normalize("Texting & Driving"), "texting-and-driving");
        assert_eq!(normalize("R&D"), "r-and-d");
    }

    #[test]
    fn test_separators() {
        assert_eq!(normalize("path/to/file"), "path-to-file");
        assert_eq!(normalize("path\\to\\file"), "path-to-file");
        assert_eq!(normalize("hello_world"), "hello-world");
        assert_eq!(normalize("Hello    World"), "hello-world");
        assert_eq!(normalize("Hello\t\tWorld"), "hello-world");
        assert_eq!(normalize("  Hello World  "), "hello-world");
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(normalize("Hello@World!"), "hello-world");
        assert_eq!(normalize("Version 2.0.1"), "version-2-0-1");
        assert_eq!(normalize("Hello (World)"), "hello-world");
        assert_eq!(normalize("Hello [World]"), "hello-world");
        assert_eq!(normalize("https://example.com/path"), "https-example-com-path");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!@#$%^*()"), "");
        assert_eq!(normalize("!@#$%^&*()"), "and");
    }

    #[test]
    fn test_emoji_removed() {
        assert_eq!(normalize("Hello 😀 World"), "hello-world");
        assert_eq!(normalize("👍🏽"), "");
        assert_eq!(normalize("I ❤️ Rust"), "i-rust");
    }

    #[test]
    fn test_currency_and_math_removed() {
        assert_eq!(normalize("Price 10 € or 5 £"), "price-10-or-5");
        assert_eq!(normalize_strict("Price 10 € or 5 £"), "price-10-or-5");
        assert_eq!(normalize("a ∞ b"), "a-b");
        assert_eq!(normalize_strict("a ∞ b"), "a-b");
        assert_eq!(normalize("x ≤ y ± z"), "x-y-z");
        assert_eq!(normalize("Brand™ ①"), "brand");
    }

    #[test]
    fn test_latin_ligatures() {
        assert_eq!(normalize("ﬁle"), "file");
        assert_eq!(normalize_strict("ﬁle"), "file");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("Müller"), "muller");
        assert_eq!(normalize("Something // Way by Päter"), "something-way-by-pater");
        // decomposed form: e + combining acute
        assert_eq!(normalize("Cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_latin_overrides() {
        assert_eq!(normalize("Bloody by Rắn Cạp Đuôi"), "bloody-by-ran-cap-djuoi");
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("Ærø"), "aero");
    }

    #[test]
    fn test_non_latin_scripts() {
        assert_eq!(normalize("Привет Мир"), "privet-mir");
        assert_eq!(normalize("你好世界"), "ni-hao-shi-jie");
        assert!(!normalize("こんにちは").is_empty());
        assert!(!normalize("مرحبا").is_empty());
        assert!(!normalize("Αθήνα").is_empty());
    }

    #[test]
    fn test_strict_thai() {
        assert_eq!(
            normalize_strict("เจ็บคอ by กระต่าย พรรณนิภา"),
            "ecchbkh-by-krataay-phrrnniphaa"
        );
    }

    #[test]
    fn test_strict_separates_scripts() {
        assert_eq!(normalize_strict("abcПривет"), "abc-privet");
        assert_eq!(normalize("abcПривет"), "abcprivet");
    }

    #[test]
    fn test_strict_drops_unregistered_scripts() {
        let mut table = ScriptTable::empty();
        table.register(Script::Latin, LatinRomanizer::new());
        let strict = Slugger::with_table(table, true);
        assert_eq!(strict.normalize("Привет World"), "world");

        let mut table = ScriptTable::empty();
        table.register(Script::Latin, LatinRomanizer::new());
        let lenient = Slugger::with_table(table, false);
        assert_eq!(lenient.normalize("Привет World"), "privet-world");
    }

    #[test]
    fn test_custom_romanizer() {
        struct Greeting;
        impl Romanizer for Greeting {
            fn romanize(&self, _ch: char) -> Option<Cow<'static, str>> {
                Some(Cow::Borrowed("x"))
            }
        }

        let mut table = ScriptTable::default();
        table.register(Script::Cyrillic, Greeting);
        let slugger = Slugger::with_table(table, false);
        assert_eq!(slugger.normalize("Мир"), "xxx");
    }

    #[test]
    fn test_script_detection() {
        assert_eq!(Script::of('a'), Script::Latin);
        assert_eq!(Script::of('ễ'), Script::Latin);
        assert_eq!(Script::of('1'), Script::Common);
        assert_eq!(Script::of('ж'), Script::Cyrillic);
        assert_eq!(Script::of('ก'), Script::Thai);
        assert_eq!(Script::of('中'), Script::Han);
        assert_eq!(Script::of('か'), Script::Kana);
        assert_eq!(Script::of('한'), Script::Hangul);
        assert_eq!(Script::of('😀'), Script::Symbol);
        assert_eq!(Script::of('€'), Script::Symbol);
        assert_eq!(Script::of('∑'), Script::Symbol);
        assert_eq!(Script::of('ﬂ'), Script::Latin);
        assert_eq!(Script::of('\u{301}'), Script::Inherited);
    }

    #[test]
    fn test_deterministic() {
        let input = "Привет Мир & 東京 😀";
        assert_eq!(normalize(input), normalize(input));
    }

    #[test]
    fn test_output_is_url_safe() {
        let slug = normalize("Test URL Safe String — «quoted» ½");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }
}
