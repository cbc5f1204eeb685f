//! Language codes: the ISO 639-1 to FLORES-200 table understood by NLLB and
//! the shape check applied to user-supplied codes.

/// Checks that `code` is a non-empty ASCII alphanumeric language code.
///
/// Codes are joined into repository ids and directory names.
#[must_use]
pub fn is_language_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Language codes accepted by the NLLB family, with their FLORES-200 tokens.
pub const NLLB_LANGUAGES: [(&str, &str); 32] = [
    ("en", "eng_Latn"),
    ("de", "deu_Latn"),
    ("fr", "fra_Latn"),
    ("es", "spa_Latn"),
    ("it", "ita_Latn"),
    ("pt", "por_Latn"),
    ("nl", "nld_Latn"),
    ("pl", "pol_Latn"),
    ("ru", "rus_Cyrl"),
    ("uk", "ukr_Cyrl"),
    ("cs", "ces_Latn"),
    ("sk", "slk_Latn"),
    ("bg", "bul_Cyrl"),
    ("ro", "ron_Latn"),
    ("hu", "hun_Latn"),
    ("el", "ell_Grek"),
    ("tr", "tur_Latn"),
    ("ar", "arb_Arab"),
    ("he", "heb_Hebr"),
    ("fa", "pes_Arab"),
    ("hi", "hin_Deva"),
    ("bn", "ben_Beng"),
    ("zh", "zho_Hans"),
    ("ja", "jpn_Jpan"),
    ("ko", "kor_Hang"),
    ("sv", "swe_Latn"),
    ("da", "dan_Latn"),
    ("no", "nob_Latn"),
    ("fi", "fin_Latn"),
    ("et", "est_Latn"),
    ("lv", "lvs_Latn"),
    ("lt", "lit_Latn"),
];

/// Returns the FLORES-200 code for an ISO 639-1 code.
#[must_use]
pub fn flores_code(iso: &str) -> Option<&'static str> {
    NLLB_LANGUAGES
        .iter()
        .find(|(code, _)| *code == iso)
        .map(|(_, flores)| *flores)
}
