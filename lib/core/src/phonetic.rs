//! Phonetic code equality
//!
//! Three independent English-oriented schemes are used so that tokens which
//! sound alike collide even when their spellings drift.

use rphonetic::{Encoder, Metaphone, Nysiis, Soundex};

/// Supported phonetic encoding schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneticScheme {
    Soundex,
    Metaphone,
    Nysiis,
}

impl PhoneticScheme {
    pub const ALL: [PhoneticScheme; 3] = [
        PhoneticScheme::Soundex,
        PhoneticScheme::Metaphone,
        PhoneticScheme::Nysiis,
    ];
}

/// Holds one encoder per scheme
pub struct PhoneticEncoders {
    soundex: Soundex,
    metaphone: Metaphone,
    nysiis: Nysiis,
}

impl Default for PhoneticEncoders {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticEncoders {
    pub fn new() -> Self {
        Self {
            soundex: Soundex::default(),
            metaphone: Metaphone::default(),
            nysiis: Nysiis::default(),
        }
    }

    /// Phonetic code of `token` under `scheme`
    ///
    /// Only ASCII letters are encoded. Returns `None` when nothing encodable
    /// is left, so callers never compare two empty codes.
    pub fn encode(&self, scheme: PhoneticScheme, token: &str) -> Option<String> {
        let letters: String = token.chars().filter(char::is_ascii_alphabetic).collect();
        if letters.is_empty() {
            return None;
        }
        let code = match scheme {
            PhoneticScheme::Soundex => self.soundex.encode(&letters),
            PhoneticScheme::Metaphone => self.metaphone.encode(&letters),
            PhoneticScheme::Nysiis => self.nysiis.encode(&letters),
        };
        Some(code)
    }

    /// 1 when both tokens are non-empty and share a code under `scheme`
    pub fn codes_match(&self, scheme: PhoneticScheme, a: &str, b: &str) -> u8 {
        if a.is_empty() || b.is_empty() {
            return 0;
        }
        match (self.encode(scheme, a), self.encode(scheme, b)) {
            (Some(ca), Some(cb)) if ca == cb => 1,
            _ => 0,
        }
    }
}
