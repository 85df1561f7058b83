use crate::{
    alphabet::{self, Alphabet},
    base64::{Decoder, Encoder},
};
use std::{fmt, str::FromStr};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Variant {
    #[default]
    Standard,
    UrlSafe,
    Ordered,
}

impl Variant {
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            Self::Standard => &alphabet::STANDARD,
            Self::UrlSafe => &alphabet::URL_SAFE,
            Self::Ordered => &alphabet::ORDERED,
        }
    }

    pub fn encoder(self, line_wrap: bool) -> Encoder<'static> {
        Encoder::new(self.alphabet()).with_line_wrap(line_wrap)
    }

    pub fn decoder(self, lenient: bool) -> Decoder<'static> {
        Decoder::new(self.alphabet()).with_lenient(lenient)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::UrlSafe => write!(f, "url-safe"),
            Self::Ordered => write!(f, "ordered"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "url-safe" | "url_safe" | "url" => Ok(Self::UrlSafe),
            "ordered" => Ok(Self::Ordered),
            _ => Err(format!("Unknown alphabet variant {}", value)),
        }
    }
}

/// Per-call codec configuration.
///
/// `compress` only affects encoding. Decoding decides on decompression by
/// looking for the gzip magic number, unless `gunzip` is turned off.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Options {
    variant: Variant,
    line_wrap: bool,
    compress: bool,
    gunzip: bool,
    lenient: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    pub const fn new() -> Self {
        Self {
            variant: Variant::Standard,
            line_wrap: false,
            compress: false,
            gunzip: true,
            lenient: false,
        }
    }

    pub const fn with_variant(self, variant: Variant) -> Self {
        Self { variant, ..self }
    }

    pub const fn with_line_wrap(self, line_wrap: bool) -> Self {
        Self { line_wrap, ..self }
    }

    pub const fn with_compress(self, compress: bool) -> Self {
        Self { compress, ..self }
    }

    pub const fn with_gunzip(self, gunzip: bool) -> Self {
        Self { gunzip, ..self }
    }

    pub const fn with_lenient(self, lenient: bool) -> Self {
        Self { lenient, ..self }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn line_wrap(&self) -> bool {
        self.line_wrap
    }

    pub fn compress(&self) -> bool {
        self.compress
    }

    pub fn gunzip(&self) -> bool {
        self.gunzip
    }

    pub fn lenient(&self) -> bool {
        self.lenient
    }
}
