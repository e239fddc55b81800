//! Currency pair and pair format types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BaseError, BaseResult};

/// 페어 포맷 규칙 (요청용 또는 표시용)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairFormat {
    /// base/quote 구분자 ("-", "_", "")
    pub delimiter: String,
    /// 대문자 여부
    pub uppercase: bool,
    /// 여러 페어를 이어붙일 때의 구분자
    pub separator: String,
    /// 구분자가 없을 때 quote 위치를 찾기 위한 통화 코드 (예: "KRW")
    pub index: String,
}

impl PairFormat {
    pub fn new(delimiter: impl Into<String>, uppercase: bool) -> Self {
        Self {
            delimiter: delimiter.into(),
            uppercase,
            ..Default::default()
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }
}

/// 통화 페어
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// 구분자로 분리
    pub fn from_delimited(s: &str, delimiter: &str) -> BaseResult<Self> {
        match s.split_once(delimiter) {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base, quote))
            }
            _ => Err(BaseError::BadSymbol { symbol: s.into() }),
        }
    }

    /// index 통화 위치로 분리, index가 맨 앞이면 index가 base
    pub fn from_index(s: &str, index: &str) -> BaseResult<Self> {
        match s.find(index) {
            Some(0) if s.len() > index.len() => Ok(Self::new(&s[..index.len()], &s[index.len()..])),
            Some(i) if i > 0 => Ok(Self::new(&s[..i], &s[i..])),
            _ => Err(BaseError::BadSymbol { symbol: s.into() }),
        }
    }

    /// 표시용 포맷 규칙으로 문자열 파싱
    ///
    /// delimiter가 있으면 delimiter 분리, 없으면 index 분리,
    /// 둘 다 없으면 앞 3글자를 base로 사용
    pub fn parse(s: &str, format: &PairFormat) -> BaseResult<Self> {
        if !format.delimiter.is_empty() {
            Self::from_delimited(s, &format.delimiter)
        } else if !format.index.is_empty() {
            Self::from_index(s, &format.index)
        } else if s.len() > 3 && s.is_char_boundary(3) {
            Ok(Self::new(&s[..3], &s[3..]))
        } else {
            Err(BaseError::BadSymbol { symbol: s.into() })
        }
    }

    /// delimiter와 대소문자 규칙으로 렌더링
    pub fn display(&self, delimiter: &str, uppercase: bool) -> String {
        let joined = format!("{}{}{}", self.base, delimiter, self.quote);
        if uppercase {
            joined.to_uppercase()
        } else {
            joined.to_lowercase()
        }
    }

    /// 포맷 규칙으로 렌더링
    pub fn format(&self, format: &PairFormat) -> String {
        self.display(&format.delimiter, format.uppercase)
    }

    /// 대소문자 무시 비교, 역순 페어도 동일하게 취급
    pub fn equal_include_reciprocal(&self, other: &CurrencyPair) -> bool {
        (self.base.eq_ignore_ascii_case(&other.base) && self.quote.eq_ignore_ascii_case(&other.quote))
            || (self.base.eq_ignore_ascii_case(&other.quote)
                && self.quote.eq_ignore_ascii_case(&other.base))
    }
}

impl PartialEq for CurrencyPair {
    fn eq(&self, other: &Self) -> bool {
        self.base.eq_ignore_ascii_case(&other.base) && self.quote.eq_ignore_ascii_case(&other.quote)
    }
}

impl Eq for CurrencyPair {}

impl std::hash::Hash for CurrencyPair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.base.to_uppercase().hash(state);
        self.quote.to_uppercase().hash(state);
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base.to_uppercase(), self.quote.to_uppercase())
    }
}

/// 기존 목록과 새 목록의 차이 (추가된 항목, 제거된 항목), 입력 순서 유지
pub fn find_pair_differences(stored: &[String], fresh: &[String]) -> (Vec<String>, Vec<String>) {
    let added = fresh
        .iter()
        .filter(|p| !stored.contains(p))
        .cloned()
        .collect();
    let removed = stored
        .iter()
        .filter(|p| !fresh.contains(p))
        .cloned()
        .collect();
    (added, removed)
}
