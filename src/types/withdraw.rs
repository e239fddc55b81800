//! Withdrawal permission bitmask

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// 거래소가 허용하는 출금 방식 비트마스크
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WithdrawPermissions(pub u32);

impl WithdrawPermissions {
    pub const NONE: Self = Self(0);
    pub const AUTO_WITHDRAW_CRYPTO: Self = Self(1 << 0);
    pub const AUTO_WITHDRAW_CRYPTO_WITH_API_PERMISSION: Self = Self(1 << 1);
    pub const AUTO_WITHDRAW_CRYPTO_WITH_SETUP: Self = Self(1 << 2);
    pub const WITHDRAW_CRYPTO_WITH_2FA: Self = Self(1 << 3);
    pub const WITHDRAW_CRYPTO_WITH_SMS: Self = Self(1 << 4);
    pub const WITHDRAW_CRYPTO_WITH_EMAIL: Self = Self(1 << 5);
    pub const WITHDRAW_CRYPTO_WITH_WEBSITE_APPROVAL: Self = Self(1 << 6);
    pub const WITHDRAW_CRYPTO_WITH_API_PERMISSION: Self = Self(1 << 7);
    pub const AUTO_WITHDRAW_FIAT: Self = Self(1 << 8);
    pub const AUTO_WITHDRAW_FIAT_WITH_API_PERMISSION: Self = Self(1 << 9);
    pub const AUTO_WITHDRAW_FIAT_WITH_SETUP: Self = Self(1 << 10);
    pub const WITHDRAW_FIAT_WITH_2FA: Self = Self(1 << 11);
    pub const WITHDRAW_FIAT_WITH_SMS: Self = Self(1 << 12);
    pub const WITHDRAW_FIAT_WITH_EMAIL: Self = Self(1 << 13);
    pub const WITHDRAW_FIAT_WITH_WEBSITE_APPROVAL: Self = Self(1 << 14);
    pub const WITHDRAW_FIAT_WITH_API_PERMISSION: Self = Self(1 << 15);
    pub const WITHDRAW_CRYPTO_VIA_WEBSITE_ONLY: Self = Self(1 << 16);
    pub const WITHDRAW_FIAT_VIA_WEBSITE_ONLY: Self = Self(1 << 17);
    /// 표시 텍스트가 없어 UNKNOWN[1<<18]로 렌더링된다
    pub const NO_FIAT_WITHDRAWALS: Self = Self(1 << 18);

    const NO_METHODS_TEXT: &'static str = "NONE, WEBSITE ONLY";

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 요청한 권한을 모두 포함하는지
    pub fn contains(&self, other: WithdrawPermissions) -> bool {
        self.0 & other.0 == other.0
    }

    fn bit_text(bit: u32) -> Option<&'static str> {
        let text = match bit {
            0 => "AUTO WITHDRAW CRYPTO",
            1 => "AUTO WITHDRAW CRYPTO WITH API PERMISSION",
            2 => "AUTO WITHDRAW CRYPTO WITH SETUP",
            3 => "WITHDRAW CRYPTO WITH 2FA",
            4 => "WITHDRAW CRYPTO WITH SMS",
            5 => "WITHDRAW CRYPTO WITH EMAIL",
            6 => "WITHDRAW CRYPTO WITH WEBSITE APPROVAL",
            7 => "WITHDRAW CRYPTO WITH API PERMISSION",
            8 => "AUTO WITHDRAW FIAT",
            9 => "AUTO WITHDRAW FIAT WITH API PERMISSION",
            10 => "AUTO WITHDRAW FIAT WITH SETUP",
            11 => "WITHDRAW FIAT WITH 2FA",
            12 => "WITHDRAW FIAT WITH SMS",
            13 => "WITHDRAW FIAT WITH EMAIL",
            14 => "WITHDRAW FIAT WITH WEBSITE APPROVAL",
            15 => "WITHDRAW FIAT WITH API PERMISSION",
            16 => "WITHDRAW CRYPTO VIA WEBSITE ONLY",
            17 => "WITHDRAW FIAT VIA WEBSITE ONLY",
            _ => return None,
        };
        Some(text)
    }
}

impl BitOr for WithdrawPermissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WithdrawPermissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for WithdrawPermissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// 낮은 비트부터 " & "로 연결, 알 수 없는 비트는 UNKNOWN[1<<n]
impl fmt::Display for WithdrawPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(Self::NO_METHODS_TEXT);
        }

        let services: Vec<String> = (0..32u32)
            .filter(|i| self.0 & (1 << i) != 0)
            .map(|i| match Self::bit_text(i) {
                Some(text) => text.to_string(),
                None => format!("UNKNOWN[1<<{i}]"),
            })
            .collect();

        f.write_str(&services.join(" & "))
    }
}
