//! Credential validation

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::warn;

use super::ExchangeBase;
use crate::client::{
    Credentials, CredentialsValidator, DEFAULT_API_CLIENT_ID, DEFAULT_API_KEY, DEFAULT_API_SECRET,
    DUMMY_PEM_MARKER,
};

impl CredentialsValidator {
    /// 요구되는 인증 정보가 모두 채워져 있는지 확인
    pub fn validate(&self, credentials: &Credentials) -> bool {
        if self.requires_pem
            && (credentials.pem_key.is_empty() || credentials.pem_key.contains(DUMMY_PEM_MARKER))
        {
            return false;
        }

        if self.requires_key
            && (credentials.key.is_empty() || credentials.key == DEFAULT_API_KEY)
        {
            return false;
        }

        if self.requires_secret
            && (credentials.secret.is_empty() || credentials.secret == DEFAULT_API_SECRET)
        {
            return false;
        }

        if self.requires_client_id
            && (credentials.client_id.is_empty() || credentials.client_id == DEFAULT_API_CLIENT_ID)
        {
            return false;
        }

        if self.requires_base64_decode_secret && STANDARD.decode(&credentials.secret).is_err() {
            return false;
        }

        true
    }
}

impl ExchangeBase {
    /// 현재 인증 정보가 요구 조건을 만족하는지
    pub fn validate_api_credentials(&self) -> bool {
        self.api.credentials_validator.validate(&self.api.credentials)
    }

    /// API 키 설정
    ///
    /// 시크릿은 입력 그대로 보관한다. base64 디코딩이 필요한데 실패하면
    /// 인증 기능만 끄고 계속 진행한다.
    pub fn set_api_keys(
        &mut self,
        key: impl Into<String>,
        secret: impl Into<String>,
        client_id: impl Into<String>,
    ) {
        self.api.credentials.key = key.into();
        self.api.credentials.secret = secret.into();
        self.api.credentials.client_id = client_id.into();

        if self.api.credentials_validator.requires_base64_decode_secret
            && STANDARD.decode(&self.api.credentials.secret).is_err()
        {
            self.api.authenticated_support = false;
            warn!(
                exchange = %self.name,
                "API secret is not valid base64, authenticated support disabled"
            );
        }
    }

    /// 인증 요청 허용 여부
    ///
    /// 설정에서 로드된 경우 authenticated_support를 따르고,
    /// 그렇지 않으면 인증 정보 검증 결과를 따른다
    pub fn allow_authenticated_request(&self) -> bool {
        if self.loaded_by_config {
            self.api.authenticated_support
        } else {
            self.validate_api_credentials()
        }
    }
}
