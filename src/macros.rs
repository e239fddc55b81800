//! Exchange Implementation Macros

/// Returns `Err(BaseError::NotSupported)` for the named operation.
///
/// # Example
///
/// ```ignore
/// async fn get_funding_history(&self) -> BaseResult<Vec<FundHistory>> {
///     not_supported!("getFundingHistory")
/// }
/// ```
#[macro_export]
macro_rules! not_supported {
    ($feature:expr) => {
        Err($crate::errors::BaseError::NotSupported {
            feature: $feature.into(),
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::errors::BaseResult;

    fn unsupported() -> BaseResult<()> {
        not_supported!("withdrawFiatFunds")
    }

    #[test]
    fn test_not_supported_macro() {
        let err = unsupported().unwrap_err();
        assert!(err.is_not_supported());
        assert_eq!(err.to_string(), "Not supported: withdrawFiatFunds");
    }
}
