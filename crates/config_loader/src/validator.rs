//! 配置校验模块
//!
//! 校验规则：
//! - gateway.url 非空且为 http(s) 地址
//! - topic 唯一且非空
//! - 每个 topic 至少绑定一个函数，函数名非空
//! - timeout_secs > 0 (如设置)

use std::collections::HashSet;

use contracts::{ContractError, RelayConfig};

/// 校验 RelayConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &RelayConfig) -> Result<(), ContractError> {
    validate_gateway(config)?;
    validate_topics(config)?;
    Ok(())
}

/// 规范化配置：去掉 gateway.url 末尾的 `/`
///
/// Target URLs are built as `{gateway}/{function}`; a configured trailing
/// slash would double the separator.
pub fn normalize(config: &mut RelayConfig) {
    while config.gateway.url.ends_with('/') {
        config.gateway.url.pop();
    }
}

/// 校验 gateway 设置
fn validate_gateway(config: &RelayConfig) -> Result<(), ContractError> {
    let url = config.gateway.url.trim();
    if url.is_empty() {
        return Err(ContractError::config_validation(
            "gateway.url",
            "gateway url must not be empty",
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ContractError::config_validation(
            "gateway.url",
            format!("gateway url must be http(s), got '{url}'"),
        ));
    }
    if let Some(secs) = config.gateway.timeout_secs {
        if secs == 0 {
            return Err(ContractError::config_validation(
                "gateway.timeout_secs",
                "timeout must be > 0 when set",
            ));
        }
    }
    Ok(())
}

/// 校验 topic 绑定表
fn validate_topics(config: &RelayConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for binding in &config.topics {
        if binding.topic.trim().is_empty() {
            return Err(ContractError::config_validation(
                "topics[].topic",
                "topic must not be empty",
            ));
        }
        if !seen.insert(&binding.topic) {
            return Err(ContractError::config_validation(
                format!("topics[topic={}]", binding.topic),
                "duplicate topic",
            ));
        }
        if binding.functions.is_empty() {
            return Err(ContractError::config_validation(
                format!("topics[topic={}].functions", binding.topic),
                "at least one function must be bound",
            ));
        }
        for function in &binding.functions {
            if function.trim().is_empty() {
                return Err(ContractError::config_validation(
                    format!("topics[topic={}].functions", binding.topic),
                    "function name must not be empty",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{GatewayConfig, TopicBinding};

    fn base_config() -> RelayConfig {
        RelayConfig {
            version: Default::default(),
            gateway: GatewayConfig {
                url: "http://gw:8080".to_string(),
                print_response: false,
                timeout_secs: None,
            },
            topics: vec![TopicBinding {
                topic: "t".to_string(),
                functions: vec!["f".to_string()],
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_empty_gateway_url_rejected() {
        let mut config = base_config();
        config.gateway.url = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_http_gateway_rejected() {
        let mut config = base_config();
        config.gateway.url = "ftp://gw:21".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.gateway.timeout_secs = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_function_list_rejected() {
        let mut config = base_config();
        config.topics[0].functions.clear();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("at least one function"));
    }

    #[test]
    fn test_normalize_trims_trailing_slashes() {
        let mut config = base_config();
        config.gateway.url = "http://gw:8080//".to_string();
        normalize(&mut config);
        assert_eq!(config.gateway.url, "http://gw:8080");
    }
}
