//! 令牌 Claims 解码
//!
//! 只在客户端做展示用途的解码，不校验签名。结果仅用于导航和界面，
//! 权限判断始终以服务端为准。

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use crate::Role;
use crate::error::ClaimsError;

/// 同时兼容 URL-safe 与标准字母表（后者先做字符替换），填充可有可无
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 令牌载荷中的用户属性，`exp` 等其余字段忽略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    pub uuid: String,
}

impl Claims {
    /// 头像上显示的首字母
    pub fn initial(&self) -> Option<String> {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
    }
}

/// 解码紧凑令牌 `header.payload.signature` 的载荷段
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(ClaimsError::SegmentCount(segments.len()));
    };

    let normalized = payload.replace('+', "-").replace('/', "_");
    let bytes = PAYLOAD_ENGINE.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// 解码失败时记录日志并返回 `None`
pub fn claims_or_none(token: &str) -> Option<Claims> {
    match decode_claims(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::warn!("Failed to decode token: {}", e);
            None
        }
    }
}
