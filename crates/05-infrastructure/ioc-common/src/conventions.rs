//! 约定规范定义
//!
//! 提供组件命名的约定规范

use crate::descriptor::TypeDescriptor;
use crate::metadata::TypeInfo;

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 解析组件的注册名称：显式名称优先，否则按类型名推导
    pub fn resolve_bean_name(descriptor: &TypeDescriptor) -> String {
        descriptor
            .component()
            .and_then(|marker| marker.name())
            .map_or_else(
                || Self::default_bean_name(descriptor.type_info()),
                str::to_string,
            )
    }

    /// 从类型信息推导默认的组件名称
    ///
    /// 首字母小写；若前两个字符都是大写则保持原样（`URLParser` 仍为 `URLParser`）
    pub fn default_bean_name(type_info: &TypeInfo) -> String {
        Self::decapitalize(type_info.short_name())
    }

    fn decapitalize(name: &str) -> String {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };

        if first.is_uppercase() && chars.clone().next().is_some_and(char::is_uppercase) {
            return name.to_string();
        }

        first.to_lowercase().chain(chars).collect()
    }
}
