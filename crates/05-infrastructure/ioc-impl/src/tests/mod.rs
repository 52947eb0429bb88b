//! 应用上下文单元测试
