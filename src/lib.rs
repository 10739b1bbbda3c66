//! 面向 Web 应用的翻译词典。
//!
//! 按键拆分的翻译文件按语言合并为一个 `_<locale>.json` 词典
//! （[`core::builder`]），每个请求的语言通过回退链解析
//! （[`core::policy`]），翻译键时支持
//! 占位符替换和复数形式（[`core::translator`]）。

pub mod cli;
pub mod core;
pub mod i18n;
pub mod models;
pub mod utils;
