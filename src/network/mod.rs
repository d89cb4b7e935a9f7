//! # 网络模块
//!
//! 资源抓取与页面批量下载：
//!
//! - `fetcher` - `ResourceFetcher` 接口、HTTP/本地目录实现、超时与取消
//! - `pages` - 固定页面列表的并行抓取

pub mod fetcher;
pub mod pages;

pub use fetcher::{decode_body, fetch_with_deadline, FileFetcher, HttpFetcher, ResourceFetcher};
pub use pages::PageFetcher;
