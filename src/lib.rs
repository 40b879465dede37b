//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 프론트엔드에서도 재사용할 수 있게 한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod quantity;
pub mod ui_cli;
pub mod units;
pub mod vessel;
