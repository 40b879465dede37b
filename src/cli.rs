//! 명령행 인수 정의 (clap derive).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 후육 원통형 압력용기 응력/안전율 계산기.
#[derive(Debug, Parser)]
#[command(name = "pressure_vessel_toolbox_cli", version, about)]
pub struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto", global = true)]
    pub lang: String,

    /// 설정 파일 경로 (기본: config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 최적화 반복 과정을 출력한다
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 응력, 안전율, 최대 압력을 계산한다
    Calc(VesselArgs),
    /// 안전율 1.0을 만족하는 최소 외경을 찾는다
    MinOd(VesselArgs),
    /// 안전율 1.0을 만족하는 최대 내경을 찾는다
    MaxId(VesselArgs),
    /// 내경/외경 조합의 상온 안전율 맵을 계산한다
    Sweep(SweepArgs),
}

/// 설정의 기본 용기값을 덮어쓰는 입력. 생략한 항목은 기본값을 유지한다.
#[derive(Debug, Clone, Default, Args)]
pub struct VesselArgs {
    /// 외압
    #[arg(long, allow_hyphen_values = true)]
    pub p_ext: Option<f64>,
    /// 내압
    #[arg(long, allow_hyphen_values = true)]
    pub p_int: Option<f64>,
    /// 외경
    #[arg(long = "od")]
    pub outer_diameter: Option<f64>,
    /// 내경
    #[arg(long = "id")]
    pub inner_diameter: Option<f64>,
    /// 상온 항복응력
    #[arg(long = "yield")]
    pub yield_stress: Option<f64>,
    /// 고온(감소) 항복응력
    #[arg(long, conflicts_with = "no_derated")]
    pub derated: Option<f64>,
    /// 고온 항복응력 평가를 생략한다
    #[arg(long)]
    pub no_derated: bool,
    /// 입력값의 단위 시스템 (US/SI). 기본값은 설정을 따른다
    #[arg(long)]
    pub units: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub vessel: VesselArgs,
    #[arg(long)]
    pub id_min: Option<f64>,
    #[arg(long)]
    pub id_max: Option<f64>,
    #[arg(long)]
    pub od_min: Option<f64>,
    #[arg(long)]
    pub od_max: Option<f64>,
    /// 격자 간격
    #[arg(long)]
    pub step: Option<f64>,
}
