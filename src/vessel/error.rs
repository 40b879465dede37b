use thiserror::Error;

use super::model::VesselField;

/// 용기 모델 생성/수정 시 발생 가능한 오류.
///
/// 모든 검증은 생성과 수정 시점에만 이루어지며, 오류가 나면 모델은 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VesselError {
    /// 외경이 내경보다 크지 않은 경우 (OD ≤ ID)
    #[error("외경({outer})은 내경({inner})보다 커야 합니다")]
    InvalidGeometry { outer: f64, inner: f64 },

    /// 직경/항복응력이 0 이하이거나, 압력이 음수 또는 유한하지 않은 경우
    #[error("{field} 입력값이 올바르지 않습니다: {value}")]
    InvalidInput { field: VesselField, value: f64 },

    /// 등가응력이 0이어서 안전율을 정의할 수 없는 경우 (예: 내외압이 같음)
    #[error("등가응력이 0이므로 안전율을 계산할 수 없습니다 (max={max_local}, avg={average})")]
    DegenerateStress { max_local: f64, average: f64 },
}

/// 직경 최적화(이분법) 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// 탐색 중 모델 재계산이 실패한 경우
    #[error(transparent)]
    Vessel(#[from] VesselError),

    /// 허용오차/간격/반복 상한 설정이 유효 범위를 벗어난 경우
    #[error("최적화 설정 {setting} 값이 올바르지 않습니다: {value}")]
    InvalidSettings { setting: &'static str, value: f64 },

    /// 차압이 0에 가까워 Barlow 두께 추정이 불가능한 경우
    #[error("차압이 0에 가까워 탐색 구간을 추정할 수 없습니다: {differential}")]
    DegeneratePressure { differential: f64 },

    /// 구간 확장 후에도 안전율 1.0 이상인 점을 찾지 못한 경우
    #[error("안전율 1.0 이상을 만족하는 {diameter} 구간을 찾지 못했습니다 (마지막 시도 {last_tried})")]
    NoFeasibleBracket { diameter: VesselField, last_tried: f64 },

    /// 구간 양 끝의 부호가 같아 근이 존재한다고 볼 수 없는 경우
    #[error("[{lower}, {upper}] 구간에서 부호 변화가 없습니다")]
    NoSignChange { lower: f64, upper: f64 },

    /// 반복 횟수 상한 내에서 허용오차에 도달하지 못한 경우
    #[error("{iterations}회 반복 후에도 수렴하지 않았습니다 (구간 폭 {width})")]
    NotConverged { iterations: usize, width: f64 },
}
