/// 용기 입력값이 속하는 물리량 종류를 나타낸다.
///
/// 응력(항복응력)은 압력과 같은 차원이므로 `Pressure`로 묶는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Pressure,
}
