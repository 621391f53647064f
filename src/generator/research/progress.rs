use crate::generator::research::types::Phase;

/// 阶段进度通知，只发不收
pub trait ProgressReporter: Send + Sync {
    fn report(&self, phase: Phase, detail: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(Phase, &str) + Send + Sync,
{
    fn report(&self, phase: Phase, detail: &str) {
        self(phase, detail)
    }
}

/// 不需要进度时使用
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn report(&self, _phase: Phase, _detail: &str) {}
}
