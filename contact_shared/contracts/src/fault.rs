#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FaultService: Send + Sync + 'static {
    /// Decides whether the current request should fail with a synthetic
    /// internal error.
    fn should_fail(&self) -> bool;
}

#[cfg(feature = "mock")]
impl MockFaultService {
    pub fn with_should_fail(mut self, fail: bool) -> Self {
        self.expect_should_fail().once().return_const(fail);
        self
    }
}
