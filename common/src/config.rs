use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Minimum interval between accepted presses of the same device.
    ///
    /// Buttons retransmit their wake probe a few times per physical press;
    /// with `None` every captured probe is reported as its own press.
    pub debounce: Option<Duration>,
}
