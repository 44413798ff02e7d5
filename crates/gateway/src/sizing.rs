/// Fixed-fraction position sizing. Pure arithmetic: the sizer does not know
/// whether the balance it was handed came from a live lookup or the fallback
/// capital path.
#[derive(Debug, Clone, Copy)]
pub struct PositionSizer {
    allocation_fraction: f64,
}

impl PositionSizer {
    pub fn new(allocation_fraction: f64) -> Self {
        Self {
            allocation_fraction,
        }
    }

    pub fn size_trade(&self, balance: f64) -> f64 {
        balance * self.allocation_fraction
    }
}
